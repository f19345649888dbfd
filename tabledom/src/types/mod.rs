mod color;
mod enums;
mod style;

pub use color::{Color, Rgb};
pub use enums::{Direction, Position, Size, TextStyle, Visibility};
pub use style::Style;
