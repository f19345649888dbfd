pub mod buffer;
pub mod document;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod listener;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use document::Document;
pub use element::{find_element, find_element_mut, Content, Element, Selector};
pub use event::{Event, EventKind, Key, Modifiers, MouseButton};
pub use hit::{hit_path, hit_test};
pub use layout::{LayoutResult, Rect};
pub use listener::{ListenerOwner, ListenerTarget, Listeners};
pub use terminal::Terminal;
pub use types::*;
