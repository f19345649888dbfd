#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Vertical midpoint, `top + height / 2`.
    pub fn mid_y(&self) -> f32 {
        f32::from(self.y) + f32::from(self.height) / 2.0
    }

    /// The part of this rect below `offset` rows from its top.
    pub fn below(self, offset: u16) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(offset),
            width: self.width,
            height: self.height.saturating_sub(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 2, 3, 2);
        assert!(r.contains(2, 2));
        assert!(r.contains(4, 3));
        assert!(!r.contains(5, 3));
        assert!(!r.contains(4, 4));
    }

    #[test]
    fn midpoint() {
        assert_eq!(Rect::new(0, 4, 10, 3).mid_y(), 5.5);
    }
}
