//! Frame rectangles.
use serde::{Deserialize, Serialize};

/// A frame rectangle. x,y from top left.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy, Default)]
pub struct Xyhw {
    x: i32,
    y: i32,
    h: i32,
    w: i32,
}

impl Xyhw {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, h, w }
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
    #[must_use]
    pub const fn h(&self) -> i32 {
        self.h
    }
    #[must_use]
    pub const fn w(&self) -> i32 {
        self.w
    }

    /// Grow the rectangle so that it is at least `min_w` by `min_h`. The origin is kept.
    #[must_use]
    pub fn expanded_to(&self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanding_keeps_the_origin() {
        let rect = Xyhw::new(10, 20, 300, 200);
        assert_eq!(rect.expanded_to(400, 100), Xyhw::new(10, 20, 400, 200));
    }

    #[test]
    fn expanding_never_shrinks() {
        let rect = Xyhw::new(0, 0, 300, 200);
        assert_eq!(rect.expanded_to(10, 10), rect);
    }
}
