use serde::{Deserialize, Serialize};

/// Decoration extents between a window's client area and its frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    pub const fn new_from_pair(top_and_bottom: u32, left_and_right: u32) -> Self {
        Self {
            top: top_and_bottom,
            right: left_and_right,
            bottom: top_and_bottom,
            left: left_and_right,
        }
    }

    /// Convert a client size into the matching frame size. Saturates instead of overflowing on
    /// bogus extents.
    pub fn client_to_frame(&self, w: i32, h: i32) -> (i32, i32) {
        (
            w.saturating_add(Self::extent(self.left, self.right)),
            h.saturating_add(Self::extent(self.top, self.bottom)),
        )
    }

    fn extent(a: u32, b: u32) -> i32 {
        i32::try_from(a.saturating_add(b)).unwrap_or(i32::MAX)
    }
}
