use super::{Side, Xyhw};
use serde::{Deserialize, Serialize};

/// The control that flips a session. The shell draws it; we only describe it.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlipButton {
    pub state: Side,
    /// Frame of the window the button is aligned to.
    pub rect: Option<Xyhw>,
    pub visible: bool,
    pub reactive: bool,
    /// Blocks interaction while a flip is being set up.
    pub dimmed: bool,
    /// Pulsing affordance.
    pub highlighted: bool,
    /// Whether the button has been added to the shell chrome yet. This only happens once the
    /// window it tracks has drawn its first frame.
    pub in_chrome: bool,
}

impl FlipButton {
    pub const fn new(state: Side) -> Self {
        Self {
            state,
            rect: None,
            visible: false,
            reactive: true,
            dimmed: false,
            highlighted: false,
            in_chrome: false,
        }
    }
}

