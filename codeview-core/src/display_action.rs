use crate::bridge::ActionRequest;
use crate::models::{Direction, FlipButton, Handle, SessionId, Shader, Side, WindowHandle, Xyhw};
use serde::{Deserialize, Serialize};

/// Easing curve of a rotation tween.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    EaseInQuad,
    EaseOutQuad,
}

/// These are requests from the coordinator.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(bound = "")]
pub enum DisplayAction<H: Handle> {
    /// The map of this window was taken over; finish it without the default effect.
    CompletedMap(WindowHandle<H>),

    /// Finish the held destroy of a window that was replaced mid-flip.
    CompletedDestroy(WindowHandle<H>),

    /// Give a window input focus and raise it.
    Activate(WindowHandle<H>),

    /// Activate a window through its owning application, so sibling windows keep their
    /// stacking order.
    ActivateViaApp(WindowHandle<H>),

    Maximize(WindowHandle<H>),

    Unmaximize(WindowHandle<H>),

    /// Move and resize the frame of a window.
    MoveResizeFrame(WindowHandle<H>, Xyhw),

    /// Don't play the next window manager effect on this window.
    SkipNextEffect(WindowHandle<H>),

    /// Answer to a geometry allocation: grow the window to at least this frame size.
    ExpandAllocatedGeometry(WindowHandle<H>, i32, i32),

    Show(WindowHandle<H>),

    Hide(WindowHandle<H>),

    SetOpacity(WindowHandle<H>, u8),

    /// Jump to a Y rotation angle, in degrees.
    SetRotation(WindowHandle<H>, f32),

    /// Tween the Y rotation angle. The server answers with `RotationCompleted`.
    EaseRotation {
        window: WindowHandle<H>,
        angle: f32,
        duration_ms: u64,
        easing: Easing,
    },

    /// Pivot point, relative to the window size.
    SetPivotPoint(WindowHandle<H>, f32, f32),

    SetEffect {
        window: WindowHandle<H>,
        shader: Shader,
        enabled: bool,
    },

    /// Make `back` ride along behind `front` while it is dragged.
    AttachBackWindow {
        back: WindowHandle<H>,
        front: WindowHandle<H>,
    },

    /// Undo `AttachBackWindow`, putting `back` below `front` at `x`,`y`.
    DetachBackWindow {
        back: WindowHandle<H>,
        front: WindowHandle<H>,
        x: i32,
        y: i32,
    },

    Minimize(WindowHandle<H>),

    Unminimize(WindowHandle<H>),

    /// Nicely ask a window if it would please close at its convenience.
    Close(WindowHandle<H>),

    /// Mark a window as the hidden face of a pair.
    SetInactive(WindowHandle<H>, bool),

    UpdateFlipButton(SessionId, FlipButton),

    /// Play the button's own flip animation towards `Side`.
    AnimateFlipButton(SessionId, Direction, Side),

    DestroyFlipButton(SessionId),

    /// Start watching the `Hackable` property of an application.
    WatchHackable {
        session: SessionId,
        bus_name: String,
        object_path: String,
        interface: String,
    },

    UnwatchHackable(SessionId),

    PlaySound(String),

    /// Invoke an action exported by another process.
    InvokeAction(ActionRequest),
}
