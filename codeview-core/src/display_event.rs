use crate::bridge::RequestId;
use crate::models::{Handle, SessionId, Window, WindowHandle, Xyhw};
use serde::{Deserialize, Serialize};

/// Everything the shell tells us.
#[allow(clippy::large_enum_variant)]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(bound = "")]
pub enum DisplayEvent<H: Handle> {
    /// A window is being mapped.
    WindowMapped(Window<H>),
    /// The window manager started destroying a window.
    WindowDestroyed(WindowHandle<H>),
    /// The actor of a window went away. Minimized windows are destroyed without a
    /// `WindowDestroyed`, so this is the only notice we get for them.
    ActorDestroyed(WindowHandle<H>),
    /// A user move/resize started (`true`) or ended (`false`).
    WindowGrab(WindowHandle<H>, bool),
    WindowMinimized(WindowHandle<H>),
    WindowUnminimized(WindowHandle<H>),
    FocusChanged(Option<WindowHandle<H>>),
    FirstFrame(WindowHandle<H>),
    /// Position or size of a frame changed.
    GeometryChanged(WindowHandle<H>, Xyhw),
    /// The window manager is allocating geometry for this window.
    GeometryAllocate(WindowHandle<H>),
    VisibilityChanged(WindowHandle<H>, bool),
    /// A rotation tween finished.
    RotationCompleted(WindowHandle<H>),
    /// Every effect on this window must stop now.
    KillEffects(WindowHandle<H>),
    OverviewChanged(bool),
    SessionModeChanged { locked: bool },
    /// Whether the primary monitor shows a fullscreen window.
    FullscreenChanged(bool),
    HackModeChanged(bool),
    HackableChanged(SessionId, bool),
    /// Start or stop pulsing the flip button of a session.
    SetButtonHighlighted(SessionId, bool),
    /// Show or hide the toolbox window of a session from outside.
    SetToolboxVisible(SessionId, bool),
    FlipButtonClicked(SessionId),
    ActionCompleted(RequestId),
    ActionFailed(RequestId, String),
    /// The window manager is shutting down.
    Stop,
}
