//! Windows, sessions and the pieces they are built from.
mod flip;
mod flip_button;
mod manager;
mod margins;
mod session;
mod shader;
mod subscriptions;
mod target;
mod window;
mod xyhw;

pub mod dto;

pub use flip::{Direction, Flip, FlipPhase, FlipProgress, Leg, LegPhase};
pub use flip_button::FlipButton;
pub use manager::{Lookup, Manager};
pub use margins::Margins;
pub use session::{DestroyEvent, PendingAction, Session, SessionId, Side};
pub use shader::Shader;
pub use subscriptions::{Signal, Subscriptions};
pub use target::ToolboxTarget;
pub use window::{DesktopInfo, Handle, MockHandle, Window, WindowHandle};
pub use xyhw::Xyhw;
