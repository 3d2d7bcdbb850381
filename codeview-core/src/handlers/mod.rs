pub mod display_event_handler;
mod grab_handler;
mod session_handler;
mod window_handler;

use super::config::Config;
use super::models::{DestroyEvent, Lookup, Manager, Session, Signal, WindowHandle};
use super::DisplayEvent;
