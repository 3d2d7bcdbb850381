//! Various shared pieces the coordinator uses.
pub mod helpers;
pub mod state_socket;
pub mod timers;
