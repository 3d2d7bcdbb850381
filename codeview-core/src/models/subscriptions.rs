//! Host signals a session listens to.
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    FocusWindow,
    HackMode,
    Overview,
    SessionMode,
    Fullscreen,
    Minimize,
    Unminimize,
    Hackable,
}

/// Signals a session is connected to. The registry only routes a signal to sessions that hold
/// it, so a disconnected session never sees a late callback.
#[derive(Debug, Clone, Default)]
pub struct Subscriptions(Vec<Signal>);

impl Subscriptions {
    /// The signals every live session listens to.
    pub fn session_defaults() -> Self {
        Self(vec![
            Signal::FocusWindow,
            Signal::HackMode,
            Signal::Overview,
            Signal::SessionMode,
            Signal::Fullscreen,
            Signal::Minimize,
            Signal::Unminimize,
        ])
    }

    pub fn connect(&mut self, signal: Signal) {
        if !self.is_connected(signal) {
            self.0.push(signal);
        }
    }

    pub fn is_connected(&self, signal: Signal) -> bool {
        self.0.contains(&signal)
    }

    /// Drops every connection, returning what was connected. Calling it again yields nothing.
    pub fn disconnect_all(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnecting_twice_is_a_no_op() {
        let mut subs = Subscriptions::session_defaults();
        subs.connect(Signal::Hackable);
        assert_eq!(subs.disconnect_all().len(), 8);
        assert!(subs.disconnect_all().is_empty());
        assert!(!subs.is_connected(Signal::FocusWindow));
    }

    #[test]
    fn connecting_twice_keeps_one_entry() {
        let mut subs = Subscriptions::default();
        subs.connect(Signal::Hackable);
        subs.connect(Signal::Hackable);
        assert_eq!(subs.disconnect_all(), vec![Signal::Hackable]);
    }
}
