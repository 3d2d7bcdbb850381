use super::{Config, DestroyEvent, Manager, Session, Signal};
use crate::display_servers::DisplayServer;
use crate::models::Handle;
use crate::State;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Hand a host signal to every session connected to it.
    pub(crate) fn broadcast(
        &mut self,
        signal: Signal,
        mut f: impl FnMut(&mut Session<H>, &mut State<H>),
    ) {
        let state = &mut self.state;
        self.sessions
            .iter_mut()
            .filter(|s| s.is_subscribed(signal))
            .for_each(|s| f(s, state));
    }

    /// Turning hack mode off ends every session. Turning it on pairs every known window.
    pub fn hack_mode_changed(&mut self, enabled: bool) -> bool {
        if self.state.hack_mode_enabled == enabled {
            return false;
        }
        self.state.hack_mode_enabled = enabled;
        tracing::info!("Hack mode {}", if enabled { "enabled" } else { "disabled" });

        if enabled {
            let handles: Vec<_> = self.state.windows.iter().map(|w| w.handle).collect();
            for handle in handles {
                let claimed = self
                    .sessions
                    .iter()
                    .any(|s| s.owns(handle) || s.is_placeholder(handle));
                if !claimed {
                    self.handle_map_window(handle);
                }
            }
        } else {
            while !self.sessions.is_empty() {
                self.remove_session(0, DestroyEvent::AppDestroyed);
            }
        }

        self.broadcast(Signal::HackMode, |session, state| {
            session.sync_button_visibility(state);
        });
        true
    }

    /// The window manager is going away. Sessions stay as they are.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}
