use super::{Config, Lookup, Manager, WindowHandle};
use crate::display_servers::DisplayServer;
use crate::models::Handle;
use crate::utils::timers::TimerId;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// A user move or resize started or ended on `handle`.
    pub fn handle_window_grab(&mut self, handle: WindowHandle<H>, grabbed: bool) {
        if let Some(index) = self.session_index(handle, Lookup::Both) {
            self.sessions[index].set_grabbed(&mut self.state, grabbed);
        }
    }

    /// Stop every effect on `handle` right now, e.g. because it is about to go away.
    pub fn kill_effects_on_actor(&mut self, handle: WindowHandle<H>) {
        if let Some(index) = self.session_index(handle, Lookup::Both) {
            self.sessions[index].kill_effects(&mut self.state);
        }
    }

    /// Returns true if a session was waiting on `timer`.
    pub fn timer_fired(&mut self, timer: TimerId) -> bool {
        let state = &mut self.state;
        self.sessions
            .iter_mut()
            .any(|s| s.grab_release_elapsed(state, timer))
    }
}
