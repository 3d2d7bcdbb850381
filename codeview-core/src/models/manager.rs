use super::{Handle, Session, SessionId, WindowHandle};
use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::state::State;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use std::sync::{atomic::AtomicBool, Arc};

/// Which slot of a session a lookup checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    App,
    Toolbox,
    Both,
}

/// Owns every live session and routes shell events to them.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER> {
    pub state: State<H>,
    pub config: C,
    pub sessions: Vec<Session<H>>,
    next_session_id: u32,
    /// Set once the window manager is shutting down. Maps and destroys are ignored from then on.
    pub(crate) stopped: bool,
    pub(crate) stop_requested: Arc<AtomicBool>,
    pub display_server: SERVER,
}

impl<H: Handle, C, SERVER> Manager<H, C, SERVER>
where
    C: Config,
    SERVER: DisplayServer<H>,
{
    pub fn new(config: C) -> Self {
        let display_server = SERVER::new(&config);

        Self {
            state: State::new(&config),
            config,
            sessions: vec![],
            next_session_id: 0,
            stopped: false,
            stop_requested: Arc::default(),
            display_server,
        }
    }

    /// Raising this flag ends the event loop at its next turn.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_requested.clone()
    }

    /// Raise the stop flag on SIGTERM and SIGINT.
    pub fn register_stop_hook(&self) {
        for signal in [SIGTERM, SIGINT] {
            _ = signal_hook::flag::register(signal, self.stop_requested.clone())
                .map_err(|err| tracing::error!("Cannot register signal handler: {:?}", err));
        }
    }

    pub(crate) fn next_session_id(&mut self) -> SessionId {
        self.next_session_id += 1;
        SessionId(self.next_session_id)
    }

    pub fn session(&self, id: SessionId) -> Option<&Session<H>> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub(crate) fn session_index_by_id(&self, id: SessionId) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == id)
    }

    pub fn session_for(&self, handle: WindowHandle<H>, lookup: Lookup) -> Option<&Session<H>> {
        self.session_index(handle, lookup).map(|i| &self.sessions[i])
    }

    pub(crate) fn session_index(&self, handle: WindowHandle<H>, lookup: Lookup) -> Option<usize> {
        self.sessions.iter().position(|s| {
            let app = s.app == Some(handle) && matches!(lookup, Lookup::App | Lookup::Both);
            let toolbox =
                s.toolbox == Some(handle) && matches!(lookup, Lookup::Toolbox | Lookup::Both);
            app || toolbox
        })
    }

    /// A session whose app is exactly the window a toolbox targets.
    pub(crate) fn session_for_target_app_window(
        &self,
        app_id: &str,
        window_id: &str,
    ) -> Option<usize> {
        self.sessions.iter().position(|s| {
            s.app
                .and_then(|h| self.state.window(h))
                .map_or(false, |w| {
                    w.app_id().as_deref() == Some(app_id) && w.window_id() == window_id
                })
        })
    }

    /// A session running the targeted app that has no toolbox yet.
    pub(crate) fn available_session_for_target_app(&self, app_id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| {
            s.toolbox.is_none()
                && s.app
                    .and_then(|h| self.state.window(h))
                    .map_or(false, |w| w.app_id().as_deref() == Some(app_id))
        })
    }

    /// A session whose toolbox waits for exactly this app window.
    pub(crate) fn session_for_toolbox_target(&self, app_id: &str, window_id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| {
            s.toolbox
                .and_then(|h| self.state.window(h))
                .and_then(|w| w.toolbox_target.as_ref())
                .map_or(false, |t| t.matches(app_id, window_id))
        })
    }

    /// A session with a toolbox for this app but no app window.
    pub(crate) fn available_session_for_toolbox_target(&self, app_id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| {
            s.app.is_none()
                && s.toolbox
                    .and_then(|h| self.state.window(h))
                    .and_then(|w| w.toolbox_target.as_ref())
                    .map_or(false, |t| t.app_id == app_id)
        })
    }
}

#[cfg(test)]
impl
    Manager<
        crate::models::MockHandle,
        crate::config::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    >
{
    pub fn new_test() -> Self {
        Self::new(crate::config::TestConfig::default())
    }

    pub fn new_test_with(config: crate::config::TestConfig) -> Self {
        Self::new(config)
    }

    /// Add the window to the state and run it through the map handler.
    pub fn handle_map_window_for_test(
        &mut self,
        window: crate::models::Window<crate::models::MockHandle>,
    ) -> bool {
        let handle = window.handle;
        self.state.windows.push(window);
        self.handle_map_window(handle)
    }
}
