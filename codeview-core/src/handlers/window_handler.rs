use super::{Config, DestroyEvent, Lookup, Manager, Session, WindowHandle};
use crate::display_servers::DisplayServer;
use crate::models::{Handle, Window};

/// Parts of the companion app that must always show up as ordinary windows.
const EXEMPT_APP_IDS: [&str; 3] = [
    "com.hack_computer.HackUnlock",
    "com.hack_computer.HackToolbox",
    "com.endlessm.HackToolbox",
];

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// A window is being mapped. Pairs it with a session, or starts a new one.
    ///
    /// Returns true when a session took the window over, in which case the map must be
    /// completed without the default effect.
    pub fn handle_map_window(&mut self, handle: WindowHandle<H>) -> bool {
        if self.stopped {
            return false;
        }
        if !self.state.hack_mode_enabled || !self.config.companion_installed() {
            return false;
        }
        let Some(window) = self.state.window(handle) else {
            return false;
        };
        if !self.is_hackable_window(window) {
            return false;
        }

        if let Some(target) = window.toolbox_target.clone() {
            let index = self
                .session_for_target_app_window(&target.app_id, &target.window_id)
                .or_else(|| self.available_session_for_target_app(&target.app_id));

            return match index {
                Some(index) => self.sessions[index].admit_toolbox_window(&mut self.state, handle),
                None => {
                    tracing::debug!("Toolbox for {} mapped before its app", target.app_id);
                    let id = self.next_session_id();
                    let session = Session::with_toolbox(id, handle, &mut self.state);
                    self.sessions.push(session);
                    false
                }
            };
        }

        let app_id = window.app_id().unwrap_or_default();
        let window_id = window.window_id();
        let index = self
            .session_for_toolbox_target(&app_id, &window_id)
            .or_else(|| self.available_session_for_toolbox_target(&app_id));

        if let Some(index) = index {
            if self.sessions[index].admit_app_window(&mut self.state, handle) {
                return true;
            }
        }

        // This is simply a new application window.
        self.add_session(handle);
        false
    }

    fn is_hackable_window(&self, window: &Window<H>) -> bool {
        // Apps without a desktop entry are never paired.
        let Some(desktop) = &window.desktop else {
            return false;
        };

        // The desktop entry has the last word.
        if let Some(hackable) = desktop.hackable {
            return hackable;
        }

        let gtk_id = window.gtk_application_id.as_deref().unwrap_or_default();
        if EXEMPT_APP_IDS.contains(&gtk_id) {
            return true;
        }

        let app_id = desktop.app_id();
        desktop.should_show() && !self.config.is_blocked(app_id) && self.config.is_allowed(app_id)
    }

    fn add_session(&mut self, app: WindowHandle<H>) {
        let id = self.next_session_id();
        tracing::debug!("New session {:?} for {:?}", id, app);
        let session = Session::with_app(id, app, &mut self.state);
        self.sessions.push(session);
    }

    pub(crate) fn remove_session(&mut self, index: usize, event: DestroyEvent) {
        let mut session = self.sessions.remove(index);
        session.destroy(&mut self.state, event);
    }

    /// A window is being destroyed. Returns true when it belonged to a session.
    ///
    /// An app window going away because of a flip back leaves its session alive; any other
    /// loss of a paired window ends the session.
    pub fn handle_destroy_window(&mut self, handle: WindowHandle<H>) -> bool {
        if self.stopped {
            return false;
        }

        if let Some(index) = self.session_index(handle, Lookup::App) {
            if self.sessions[index].remove_flipped_back_app_window(&mut self.state) {
                return true;
            }
            self.remove_session(index, DestroyEvent::AppDestroyed);
            return true;
        }

        if let Some(index) = self.session_index(handle, Lookup::Toolbox) {
            self.remove_session(index, DestroyEvent::ToolboxDestroyed);
            return true;
        }

        false
    }

    /// Minimized windows are closed without a window destroy, so for them the actor going
    /// away is the only notice.
    pub(crate) fn actor_destroyed_handler(&mut self, handle: WindowHandle<H>) -> bool {
        let minimized = self
            .session_for(handle, Lookup::Both)
            .map_or(false, |s| s.minimized);
        let handled = minimized && self.handle_destroy_window(handle);
        self.forget_window(handle);
        handled
    }

    /// Drop our mirror of a window, unless a session keeps it as a placeholder.
    pub(crate) fn forget_window(&mut self, handle: WindowHandle<H>) {
        let kept = self
            .sessions
            .iter()
            .any(|s| s.owns(handle) || s.is_placeholder(handle));
        if !kept {
            self.state.remove_window(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::models::{DesktopInfo, MockHandle, Side, ToolboxTarget, Window, WindowHandle};
    use crate::{DisplayAction, DisplayEvent, Manager};

    fn app(id: MockHandle) -> Window<MockHandle> {
        let mut window = Window::new(WindowHandle(id));
        window.gtk_application_id = Some("org.example.Game".to_owned());
        window.gtk_window_object_path = Some(format!("/org/example/Game/window/{id}"));
        window.desktop = Some(DesktopInfo {
            id: "org.example.Game.desktop".to_owned(),
            ..DesktopInfo::default()
        });
        window.first_frame_drawn = true;
        window
    }

    fn toolbox(id: MockHandle, target: MockHandle) -> Window<MockHandle> {
        let mut window = Window::new(WindowHandle(id));
        window.gtk_application_id = Some("com.hack_computer.HackToolbox".to_owned());
        window.desktop = Some(DesktopInfo {
            id: "com.hack_computer.Clubhouse.desktop".to_owned(),
            no_display: true,
            ..DesktopInfo::default()
        });
        window.toolbox_target = Some(ToolboxTarget::new(
            "org.example.Game",
            format!("/org/example/Game/window/{target}"),
        ));
        window.first_frame_drawn = true;
        window
    }

    #[test]
    fn a_new_app_window_starts_a_session() {
        let mut manager = Manager::new_test();
        manager.display_event_handler(DisplayEvent::WindowMapped(app(1)));

        assert_eq!(manager.sessions.len(), 1);
        let session = &manager.sessions[0];
        assert_eq!(session.app, Some(WindowHandle(1)));
        assert_eq!(session.toolbox, None);
        assert_eq!(session.side(), Side::App);
        // Nothing was taken over, so the default map effect plays.
        assert!(!manager
            .state
            .actions
            .contains(&DisplayAction::CompletedMap(WindowHandle(1))));
    }

    #[test]
    fn a_toolbox_joins_the_session_of_its_target() {
        let mut manager = Manager::new_test();
        manager.display_event_handler(DisplayEvent::WindowMapped(app(1)));
        manager.display_event_handler(DisplayEvent::WindowMapped(toolbox(2, 1)));

        assert_eq!(manager.sessions.len(), 1);
        let session = &manager.sessions[0];
        assert_eq!(session.toolbox, Some(WindowHandle(2)));
        assert_eq!(session.side(), Side::Toolbox);
        assert!(session.is_flipping());
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::CompletedMap(WindowHandle(2))));
    }

    #[test]
    fn an_exact_target_wins_over_any_available_session() {
        let mut manager = Manager::new_test();
        manager.display_event_handler(DisplayEvent::WindowMapped(app(1)));
        manager.display_event_handler(DisplayEvent::WindowMapped(app(2)));
        manager.display_event_handler(DisplayEvent::WindowMapped(toolbox(3, 2)));

        let paired = manager
            .session_for(WindowHandle(3), crate::models::Lookup::Toolbox)
            .unwrap();
        assert_eq!(paired.app, Some(WindowHandle(2)));
    }

    #[test]
    fn a_toolbox_without_an_app_waits_in_its_own_session() {
        let mut manager = Manager::new_test();
        let handled = manager.handle_map_window_for_test(toolbox(2, 1));
        assert!(!handled);
        assert_eq!(manager.sessions.len(), 1);
        assert_eq!(manager.sessions[0].app, None);
        assert_eq!(manager.sessions[0].toolbox, Some(WindowHandle(2)));
        assert_eq!(manager.sessions[0].side(), Side::Toolbox);

        // The app shows up and flips in over the toolbox.
        assert!(manager.handle_map_window_for_test(app(1)));
        let session = &manager.sessions[0];
        assert_eq!(session.app, Some(WindowHandle(1)));
        assert_eq!(session.side(), Side::App);
        assert!(session.is_flipping());
        assert_eq!(session.rotating_in(), Some(WindowHandle(1)));
        assert_eq!(session.rotating_out(), Some(WindowHandle(2)));
    }

    #[test]
    fn windows_without_a_desktop_entry_are_ignored() {
        let mut manager = Manager::new_test();
        let mut window = app(1);
        window.desktop = None;
        assert!(!manager.handle_map_window_for_test(window));
        assert!(manager.sessions.is_empty());
    }

    #[test]
    fn hackable_key_has_the_last_word() {
        let mut manager = Manager::new_test_with(TestConfig {
            block_list: vec!["org.example.Game".to_owned()],
            ..TestConfig::default()
        });
        let mut window = app(1);
        window.desktop.as_mut().unwrap().hackable = Some(true);
        manager.handle_map_window_for_test(window);
        assert_eq!(manager.sessions.len(), 1);

        let mut window = app(2);
        window.desktop.as_mut().unwrap().hackable = Some(false);
        manager.handle_map_window_for_test(window);
        assert_eq!(manager.sessions.len(), 1);
    }

    #[test]
    fn block_and_allow_lists_filter_apps() {
        let mut manager = Manager::new_test_with(TestConfig {
            block_list: vec!["org.example.Game".to_owned()],
            ..TestConfig::default()
        });
        manager.handle_map_window_for_test(app(1));
        assert!(manager.sessions.is_empty());

        let mut manager = Manager::new_test_with(TestConfig {
            allow_list: vec!["org.example.Other".to_owned()],
            ..TestConfig::default()
        });
        manager.handle_map_window_for_test(app(1));
        assert!(manager.sessions.is_empty());

        let mut manager = Manager::new_test_with(TestConfig {
            allow_list: vec!["org.example.Game".to_owned()],
            ..TestConfig::default()
        });
        manager.handle_map_window_for_test(app(1));
        assert_eq!(manager.sessions.len(), 1);
    }

    #[test]
    fn no_display_apps_are_ignored_but_toolboxes_are_exempt() {
        let mut manager = Manager::new_test();
        let mut window = app(1);
        window.desktop.as_mut().unwrap().no_display = true;
        manager.handle_map_window_for_test(window);
        assert!(manager.sessions.is_empty());

        // Toolbox windows live in a NoDisplay app but must still pair.
        manager.handle_map_window_for_test(toolbox(2, 1));
        assert_eq!(manager.sessions.len(), 1);
    }

    #[test]
    fn nothing_is_paired_without_the_companion_or_hack_mode() {
        let mut manager = Manager::new_test_with(TestConfig {
            companion_installed: false,
            ..TestConfig::default()
        });
        manager.handle_map_window_for_test(app(1));
        assert!(manager.sessions.is_empty());

        let mut manager = Manager::new_test_with(TestConfig {
            hack_mode_enabled: false,
            ..TestConfig::default()
        });
        manager.handle_map_window_for_test(app(1));
        assert!(manager.sessions.is_empty());
    }

    #[test]
    fn a_stopped_manager_ignores_maps_and_destroys() {
        let mut manager = Manager::new_test();
        manager.handle_map_window_for_test(app(1));
        manager.display_event_handler(DisplayEvent::Stop);

        assert!(!manager.handle_map_window_for_test(app(2)));
        assert_eq!(manager.sessions.len(), 1);
        assert!(!manager.handle_destroy_window(WindowHandle(1)));
        assert_eq!(manager.sessions.len(), 1);
    }

    #[test]
    fn destroying_the_app_while_on_the_toolbox_keeps_the_toolbox_angle() {
        let mut manager = Manager::new_test();
        manager.handle_map_window_for_test(app(1));
        manager.handle_map_window_for_test(toolbox(2, 1));
        manager.kill_effects_on_actor(WindowHandle(2));
        manager
            .state
            .window_mut(WindowHandle(2))
            .unwrap()
            .set_rotation(12.0);
        manager.state.actions.clear();

        assert!(manager.display_event_handler(DisplayEvent::WindowDestroyed(WindowHandle(1))));
        assert!(manager.sessions.is_empty());
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::SetRotation(WindowHandle(1), 12.0)));
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::Close(WindowHandle(2))));
        assert!(!manager
            .state
            .actions
            .contains(&DisplayAction::Close(WindowHandle(1))));
        assert!(!manager.state.is_alive(WindowHandle(1)));
    }

    #[test]
    fn destroying_the_toolbox_closes_the_app() {
        let mut manager = Manager::new_test();
        manager.handle_map_window_for_test(app(1));
        manager.handle_map_window_for_test(toolbox(2, 1));
        manager.state.actions.clear();

        assert!(manager.handle_destroy_window(WindowHandle(2)));
        assert!(manager.sessions.is_empty());
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::Close(WindowHandle(1))));
        assert!(!manager
            .state
            .actions
            .contains(&DisplayAction::Close(WindowHandle(2))));
    }

    #[test]
    fn destroying_an_unknown_window_is_not_handled() {
        let mut manager = Manager::new_test();
        assert!(!manager.handle_destroy_window(WindowHandle(7)));
    }

    #[test]
    fn actor_destroy_only_counts_for_minimized_sessions() {
        let mut manager = Manager::new_test();
        manager.handle_map_window_for_test(app(1));
        manager.handle_map_window_for_test(app(2));

        manager.display_event_handler(DisplayEvent::WindowMinimized(WindowHandle(2)));
        assert!(manager.sessions[1].minimized);

        assert!(!manager.display_event_handler(DisplayEvent::ActorDestroyed(WindowHandle(1))));
        assert!(manager.display_event_handler(DisplayEvent::ActorDestroyed(WindowHandle(2))));
        assert_eq!(manager.sessions.len(), 1);
        assert_eq!(manager.sessions[0].app, Some(WindowHandle(1)));
    }

    #[test]
    fn no_window_is_ever_claimed_twice() {
        let mut manager = Manager::new_test();
        manager.handle_map_window_for_test(app(1));
        manager.handle_map_window_for_test(app(2));
        manager.handle_map_window_for_test(toolbox(3, 1));
        manager.handle_map_window_for_test(toolbox(4, 2));
        manager.handle_map_window_for_test(toolbox(5, 1));
        manager.handle_destroy_window(WindowHandle(3));
        manager.handle_map_window_for_test(app(6));

        let mut seen = vec![];
        for session in &manager.sessions {
            for handle in session.app.iter().chain(session.toolbox.iter()) {
                assert!(!seen.contains(handle), "{handle:?} is claimed twice");
                seen.push(*handle);
            }
        }
    }
}
