use super::{Config, DisplayEvent, Lookup, Manager, Signal};
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::Handle;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process a collection of events, and apply them changes to a manager.
    /// Returns true if the published session state may have changed.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        match event {
            DisplayEvent::WindowMapped(window) => {
                let handle = window.handle;
                self.state.windows.retain(|w| w.handle != handle);
                self.state.windows.push(window);
                if self.handle_map_window(handle) {
                    // The session took over the map animation.
                    self.state.queue(DisplayAction::CompletedMap(handle));
                }
                true
            }

            DisplayEvent::WindowDestroyed(handle) => {
                let handled = self.handle_destroy_window(handle);
                self.forget_window(handle);
                handled
            }

            DisplayEvent::ActorDestroyed(handle) => self.actor_destroyed_handler(handle),

            DisplayEvent::WindowGrab(handle, grabbed) => {
                self.handle_window_grab(handle, grabbed);
                true
            }

            DisplayEvent::WindowMinimized(handle) => {
                if let Some(window) = self.state.window_mut(handle) {
                    window.minimized = true;
                }
                self.broadcast(Signal::Minimize, |session, state| {
                    session.window_minimized(state, handle);
                });
                false
            }

            DisplayEvent::WindowUnminimized(handle) => {
                if let Some(window) = self.state.window_mut(handle) {
                    window.minimized = false;
                }
                self.broadcast(Signal::Unminimize, |session, state| {
                    session.window_unminimized(state, handle);
                });
                false
            }

            DisplayEvent::FocusChanged(handle) => {
                if self.state.focused == handle {
                    return false;
                }
                self.state.focused = handle;
                self.broadcast(Signal::FocusWindow, |session, state| {
                    session.focus_window_changed(state);
                });
                true
            }

            DisplayEvent::FirstFrame(handle) => {
                if let Some(window) = self.state.window_mut(handle) {
                    window.first_frame_drawn = true;
                }
                if let Some(index) = self.session_index(handle, Lookup::Both) {
                    self.sessions[index].first_frame(&mut self.state, handle);
                }
                false
            }

            DisplayEvent::GeometryChanged(handle, frame) => {
                if let Some(window) = self.state.window_mut(handle) {
                    window.frame = frame;
                }
                if let Some(index) = self.session_index(handle, Lookup::Both) {
                    self.sessions[index].window_geometry_changed(&mut self.state, handle);
                }
                false
            }

            DisplayEvent::GeometryAllocate(handle) => {
                if let Some(index) = self.session_index(handle, Lookup::Both) {
                    self.sessions[index].geometry_allocate(&mut self.state, handle);
                }
                false
            }

            DisplayEvent::VisibilityChanged(handle, visible) => {
                if let Some(window) = self.state.window_mut(handle) {
                    window.set_visible(visible);
                }
                if let Some(index) = self.session_index(handle, Lookup::Both) {
                    self.sessions[index].sync_button_visibility(&mut self.state);
                }
                false
            }

            DisplayEvent::RotationCompleted(handle) => {
                if let Some(window) = self.state.window_mut(handle) {
                    window.finish_rotation();
                }
                // Placeholders turn too, and they belong to no slot.
                if let Some(session) = self.sessions.iter_mut().find(|s| s.is_turning(handle)) {
                    session.rotation_completed(&mut self.state, handle);
                    return true;
                }
                false
            }

            DisplayEvent::KillEffects(handle) => {
                self.kill_effects_on_actor(handle);
                true
            }

            DisplayEvent::OverviewChanged(visible) => {
                self.state.overview_visible = visible;
                self.broadcast(Signal::Overview, |session, state| {
                    session.overview_changed(state);
                });
                false
            }

            DisplayEvent::SessionModeChanged { locked } => {
                self.state.screen_locked = locked;
                self.broadcast(Signal::SessionMode, |session, state| {
                    session.sync_button_visibility(state);
                });
                false
            }

            DisplayEvent::FullscreenChanged(fullscreen) => {
                self.state.primary_in_fullscreen = fullscreen;
                self.broadcast(Signal::Fullscreen, |session, state| {
                    session.sync_button_visibility(state);
                });
                false
            }

            DisplayEvent::HackModeChanged(enabled) => self.hack_mode_changed(enabled),

            DisplayEvent::HackableChanged(id, hackable) => {
                if let Some(index) = self.session_index_by_id(id) {
                    let session = &mut self.sessions[index];
                    if session.is_subscribed(Signal::Hackable) {
                        session.hackable_changed(&mut self.state, hackable);
                    }
                }
                false
            }

            DisplayEvent::SetButtonHighlighted(id, highlighted) => {
                self.session_index_by_id(id).map_or(false, |index| {
                    self.sessions[index].set_button_highlighted(&mut self.state, highlighted)
                })
            }

            DisplayEvent::SetToolboxVisible(id, visible) => {
                self.session_index_by_id(id).map_or(false, |index| {
                    self.sessions[index].set_toolbox_visible(&mut self.state, visible)
                })
            }

            DisplayEvent::FlipButtonClicked(id) => {
                if let Some(index) = self.session_index_by_id(id) {
                    self.sessions[index].switch_windows(&mut self.state);
                }
                true
            }

            DisplayEvent::ActionCompleted(request) => {
                if !self
                    .sessions
                    .iter_mut()
                    .any(|s| s.action_completed(request))
                {
                    tracing::trace!("Request {:?} completed", request);
                }
                false
            }

            DisplayEvent::ActionFailed(request, reason) => {
                let state = &mut self.state;
                if !self
                    .sessions
                    .iter_mut()
                    .any(|s| s.action_failed(state, request, &reason))
                {
                    tracing::warn!("Request {:?} failed: {}", request, reason);
                }
                true
            }

            DisplayEvent::Stop => {
                self.stop();
                false
            }
        }
    }
}
