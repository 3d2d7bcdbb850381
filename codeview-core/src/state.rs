//! What we know about the shell, and what we asked it to do.

use crate::bridge::{ActionGroup, ActionParameter, ActionRequest, RequestId};
use crate::config::Config;
use crate::models::{Handle, Shader, Window, WindowHandle};
use crate::utils::timers::Timers;
use crate::DisplayAction;
use std::collections::VecDeque;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct State<H: Handle> {
    /// Mirrors of every window the shell told us about. A window missing here is gone.
    pub windows: Vec<Window<H>>,
    pub focused: Option<WindowHandle<H>>,
    pub actions: VecDeque<DisplayAction<H>>,
    pub timers: Timers,
    pub hack_mode_enabled: bool,
    pub overview_visible: bool,
    pub screen_locked: bool,
    pub primary_in_fullscreen: bool,
    /// Length of one leg of a flip.
    pub flip_duration_ms: u64,
    pub grab_settle_ms: u64,
    pub default_shader: Option<Shader>,
    next_request: u64,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        Self {
            windows: Default::default(),
            focused: None,
            actions: Default::default(),
            timers: Timers::default(),
            hack_mode_enabled: config.hack_mode_enabled(),
            overview_visible: false,
            screen_locked: false,
            primary_in_fullscreen: false,
            flip_duration_ms: config.flip_duration_ms(),
            grab_settle_ms: config.grab_settle_ms(),
            default_shader: config.default_shader(),
            next_request: 0,
        }
    }

    pub fn window(&self, handle: WindowHandle<H>) -> Option<&Window<H>> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    pub fn window_mut(&mut self, handle: WindowHandle<H>) -> Option<&mut Window<H>> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    pub fn is_alive(&self, handle: WindowHandle<H>) -> bool {
        self.window(handle).is_some()
    }

    pub fn remove_window(&mut self, handle: WindowHandle<H>) -> Option<Window<H>> {
        let index = self.windows.iter().position(|w| w.handle == handle)?;
        if self.focused == Some(handle) {
            self.focused = None;
        }
        Some(self.windows.remove(index))
    }

    /// Queue an action for the display server, keeping our mirror of the window in step.
    pub fn queue(&mut self, action: DisplayAction<H>) {
        self.apply(&action);
        self.actions.push_back(action);
    }

    /// Ask another process to run one of its actions. Completion comes back as an event.
    pub fn invoke(
        &mut self,
        group: ActionGroup,
        action: &str,
        parameter: ActionParameter,
    ) -> RequestId {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        tracing::debug!("Invoking {} on {}", action, group.bus_name);
        self.actions
            .push_back(DisplayAction::InvokeAction(ActionRequest {
                id,
                group,
                action: action.to_owned(),
                parameter,
            }));
        id
    }

    fn apply(&mut self, action: &DisplayAction<H>) {
        match action {
            DisplayAction::CompletedDestroy(h) => {
                self.remove_window(*h);
            }
            DisplayAction::Activate(h) | DisplayAction::ActivateViaApp(h) => {
                if self.is_alive(*h) {
                    self.focused = Some(*h);
                }
            }
            DisplayAction::Maximize(h) => self.update(*h, |w| w.maximized = true),
            DisplayAction::Unmaximize(h) => self.update(*h, |w| w.maximized = false),
            DisplayAction::MoveResizeFrame(h, frame) => self.update(*h, |w| w.frame = *frame),
            DisplayAction::ExpandAllocatedGeometry(h, min_w, min_h) => {
                self.update(*h, |w| w.frame = w.frame.expanded_to(*min_w, *min_h));
            }
            DisplayAction::Show(h) => self.update(*h, |w| w.set_visible(true)),
            DisplayAction::Hide(h) => self.update(*h, |w| w.set_visible(false)),
            DisplayAction::SetOpacity(h, opacity) => self.update(*h, |w| w.opacity = *opacity),
            DisplayAction::SetRotation(h, angle) => self.update(*h, |w| w.set_rotation(*angle)),
            DisplayAction::EaseRotation { window, angle, .. } => {
                self.update(*window, |w| w.ease_rotation(*angle));
            }
            DisplayAction::SetPivotPoint(h, x, y) => self.update(*h, |w| w.pivot = (*x, *y)),
            DisplayAction::SetEffect {
                window, enabled, ..
            } => self.update(*window, |w| w.effect_enabled = Some(*enabled)),
            DisplayAction::Minimize(h) => self.update(*h, |w| w.minimized = true),
            DisplayAction::Unminimize(h) => self.update(*h, |w| w.minimized = false),
            DisplayAction::SetInactive(h, inactive) => {
                self.update(*h, |w| w.inactive = *inactive);
            }
            _ => {}
        }
    }

    fn update(&mut self, handle: WindowHandle<H>, f: impl FnOnce(&mut Window<H>)) {
        if let Some(window) = self.window_mut(handle) {
            f(window);
        }
    }
}

#[cfg(test)]
impl State<crate::models::MockHandle> {
    pub fn new_test() -> Self {
        Self::new(&crate::config::TestConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Xyhw;

    #[test]
    fn queued_actions_update_the_mirror() {
        let mut state = State::new_test();
        state.windows.push(Window::new(WindowHandle(1)));
        state.queue(DisplayAction::SetRotation(WindowHandle(1), 180.0));
        state.queue(DisplayAction::MoveResizeFrame(
            WindowHandle(1),
            Xyhw::new(1, 2, 300, 400),
        ));
        state.queue(DisplayAction::Hide(WindowHandle(1)));

        let window = state.window(WindowHandle(1)).unwrap();
        assert!((window.rotation - 180.0).abs() < f32::EPSILON);
        assert_eq!(window.frame, Xyhw::new(1, 2, 300, 400));
        assert!(!window.visible());
        assert_eq!(state.actions.len(), 3);
    }

    #[test]
    fn completing_a_destroy_forgets_the_window() {
        let mut state = State::new_test();
        state.windows.push(Window::new(WindowHandle(1)));
        state.focused = Some(WindowHandle(1));
        state.queue(DisplayAction::CompletedDestroy(WindowHandle(1)));
        assert!(!state.is_alive(WindowHandle(1)));
        assert_eq!(state.focused, None);
    }

    #[test]
    fn request_ids_are_unique() {
        let mut state = State::new_test();
        let a = state.invoke(
            ActionGroup::toolbox_app("org.example.Foo"),
            "init",
            ActionParameter::None,
        );
        let b = state.invoke(
            ActionGroup::toolbox_app("org.example.Foo"),
            "flip",
            ActionParameter::None,
        );
        assert_ne!(a, b);
    }
}
