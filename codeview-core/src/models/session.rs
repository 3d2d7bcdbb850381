//! One app window paired with its toolbox window.
//!
//! A session shows one face at a time. It owns both windows while they live, follows them
//! around, flips between them and tears both down together.
use super::flip::{Direction, Flip, FlipPhase, FlipProgress};
use super::{FlipButton, Handle, Shader, Signal, Subscriptions, WindowHandle};
use crate::bridge::{self, ActionGroup, ActionParameter, RequestId};
use crate::geometry;
use crate::utils::timers::TimerId;
use crate::{DisplayAction, State};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u32);

/// The face a session is showing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    App,
    Toolbox,
}

/// Which window's destruction caused the session to be torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyEvent {
    AppDestroyed,
    ToolboxDestroyed,
}

/// Outstanding requests to other processes that change what the session is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// The toolbox app was asked to open a toolbox for us.
    FlipToToolbox,
    /// The toolbox was asked to recreate the app window.
    FlipBack,
}

/// The back window riding along with the front one during a grab.
#[derive(Debug, Clone, Copy)]
struct Attachment<H: Handle> {
    front: WindowHandle<H>,
    back: WindowHandle<H>,
}

#[derive(Debug, Clone, Copy)]
struct Grab<H: Handle> {
    attached: Option<Attachment<H>>,
    /// Set once the grab ended; the session stays grabbed until it fires.
    release: Option<TimerId>,
}

#[derive(Debug, Clone)]
enum Phase<H: Handle> {
    Idle,
    Flipping(Flip<H>),
    Grabbed(Grab<H>),
    Destroyed,
}

#[derive(Debug)]
pub struct Session<H: Handle> {
    pub id: SessionId,
    pub app: Option<WindowHandle<H>>,
    pub toolbox: Option<WindowHandle<H>>,
    /// Set when the toolbox was asked to flip back and the app window is expected to be
    /// destroyed and mapped again.
    pub app_removed_by_flip_back: bool,
    /// The app window removed by a flip back. Its destroy is held until the new app window
    /// has turned in over it.
    app_removed: Option<WindowHandle<H>>,
    side: Side,
    phase: Phase<H>,
    pub button: Option<FlipButton>,
    /// The window whose first frame places the button on screen.
    button_anchor: Option<WindowHandle<H>>,
    subscriptions: Subscriptions,
    hackable: bool,
    pub minimized: bool,
    shader: Option<Shader>,
    /// App id the pairing was made for. Outlives the app window during a flip back.
    app_id: Option<String>,
    pending: Vec<(RequestId, PendingAction)>,
}

impl<H: Handle> Session<H> {
    fn empty(id: SessionId, side: Side) -> Self {
        Self {
            id,
            app: None,
            toolbox: None,
            app_removed_by_flip_back: false,
            app_removed: None,
            side,
            phase: Phase::Idle,
            button: None,
            button_anchor: None,
            subscriptions: Subscriptions::session_defaults(),
            hackable: true,
            minimized: false,
            shader: None,
            app_id: None,
            pending: vec![],
        }
    }

    /// A fresh pairing for an app window with no toolbox yet.
    pub fn with_app(id: SessionId, app: WindowHandle<H>, state: &mut State<H>) -> Self {
        let mut session = Self::empty(id, Side::App);
        session.app = Some(app);
        session.setup_app_window(state);
        session.update_pairing_state(state);
        session
    }

    /// A toolbox that showed up before the app window it targets.
    pub fn with_toolbox(id: SessionId, toolbox: WindowHandle<H>, state: &mut State<H>) -> Self {
        let mut session = Self::empty(id, Side::Toolbox);
        session.toolbox = Some(toolbox);
        session.app_id = state
            .window(toolbox)
            .and_then(|w| w.toolbox_target.as_ref())
            .map(|t| t.app_id.clone());
        session.update_pairing_state(state);
        session
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub const fn is_hackable(&self) -> bool {
        self.hackable
    }

    pub fn is_subscribed(&self, signal: Signal) -> bool {
        self.subscriptions.is_connected(signal)
    }

    pub const fn is_grabbed(&self) -> bool {
        matches!(self.phase, Phase::Grabbed(_))
    }

    pub const fn is_flipping(&self) -> bool {
        matches!(self.phase, Phase::Flipping(_))
    }

    pub const fn is_destroyed(&self) -> bool {
        matches!(self.phase, Phase::Destroyed)
    }

    pub fn rotating_in(&self) -> Option<WindowHandle<H>> {
        match &self.phase {
            Phase::Flipping(flip) => flip.rotating_in(),
            _ => None,
        }
    }

    pub fn rotating_out(&self) -> Option<WindowHandle<H>> {
        match &self.phase {
            Phase::Flipping(flip) => flip.rotating_out(),
            _ => None,
        }
    }

    /// Whether `actor` is being turned by a flip of this session, placeholder included.
    pub fn is_turning(&self, actor: WindowHandle<H>) -> bool {
        match &self.phase {
            Phase::Flipping(flip) => flip.is_turning(actor),
            _ => false,
        }
    }

    pub fn owns(&self, handle: WindowHandle<H>) -> bool {
        self.app == Some(handle) || self.toolbox == Some(handle)
    }

    /// Whether `handle` is an app window kept around until a flip back completes.
    pub fn is_placeholder(&self, handle: WindowHandle<H>) -> bool {
        if self.app_removed == Some(handle) {
            return true;
        }
        match &self.phase {
            Phase::Flipping(flip) => flip.old_dst == Some(handle),
            _ => false,
        }
    }

    pub fn owns_timer(&self, timer: TimerId) -> bool {
        matches!(&self.phase, Phase::Grabbed(Grab { release: Some(t), .. }) if *t == timer)
    }

    pub fn current(&self) -> Option<WindowHandle<H>> {
        match self.side {
            Side::App => self.app,
            Side::Toolbox => self.toolbox,
        }
    }

    fn other(&self, handle: WindowHandle<H>) -> Option<WindowHandle<H>> {
        if self.app == Some(handle) {
            self.toolbox
        } else if self.toolbox == Some(handle) {
            self.app
        } else {
            None
        }
    }

    fn is_current(&self, handle: WindowHandle<H>) -> bool {
        self.current() == Some(handle)
    }

    fn windows_need_sync(&self) -> bool {
        self.app.is_some() && self.toolbox.is_some()
    }

    /// Take `app` as the app window. Refused when there already is one.
    ///
    /// With a toolbox present, the new app window flips in over it, turning in on top of the
    /// previous app window if a flip back left one behind.
    pub fn admit_app_window(&mut self, state: &mut State<H>, app: WindowHandle<H>) -> bool {
        if self.app.is_some() || self.is_destroyed() {
            return false;
        }
        let placeholder = self.app_removed.take();

        self.app = Some(app);
        self.setup_app_window(state);

        let started = self.setup_animation(
            state,
            Side::App,
            self.toolbox,
            placeholder,
            app,
            Direction::Right,
        );
        if !started {
            if let Some(placeholder) = placeholder {
                state.queue(DisplayAction::CompletedDestroy(placeholder));
            }
            self.update_pairing_state(state);
        }
        true
    }

    /// Take `toolbox` as the toolbox window. Refused when there already is one.
    pub fn admit_toolbox_window(&mut self, state: &mut State<H>, toolbox: WindowHandle<H>) -> bool {
        if self.toolbox.is_some() || self.is_destroyed() {
            return false;
        }
        self.toolbox = Some(toolbox);
        tracing::debug!("Session {:?} admitted toolbox {:?}", self.id, toolbox);

        if !self.setup_animation(state, Side::Toolbox, self.app, None, toolbox, Direction::Left) {
            self.update_pairing_state(state);
        }
        true
    }

    fn setup_app_window(&mut self, state: &mut State<H>) {
        let Some(app) = self.app else { return };
        if let Some(window) = state.window(app) {
            self.app_id = window.app_id();
            let shader_key = window.desktop.as_ref().and_then(|d| d.shader.as_deref());
            self.shader = Shader::resolve(shader_key, state.default_shader);
        }
        self.ensure_button(state);
    }

    fn ensure_button(&mut self, state: &mut State<H>) {
        if self.button.is_some() {
            return;
        }
        let Some(actor) = self.current() else { return };

        self.button = Some(FlipButton::new(self.side));
        self.button_anchor = Some(actor);

        // The hackable property only matters while there is a button to show.
        self.setup_hackable_watch(state);

        if state.window(actor).map_or(false, |w| w.first_frame_drawn) {
            self.place_button(state);
        }
    }

    fn setup_hackable_watch(&mut self, state: &mut State<H>) {
        let Some(window) = self.app.and_then(|app| state.window(app)) else {
            return;
        };
        let Some(bus_name) = window.gtk_application_id.clone() else {
            return;
        };
        let object_path = window
            .gtk_application_object_path
            .clone()
            .unwrap_or_else(|| bridge::object_path(&bus_name));
        let interface = bridge::hackable_interface(&bus_name).to_owned();

        self.subscriptions.connect(Signal::Hackable);
        state.queue(DisplayAction::WatchHackable {
            session: self.id,
            bus_name,
            object_path,
            interface,
        });
    }

    fn place_button(&mut self, state: &mut State<H>) {
        let rect = self
            .current()
            .and_then(|h| state.window(h))
            .map(|w| w.frame);
        if let Some(button) = self.button.as_mut() {
            button.in_chrome = true;
            button.rect = rect.or(button.rect);
        }
        self.button_anchor = None;
        self.push_button(state);
    }

    fn push_button(&self, state: &mut State<H>) {
        if let Some(button) = &self.button {
            state.queue(DisplayAction::UpdateFlipButton(self.id, button.clone()));
        }
    }

    fn synchronize_button(&mut self, state: &mut State<H>, win: WindowHandle<H>) {
        let Some(frame) = state.window(win).map(|w| w.frame) else {
            return;
        };
        if let Some(button) = self.button.as_mut() {
            if button.rect == Some(frame) {
                return;
            }
            button.rect = Some(frame);
        }
        self.push_button(state);
    }

    /// The shown window is active, the hidden one is flagged so switchers skip it.
    fn update_pairing_state(&self, state: &mut State<H>) {
        let Some(actor) = self.current() else { return };
        state.queue(DisplayAction::SetInactive(actor, false));
        if let Some(other) = self.other(actor) {
            state.queue(DisplayAction::SetInactive(other, true));
        }
    }

    fn set_side(&mut self, state: &mut State<H>, side: Side, include_button: bool) {
        self.side = side;
        if include_button {
            if let Some(button) = self.button.as_mut() {
                button.state = side;
            }
            self.push_button(state);
        }
        self.update_pairing_state(state);
    }

    fn set_effect(&self, state: &mut State<H>, window: WindowHandle<H>, enabled: bool) {
        if let Some(shader) = self.shader {
            state.queue(DisplayAction::SetEffect {
                window,
                shader,
                enabled,
            });
        }
    }

    /// Start a flip towards `target`. Does nothing when already there, while another flip is
    /// running, or while a window is grabbed. Returns whether a flip was started.
    fn setup_animation(
        &mut self,
        state: &mut State<H>,
        target: Side,
        src: Option<WindowHandle<H>>,
        old_dst: Option<WindowHandle<H>>,
        new_dst: WindowHandle<H>,
        direction: Direction,
    ) -> bool {
        if self.side == target {
            return false;
        }
        if !matches!(self.phase, Phase::Idle) {
            tracing::debug!(
                "Session {:?} is busy, not flipping to {:?}",
                self.id,
                target
            );
            return false;
        }
        let Some(src) = src.filter(|h| state.is_alive(*h)) else {
            self.set_side(state, target, true);
            return false;
        };

        self.set_side(state, target, false);
        let flip = Flip::prepare(state, target, src, old_dst, new_dst, direction, self.shader);
        let ready = flip.is_ready(state);
        self.phase = Phase::Flipping(flip);
        if ready {
            self.start_rotation(state);
        }
        true
    }

    fn start_rotation(&mut self, state: &mut State<H>) {
        let Phase::Flipping(flip) = &mut self.phase else {
            return;
        };
        if flip.phase != FlipPhase::Preparing {
            return;
        }
        flip.run(state);
        let (direction, target) = (flip.direction, flip.target);

        if let Some(button) = self.button.as_mut() {
            button.state = target;
            state.queue(DisplayAction::AnimateFlipButton(self.id, direction, target));
        }
    }

    /// A user move or resize started or stopped on one of our windows.
    ///
    /// A flip in flight is finished on the spot before the grab takes over. The back window is
    /// let go only once the window manager had time to settle its own move effects.
    pub fn set_grabbed(&mut self, state: &mut State<H>, grabbed: bool) {
        if self.is_destroyed() {
            return;
        }
        let mut attached = None;
        if let Phase::Grabbed(grab) = &mut self.phase {
            if let Some(timer) = grab.release.take() {
                state.timers.cancel(timer);
            }
            attached = grab.attached;
        }

        if grabbed {
            if self.is_flipping() {
                self.kill_effects(state);
            }
            if attached.is_none() {
                attached = self.attach_back_window(state);
            }
            self.phase = Phase::Grabbed(Grab {
                attached,
                release: None,
            });
            self.sync_button_visibility(state);
        } else if let Phase::Grabbed(grab) = &mut self.phase {
            let settle = Duration::from_millis(state.grab_settle_ms);
            grab.release = Some(state.timers.schedule(settle));
        }
    }

    fn attach_back_window(&self, state: &mut State<H>) -> Option<Attachment<H>> {
        let front = self.current()?;
        let back = self.other(front)?;
        if !state.is_alive(back) {
            return None;
        }
        state.queue(DisplayAction::AttachBackWindow { back, front });
        Some(Attachment { front, back })
    }

    fn detach_back_window(state: &mut State<H>, attachment: Attachment<H>) {
        if !state.is_alive(attachment.back) {
            return;
        }
        let Some(frame) = state.window(attachment.front).map(|w| w.frame) else {
            return;
        };
        state.queue(DisplayAction::DetachBackWindow {
            back: attachment.back,
            front: attachment.front,
            x: frame.x(),
            y: frame.y(),
        });
    }

    /// The settle delay after a grab ran out. Returns false when `timer` is not ours.
    pub fn grab_release_elapsed(&mut self, state: &mut State<H>, timer: TimerId) -> bool {
        if !self.owns_timer(timer) {
            return false;
        }
        if let Phase::Grabbed(grab) = &self.phase {
            if let Some(attachment) = grab.attached {
                Self::detach_back_window(state, attachment);
            }
        }
        self.phase = Phase::Idle;
        self.sync_button_visibility(state);

        if let Some(front) = self.current() {
            self.synchronize_button(state, front);
            if let Some(back) = self.other(front) {
                self.synchronize_windows(state, front, back);
            }
        }
        true
    }

    /// The app window is going away because we asked the toolbox to flip back, and a new one
    /// will be mapped. Keeps the old actor for the flip in and shows the toolbox meanwhile.
    ///
    /// Returns false when no flip back was requested, in which case this is a plain destroy.
    pub fn remove_flipped_back_app_window(&mut self, state: &mut State<H>) -> bool {
        if !self.app_removed_by_flip_back {
            return false;
        }
        if self.is_flipping() {
            self.kill_effects(state);
        }
        self.app_removed = self.app.take();
        self.app_removed_by_flip_back = false;

        self.set_side(state, Side::Toolbox, true);

        if let Some(actor) = self.current() {
            state.queue(DisplayAction::SetRotation(actor, 0.0));
            self.set_effect(state, actor, false);
            state.queue(DisplayAction::Show(actor));
            state.queue(DisplayAction::Activate(actor));
        }
        true
    }

    /// Let go of everything. The session must be removed from the registry right after.
    ///
    /// Windows that are not the cause of the teardown are asked to close. Calling this twice
    /// does nothing the second time.
    pub fn destroy(&mut self, state: &mut State<H>, event: DestroyEvent) {
        if self.is_destroyed() {
            return;
        }
        tracing::debug!("Destroying session {:?} ({:?})", self.id, event);

        if self.subscriptions.disconnect_all().contains(&Signal::Hackable) {
            state.queue(DisplayAction::UnwatchHackable(self.id));
        }
        match &mut self.phase {
            Phase::Grabbed(Grab {
                release: Some(timer),
                ..
            }) => {
                state.timers.cancel(*timer);
            }
            Phase::Flipping(flip) => {
                if let Some(placeholder) = flip.old_dst.take() {
                    if state.is_alive(placeholder) {
                        state.queue(DisplayAction::CompletedDestroy(placeholder));
                    }
                }
            }
            _ => {}
        }

        if let Some(app) = self.app.take().filter(|h| state.is_alive(*h)) {
            if event != DestroyEvent::AppDestroyed {
                state.queue(DisplayAction::Close(app));
            } else if self.side == Side::Toolbox {
                // No visible snap while the dying app window may still be turning.
                let angle = self
                    .toolbox
                    .and_then(|tb| state.window(tb))
                    .map(|tb| tb.rotation);
                if let Some(angle) = angle {
                    state.queue(DisplayAction::SetRotation(app, angle));
                }
            }
        }

        if let Some(toolbox) = self.toolbox.take().filter(|h| state.is_alive(*h)) {
            if event != DestroyEvent::ToolboxDestroyed {
                state.queue(DisplayAction::Close(toolbox));
            }
        }

        if let Some(placeholder) = self.app_removed.take() {
            if state.is_alive(placeholder) {
                state.queue(DisplayAction::CompletedDestroy(placeholder));
            }
        }

        if self.button.take().is_some() {
            state.queue(DisplayAction::DestroyFlipButton(self.id));
        }
        self.button_anchor = None;
        self.pending.clear();
        self.phase = Phase::Destroyed;
    }

    /// Show the button only when one of our windows has focus and nothing else is in the way.
    /// The toolbox app is asked to get a toolbox ready the first time the button shows.
    pub fn sync_button_visibility(&mut self, state: &mut State<H>) {
        if self.button.is_none() {
            return;
        }
        let Some(focused) = state.focused else { return };

        let show = state.hack_mode_enabled
            && self.owns(focused)
            && state.window(focused).map_or(false, |w| w.visible())
            && !state.overview_visible
            && !state.primary_in_fullscreen
            && !state.screen_locked
            && !self.is_grabbed()
            && self.hackable;

        if show && self.toolbox.is_none() {
            if let Some(target) = self.target_parameter(state) {
                state.invoke(self.toolbox_app_group(), "init", target);
            }
        }
        self.set_button_visible(state, show);
    }

    fn set_button_visible(&mut self, state: &mut State<H>, visible: bool) {
        let Some(button) = self.button.as_mut() else {
            return;
        };
        if button.visible != visible {
            button.visible = visible;
            self.push_button(state);
        }
    }

    fn toolbox_app_group(&self) -> ActionGroup {
        ActionGroup::toolbox_app(self.app_id.as_deref().unwrap_or_default())
    }

    /// `(targetAppId, targetWindowId)` of our app window.
    fn target_parameter(&self, state: &State<H>) -> Option<ActionParameter> {
        let window = state.window(self.app?)?;
        Some(ActionParameter::Target(
            window.app_id()?,
            window.window_id(),
        ))
    }

    fn restore_button_state(&mut self, state: &mut State<H>) {
        if let Some(button) = self.button.as_mut() {
            button.reactive = true;
            button.dimmed = false;
            // Hidden first so the shell picks up the reactive change.
            button.visible = false;
        }
        self.push_button(state);
        self.sync_button_visibility(state);
    }

    /// Let the app know which side it is on, if it cares.
    fn activate_app_flip(&self, state: &mut State<H>) {
        let Some(window) = self.app.and_then(|h| state.window(h)) else {
            return;
        };
        if !window.has_action("flip") {
            return;
        }
        if let Some(group) = ActionGroup::for_app(window) {
            let flipped = self.side == Side::Toolbox;
            state.invoke(group, "flip", ActionParameter::Bool(flipped));
        }
    }

    /// Focus moved. If it landed on our hidden face, the user switched windows some other way
    /// (a task switcher, the overview), so we swap sides on the spot without a flip.
    pub fn focus_window_changed(&mut self, state: &mut State<H>) {
        let Some(focused) = state.focused else { return };
        self.sync_button_visibility(state);

        if !self.owns(focused) {
            return;
        }
        // The flip activates windows itself.
        if self.is_flipping() {
            return;
        }

        let actor = self.current();
        if actor != Some(focused) {
            let side = if self.app == Some(focused) {
                Side::App
            } else {
                Side::Toolbox
            };
            self.set_side(state, side, true);
            self.activate_app_flip(state);
            state.queue(DisplayAction::SetRotation(focused, 0.0));
            self.set_effect(state, focused, false);
            if let Some(actor) = actor.filter(|h| state.is_alive(*h)) {
                state.queue(DisplayAction::SetRotation(actor, 180.0));
                self.set_effect(state, actor, true);
            }
        }

        // Raises the other windows of the app too, keeping their stacking order.
        state.queue(DisplayAction::ActivateViaApp(focused));
    }

    /// The flip button was clicked.
    pub fn switch_windows(&mut self, state: &mut State<H>) {
        if self.is_grabbed() || self.is_flipping() {
            return;
        }
        let Some(button) = self.button.as_mut() else {
            return;
        };
        if !button.reactive {
            return;
        }
        button.dimmed = true;
        self.push_button(state);

        match self.side {
            Side::App => self.switch_to_toolbox(state),
            Side::Toolbox => self.switch_to_app(state),
        }
    }

    fn switch_to_toolbox(&mut self, state: &mut State<H>) {
        match self.toolbox {
            None => {
                let Some(target) = self.target_parameter(state) else {
                    return;
                };
                let id = state.invoke(self.toolbox_app_group(), "flip", target);
                self.pending.push((id, PendingAction::FlipToToolbox));
                self.set_reactive(state, false);
            }
            Some(toolbox) => {
                self.setup_animation(state, Side::Toolbox, self.app, None, toolbox, Direction::Left);
            }
        }
    }

    fn switch_to_app(&mut self, state: &mut State<H>) {
        let Some(toolbox) = self.toolbox.and_then(|h| state.window(h)) else {
            return;
        };
        let flip_back = if toolbox.has_action("flip-back") {
            ActionGroup::for_window(toolbox)
        } else {
            None
        };

        if let Some(group) = flip_back {
            let id = state.invoke(group, "flip-back", ActionParameter::None);
            self.pending.push((id, PendingAction::FlipBack));
            self.app_removed_by_flip_back = true;
            self.set_reactive(state, false);
        } else if let Some(app) = self.app {
            self.setup_animation(state, Side::App, self.toolbox, None, app, Direction::Right);
        }
    }

    fn set_reactive(&mut self, state: &mut State<H>, reactive: bool) {
        if let Some(button) = self.button.as_mut() {
            button.reactive = reactive;
        }
        self.push_button(state);
    }

    fn synchronize_windows(&self, state: &mut State<H>, src: WindowHandle<H>, dst: WindowHandle<H>) {
        let (Some(src), Some(dst)) = (state.window(src), state.window(dst)) else {
            return;
        };
        let (actions, _) = geometry::synchronize(src, dst);
        actions.into_iter().for_each(|act| state.queue(act));
    }

    /// The frame of `win` moved or changed size.
    pub fn window_geometry_changed(&mut self, state: &mut State<H>, win: WindowHandle<H>) {
        if !self.is_current(win) {
            return;
        }
        self.synchronize_button(state, win);

        // While grabbed the back window rides along; it catches up on release.
        if !self.windows_need_sync() || self.is_grabbed() {
            return;
        }
        if let Some(other) = self.other(win) {
            self.synchronize_windows(state, win, other);
        }
    }

    /// The window manager is allocating a size for `win`.
    pub fn geometry_allocate(&mut self, state: &mut State<H>, win: WindowHandle<H>) {
        if !self.windows_need_sync() || !self.is_current(win) {
            return;
        }
        let (Some(app), Some(toolbox)) = (self.app, self.toolbox) else {
            return;
        };
        let (Some(app), Some(toolbox), Some(resizing)) =
            (state.window(app), state.window(toolbox), state.window(win))
        else {
            return;
        };
        let act = geometry::constrain_geometry(app, toolbox, resizing);
        state.queue(act);
    }

    pub fn window_minimized(&mut self, state: &mut State<H>, win: WindowHandle<H>) {
        if !self.owns(win) || !self.is_current(win) {
            return;
        }
        self.set_button_visible(state, false);
        if let Some(other) = self.other(win) {
            if state.window(other).map_or(false, |w| !w.minimized) {
                state.queue(DisplayAction::Minimize(other));
            }
        }
        self.minimized = true;
    }

    pub fn window_unminimized(&mut self, state: &mut State<H>, win: WindowHandle<H>) {
        if !self.owns(win) || !self.is_current(win) {
            return;
        }
        self.set_button_visible(state, true);
        if let Some(other) = self.other(win) {
            if state.window(other).map_or(false, |w| w.minimized) {
                state.queue(DisplayAction::Unminimize(other));
            }
        }
        self.minimized = false;
    }

    /// The back face keeps its effect, except in the overview where both faces are plain.
    pub fn overview_changed(&mut self, state: &mut State<H>) {
        let back = self.current().and_then(|actor| self.other(actor));
        if let Some(back) = back.filter(|h| state.is_alive(*h)) {
            self.set_effect(state, back, !state.overview_visible);
        }
        self.sync_button_visibility(state);
    }

    /// Pulse the flip button, or stop pulsing it. Returns whether anything changed.
    pub fn set_button_highlighted(&mut self, state: &mut State<H>, highlighted: bool) -> bool {
        let Some(button) = self.button.as_mut() else {
            return false;
        };
        if button.highlighted == highlighted {
            return false;
        }
        button.highlighted = highlighted;
        self.push_button(state);
        true
    }

    /// Show or hide the toolbox window without flipping. Returns false without a toolbox.
    pub fn set_toolbox_visible(&mut self, state: &mut State<H>, visible: bool) -> bool {
        let Some(toolbox) = self.toolbox.filter(|h| state.is_alive(*h)) else {
            return false;
        };
        if visible {
            state.queue(DisplayAction::Show(toolbox));
        } else {
            state.queue(DisplayAction::Hide(toolbox));
        }
        if state.focused == Some(toolbox) {
            self.sync_button_visibility(state);
        }
        true
    }

    pub fn hackable_changed(&mut self, state: &mut State<H>, hackable: bool) {
        self.hackable = hackable;
        self.sync_button_visibility(state);
    }

    /// `win` drew its first frame.
    pub fn first_frame(&mut self, state: &mut State<H>, win: WindowHandle<H>) {
        if self.button_anchor == Some(win) {
            self.place_button(state);
        }
        let waiting = matches!(
            &self.phase,
            Phase::Flipping(flip) if flip.phase == FlipPhase::Preparing && flip.new_dst == win
        );
        if waiting {
            self.start_rotation(state);
        }
    }

    /// A rotation tween on `win` finished.
    pub fn rotation_completed(&mut self, state: &mut State<H>, win: WindowHandle<H>) {
        let shader = self.shader;
        let (progress, finished) = match &mut self.phase {
            Phase::Flipping(flip) => {
                let progress = flip.rotation_completed(state, win, shader);
                (progress, flip.is_finished())
            }
            _ => return,
        };

        match progress {
            Some(FlipProgress::OutMidpoint) => self.activate_app_flip(state),
            Some(FlipProgress::InMidpoint) => {
                if let Some(button) = self.button.as_mut() {
                    button.dimmed = false;
                }
                self.push_button(state);
            }
            Some(FlipProgress::InCompleted) => self.restore_button_state(state),
            Some(FlipProgress::OutCompleted) | None => {}
        }

        if finished {
            self.phase = Phase::Idle;
        }
    }

    /// Abort a flip in flight, leaving both windows at rest. Returns whether one was running.
    pub fn kill_effects(&mut self, state: &mut State<H>) -> bool {
        let Phase::Flipping(flip) = &mut self.phase else {
            return false;
        };
        flip.kill_effects(state);
        self.phase = Phase::Idle;

        if let Some(front) = self.current().filter(|h| state.is_alive(*h)) {
            self.set_effect(state, front, false);
            if let Some(back) = self.other(front).filter(|h| state.is_alive(*h)) {
                self.set_effect(state, back, !state.overview_visible);
            }
        }
        self.restore_button_state(state);
        true
    }

    /// Returns false when `request` was not made by this session.
    pub fn action_completed(&mut self, request: RequestId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(id, _)| *id != request);
        self.pending.len() != before
    }

    /// Undo the effects of a request that failed. Returns false when `request` was not made by
    /// this session.
    pub fn action_failed(&mut self, state: &mut State<H>, request: RequestId, reason: &str) -> bool {
        let Some(index) = self.pending.iter().position(|(id, _)| *id == request) else {
            return false;
        };
        let (_, action) = self.pending.remove(index);
        tracing::warn!(
            "Session {:?}: {:?} request failed: {}",
            self.id,
            action,
            reason
        );
        if action == PendingAction::FlipBack {
            self.app_removed_by_flip_back = false;
        }
        self.restore_button_state(state);
        true
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingAction> {
        self.pending.iter().map(|(_, action)| action)
    }
}
