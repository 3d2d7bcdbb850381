//! Window Information
use std::fmt::Debug;

use crate::models::Margins;
use crate::models::ToolboxTarget;
use crate::models::Xyhw;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A trait which backend specific window handles need to implement
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Default + Send + 'static
{
}

/// A Backend-agnostic handle to a window used to identify it
///
/// # Serde
///
/// Using generics here with serde derive macros causes some wierd behaviour with the compiler, so
/// as suggested by [this `serde` issue][serde-issue], just adding `#[serde(bound = "")]`
/// everywhere the generic is declared fixes the bug.
///
/// [serde-issue]: https://github.com/serde-rs/serde/issues/1296
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes
pub type MockHandle = i32;
impl Handle for MockHandle {}

/// What the desktop entry of the owning application says about it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DesktopInfo {
    /// Desktop file id, including the `.desktop` suffix.
    pub id: String,
    /// `X-Endless-Hackable`, when the key is present.
    pub hackable: Option<bool>,
    /// `X-Endless-HackShader`, when the key is present.
    pub shader: Option<String>,
    pub no_display: bool,
}

impl DesktopInfo {
    pub fn should_show(&self) -> bool {
        !self.no_display
    }

    /// The desktop id without its `.desktop` suffix.
    pub fn app_id(&self) -> &str {
        self.id.strip_suffix(".desktop").unwrap_or(&self.id)
    }
}

/// Mirror of a compositor surface.
///
/// The compositor owns the surface. This record only tracks what we have been told and what we
/// have asked for, so it can disappear at any event boundary.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, bound = "")]
pub struct Window<H: Handle> {
    pub handle: WindowHandle<H>,
    pub title: Option<String>,
    pub desktop: Option<DesktopInfo>,
    pub gtk_application_id: Option<String>,
    pub gtk_application_object_path: Option<String>,
    pub gtk_window_object_path: Option<String>,
    pub stable_sequence: u32,
    /// Present on toolbox windows only.
    pub toolbox_target: Option<ToolboxTarget>,
    /// Actions exported by the window's application on its own action group.
    pub actions: Vec<String>,
    pub frame: Xyhw,
    pub frame_extents: Margins,
    /// Minimum client size, as hinted by the client.
    pub min_size: (i32, i32),
    pub maximized: bool,
    pub minimized: bool,
    visible: bool,
    pub opacity: u8,
    pub rotation: f32,
    #[serde(skip)]
    easing_to: Option<f32>,
    pub pivot: (f32, f32),
    pub first_frame_drawn: bool,
    pub effect_enabled: Option<bool>,
    /// Set on the back face of a pair so switchers can skip it.
    pub inactive: bool,
}

impl<H: Handle> Default for Window<H> {
    fn default() -> Self {
        Self::new(WindowHandle(H::default()))
    }
}

impl<H: Handle> Window<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>) -> Self {
        Self {
            handle,
            title: None,
            desktop: None,
            gtk_application_id: None,
            gtk_application_object_path: None,
            gtk_window_object_path: None,
            stable_sequence: 0,
            toolbox_target: None,
            actions: vec![],
            frame: Xyhw::default(),
            frame_extents: Margins::default(),
            min_size: (0, 0),
            maximized: false,
            minimized: false,
            visible: true,
            opacity: 255,
            rotation: 0.0,
            easing_to: None,
            pivot: (0.0, 0.0),
            first_frame_drawn: false,
            effect_enabled: None,
            inactive: false,
        }
    }

    /// The id used to pair windows: the GTK application id when the client exports one,
    /// otherwise the desktop id.
    pub fn app_id(&self) -> Option<String> {
        if let Some(id) = &self.gtk_application_id {
            return Some(id.clone());
        }
        self.desktop.as_ref().map(|d| d.app_id().to_owned())
    }

    pub fn window_id(&self) -> String {
        match &self.gtk_window_object_path {
            Some(path) => path.clone(),
            None => format!("window:{}", self.stable_sequence),
        }
    }

    pub fn is_toolbox(&self) -> bool {
        self.toolbox_target.is_some()
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.iter().any(|a| a == name)
    }

    pub fn set_visible(&mut self, value: bool) {
        self.visible = value;
    }

    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Whether the front face of the window can be seen: mapped, opaque, and not turned away.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.visible && self.opacity > 0 && self.rotation.abs() < 90.0
    }

    /// Minimum size in frame coordinates.
    #[must_use]
    pub fn min_frame_size(&self) -> (i32, i32) {
        self.frame_extents
            .client_to_frame(self.min_size.0, self.min_size.1)
    }

    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation = angle;
        self.easing_to = None;
    }

    pub fn ease_rotation(&mut self, angle: f32) {
        self.easing_to = Some(angle);
    }

    /// Settle a running rotation tween at its target.
    pub fn finish_rotation(&mut self) -> Option<f32> {
        let angle = self.easing_to.take()?;
        self.rotation = angle;
        Some(angle)
    }

    pub const fn easing_to(&self) -> Option<f32> {
        self.easing_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_prefers_the_gtk_id() {
        let mut subject = Window::new(WindowHandle::<MockHandle>(1));
        subject.desktop = Some(DesktopInfo {
            id: "org.example.Foo.desktop".to_owned(),
            ..DesktopInfo::default()
        });
        assert_eq!(subject.app_id().as_deref(), Some("org.example.Foo"));
        subject.gtk_application_id = Some("org.example.Bar".to_owned());
        assert_eq!(subject.app_id().as_deref(), Some("org.example.Bar"));
    }

    #[test]
    fn window_id_falls_back_to_the_stable_sequence() {
        let mut subject = Window::new(WindowHandle::<MockHandle>(1));
        subject.stable_sequence = 42;
        assert_eq!(subject.window_id(), "window:42");
        subject.gtk_window_object_path = Some("/org/example/Foo/window/1".to_owned());
        assert_eq!(subject.window_id(), "/org/example/Foo/window/1");
    }

    #[test]
    fn a_window_turned_past_ninety_degrees_is_not_shown() {
        let mut subject = Window::new(WindowHandle::<MockHandle>(1));
        assert!(subject.is_shown());
        subject.set_rotation(180.0);
        assert!(!subject.is_shown());
    }

    #[test]
    fn min_size_is_measured_on_the_frame() {
        let mut subject = Window::new(WindowHandle::<MockHandle>(1));
        subject.min_size = (300, 200);
        subject.frame_extents = Margins::new_from_pair(20, 5);
        assert_eq!(subject.min_frame_size(), (310, 240));
    }
}
