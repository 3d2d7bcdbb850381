//! What the state socket publishes about the running sessions.
use super::{Handle, Session, Side};
use crate::state::State;
use serde::{Deserialize, Serialize};

#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub id: u32,
    pub app_id: Option<String>,
    /// Title of the app window, if there is one right now.
    pub app_title: Option<String>,
    pub has_app: bool,
    pub has_toolbox: bool,
    pub side: Side,
    pub flipping: bool,
    pub grabbed: bool,
    pub button_visible: bool,
    pub button_highlighted: bool,
    pub toolbox_visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionsState {
    pub hack_mode_enabled: bool,
    pub sessions: Vec<SessionState>,
}

impl<H: Handle> From<(&[Session<H>], &State<H>)> for SessionsState {
    fn from((sessions, state): (&[Session<H>], &State<H>)) -> Self {
        let sessions = sessions
            .iter()
            .map(|s| SessionState {
                id: s.id.0,
                app_id: s.app_id().map(ToOwned::to_owned),
                app_title: s
                    .app
                    .and_then(|h| state.window(h))
                    .and_then(|w| w.title.clone()),
                has_app: s.app.is_some(),
                has_toolbox: s.toolbox.is_some(),
                side: s.side(),
                flipping: s.is_flipping(),
                grabbed: s.is_grabbed(),
                button_visible: s.button.as_ref().map_or(false, |b| b.visible),
                button_highlighted: s.button.as_ref().map_or(false, |b| b.highlighted),
                toolbox_visible: s
                    .toolbox
                    .and_then(|h| state.window(h))
                    .map_or(false, |w| w.visible()),
            })
            .collect();
        Self {
            hack_mode_enabled: state.hack_mode_enabled,
            sessions,
        }
    }
}

impl SessionState {
    /// One line for a status bar: the app and the face it shows.
    pub fn summary(&self) -> String {
        let name = self
            .app_title
            .as_deref()
            .or(self.app_id.as_deref())
            .unwrap_or("?");
        let face = match self.side {
            Side::App => "app",
            Side::Toolbox => "toolbox",
        };
        if self.flipping {
            format!("{name} -> {face}")
        } else {
            format!("{name} [{face}]")
        }
    }
}
