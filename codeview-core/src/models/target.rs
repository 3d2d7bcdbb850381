use serde::{Deserialize, Serialize};

/// The app window a toolbox window wants to be paired with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToolboxTarget {
    pub app_id: String,
    pub window_id: String,
}

impl ToolboxTarget {
    pub fn new(app_id: impl Into<String>, window_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            window_id: window_id.into(),
        }
    }

    pub fn matches(&self, app_id: &str, window_id: &str) -> bool {
        self.app_id == app_id && self.window_id == window_id
    }
}
