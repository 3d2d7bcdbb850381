//! Asks other processes (the toolbox application, or the app itself) to run one of their
//! exported actions.
//!
//! Requests leave through [`DisplayAction::InvokeAction`](crate::DisplayAction) and the outcome
//! comes back as `ActionCompleted` or `ActionFailed`, tagged with the [`RequestId`].
use crate::models::{Handle, Window};
use serde::{Deserialize, Serialize};

const TOOLBOX_NAME: &str = "HackToolbox";
const LEGACY_PREFIX: &str = "com.endlessm";
const PREFIX: &str = "com.hack_computer";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// The parameter passed along with an action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ActionParameter {
    None,
    Bool(bool),
    /// `(targetAppId, targetWindowId)`
    Target(String, String),
}

/// An exported action group, addressed by bus name and object path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionGroup {
    pub bus_name: String,
    pub object_path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub id: RequestId,
    pub group: ActionGroup,
    pub action: String,
    pub parameter: ActionParameter,
}

impl ActionGroup {
    /// The toolbox application responsible for `app_id`.
    pub fn toolbox_app(app_id: &str) -> Self {
        let bus_name = toolbox_id(app_id);
        Self {
            object_path: object_path(&bus_name),
            bus_name,
        }
    }

    /// The group a toolbox window exports for itself.
    pub fn for_window<H: Handle>(window: &Window<H>) -> Option<Self> {
        Some(Self {
            bus_name: window.gtk_application_id.clone()?,
            object_path: window.gtk_window_object_path.clone()?,
        })
    }

    /// The group an application exports.
    pub fn for_app<H: Handle>(window: &Window<H>) -> Option<Self> {
        Some(Self {
            bus_name: window.gtk_application_id.clone()?,
            object_path: window.gtk_application_object_path.clone()?,
        })
    }
}

/// Reverse-DNS id of the toolbox application. Apps from the old namespace get the old toolbox.
pub fn toolbox_id(app_id: &str) -> String {
    let prefix = if app_id.starts_with("com.endlessm.") {
        LEGACY_PREFIX
    } else {
        PREFIX
    };
    format!("{prefix}.{TOOLBOX_NAME}")
}

/// Object path for a reverse-DNS id: `org.foo.Bar` becomes `/org/foo/Bar`.
pub fn object_path(id: &str) -> String {
    format!("/{}", id.replace('.', "/"))
}

/// Interface of the out-of-process `Hackable` property for an app.
pub fn hackable_interface(app_id: &str) -> &'static str {
    if app_id.starts_with("com.endlessm.") {
        "com.endlessm.Hackable"
    } else {
        "com.hack_computer.Hackable"
    }
}
