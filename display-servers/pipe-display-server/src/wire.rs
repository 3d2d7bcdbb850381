use crate::PipeWindowHandle;
use codeview_core::{DisplayAction, DisplayEvent};

/// Parse one line sent by the shell. Blank lines are not events.
///
/// # Errors
///
/// Will error if the line is not a JSON encoded event.
pub fn parse_event(line: &str) -> serde_json::Result<Option<DisplayEvent<PipeWindowHandle>>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Encode an action as one line, without the line break.
///
/// # Errors
///
/// Will error if the action cannot be serialized.
pub fn encode_action(act: &DisplayAction<PipeWindowHandle>) -> serde_json::Result<String> {
    serde_json::to_string(act)
}
