use crate::models::Shader;

/// What the coordinator needs from the user's configuration.
pub trait Config {
    /// Initial value of the global hack-mode switch. Later changes arrive as events.
    fn hack_mode_enabled(&self) -> bool;

    /// Whether the companion application that ships the toolbox is installed. Nothing is
    /// paired without it.
    fn companion_installed(&self) -> bool;

    /// Apps on the block list are never paired.
    fn is_blocked(&self, app_id: &str) -> bool;

    /// An empty allow list allows every app.
    fn is_allowed(&self, app_id: &str) -> bool;

    fn flip_duration_ms(&self) -> u64;

    fn grab_settle_ms(&self) -> u64;

    /// Effect used for apps whose desktop entry does not pick one.
    fn default_shader(&self) -> Option<Shader>;
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
pub struct TestConfig {
    pub hack_mode_enabled: bool,
    pub companion_installed: bool,
    pub block_list: Vec<String>,
    pub allow_list: Vec<String>,
}

#[cfg(test)]
impl Default for TestConfig {
    fn default() -> Self {
        Self {
            hack_mode_enabled: true,
            companion_installed: true,
            block_list: vec![],
            allow_list: vec![],
        }
    }
}

#[cfg(test)]
impl Config for TestConfig {
    fn hack_mode_enabled(&self) -> bool {
        self.hack_mode_enabled
    }
    fn companion_installed(&self) -> bool {
        self.companion_installed
    }
    fn is_blocked(&self, app_id: &str) -> bool {
        self.block_list.iter().any(|id| id == app_id)
    }
    fn is_allowed(&self, app_id: &str) -> bool {
        self.allow_list.is_empty() || self.allow_list.iter().any(|id| id == app_id)
    }
    fn flip_duration_ms(&self) -> u64 {
        500
    }
    fn grab_settle_ms(&self) -> u64 {
        500
    }
    fn default_shader(&self) -> Option<Shader> {
        Some(Shader::Desaturate)
    }
}
