use super::{Config, FlipToHack};

impl Default for Config {
    fn default() -> Self {
        Self {
            hack_mode_enabled: true,
            flip_duration_ms: 500,
            grab_settle_ms: 500,
            default_shader: "desaturate".to_owned(),
            companion_app_ids: vec![
                "com.hack_computer.Clubhouse".to_owned(),
                "com.endlessm.HackComponents".to_owned(),
            ],
            flatpak_installations: vec![
                "~/.local/share/flatpak".to_owned(),
                "/var/lib/flatpak".to_owned(),
            ],
            log_level: "info".to_owned(),
            flip_to_hack: FlipToHack::default(),
            companion_found: false,
        }
    }
}
