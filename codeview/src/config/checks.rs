use super::Config;
use codeview_core::models::Shader;
use tracing_subscriber::EnvFilter;

impl Config {
    /// Run every check, printing what is wrong. Returns true when nothing is.
    pub fn check_all(&self, verbose: bool) -> bool {
        let checks = [
            self.check_log_level(verbose),
            self.check_durations(verbose),
            self.check_shader(verbose),
            self.check_flip_lists(verbose),
            self.check_companion(verbose),
        ];
        checks.iter().all(|ok| *ok)
    }

    pub fn check_log_level(&self, verbose: bool) -> bool {
        if verbose {
            println!("Trying to parse log_level.");
        }
        match EnvFilter::builder().parse(&self.log_level) {
            Ok(_) => {
                if verbose {
                    println!("Log level is ok.");
                }
                true
            }
            Err(err) => {
                println!("Log level is invalid: {err}");
                false
            }
        }
    }

    pub fn check_durations(&self, verbose: bool) -> bool {
        if verbose {
            println!(
                "Flip legs last {} ms, grabs settle after {} ms.",
                self.flip_duration_ms, self.grab_settle_ms
            );
        }
        if self.flip_duration_ms == 0 {
            println!("flip_duration_ms is 0, flips would not be visible.");
            return false;
        }
        true
    }

    pub fn check_shader(&self, verbose: bool) -> bool {
        if self.default_shader == "none" || self.default_shader.parse::<Shader>().is_ok() {
            if verbose {
                println!("Default shader `{}` is ok.", self.default_shader);
            }
            return true;
        }
        println!(
            "Default shader `{}` is unknown, use `desaturate`, `fizzics` or `none`.",
            self.default_shader
        );
        false
    }

    /// An app on both lists is blocked.
    pub fn check_flip_lists(&self, verbose: bool) -> bool {
        let lists = &self.flip_to_hack;
        let conflicts: Vec<&String> = lists
            .allow_list
            .iter()
            .filter(|id| lists.block_list.contains(id))
            .collect();
        for id in &conflicts {
            println!("`{id}` is both allowed and blocked, it will be blocked.");
        }
        if verbose {
            println!(
                "{} blocked and {} allowed apps.",
                lists.block_list.len(),
                lists.allow_list.len()
            );
        }
        conflicts.is_empty()
    }

    pub fn check_companion(&self, verbose: bool) -> bool {
        match self.find_companion() {
            Some(path) => {
                if verbose {
                    println!("Companion app found at {}.", path.display());
                }
                true
            }
            None => {
                println!(
                    "None of {:?} is installed in {:?}, no windows will be paired.",
                    self.companion_app_ids, self.flatpak_installations
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_values_are_reported() {
        let mut config = Config::default();
        assert!(config.check_log_level(false));
        assert!(config.check_shader(false));
        assert!(config.check_durations(false));

        config.log_level = "codeview=loud".to_owned();
        config.default_shader = "sepia".to_owned();
        config.flip_duration_ms = 0;
        assert!(!config.check_log_level(false));
        assert!(!config.check_shader(false));
        assert!(!config.check_durations(false));
    }

    #[test]
    fn an_app_on_both_lists_is_a_conflict() {
        let mut config = Config::default();
        assert!(config.check_flip_lists(false));
        config.flip_to_hack.block_list = vec!["org.example.Game".to_owned()];
        config.flip_to_hack.allow_list = vec!["org.example.Game".to_owned()];
        assert!(!config.check_flip_lists(false));
    }
}
