//! Env parsing and defaults.

use std::path::PathBuf;

const SEED_ENV: &str = "PORTFOLIO_SEED";
const PARTICLES_ENV: &str = "PORTFOLIO_PARTICLES";
const STARS_ENV: &str = "PORTFOLIO_STARS";
const CONTENT_ENV: &str = "PORTFOLIO_CONTENT";
const INTERACTIVE_CAMERA_ENV: &str = "PORTFOLIO_INTERACTIVE_CAMERA";

pub const DEFAULT_PARTICLES: usize = 20;
pub const DEFAULT_STARS: usize = 90;

#[derive(Clone, Debug, PartialEq)]
pub struct PortfolioConfig {
    /// Fixed seed for every random layout; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub particle_count: usize,
    pub star_count: usize,
    pub content_path: Option<PathBuf>,
    pub interactive_camera: bool,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            seed: None,
            particle_count: DEFAULT_PARTICLES,
            star_count: DEFAULT_STARS,
            content_path: None,
            interactive_camera: false,
        }
    }
}

/// Reads the configuration from the environment. Invalid values are reported
/// and replaced by their defaults.
pub fn portfolio_config() -> PortfolioConfig {
    let defaults = PortfolioConfig::default();
    PortfolioConfig {
        seed: parse_env(SEED_ENV),
        particle_count: parse_env(PARTICLES_ENV).unwrap_or(defaults.particle_count),
        star_count: parse_env(STARS_ENV).unwrap_or(defaults.star_count),
        content_path: std::env::var_os(CONTENT_ENV)
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from),
        interactive_camera: std::env::var(INTERACTIVE_CAMERA_ENV)
            .map(|raw| matches!(raw.trim(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.interactive_camera),
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("orrery: invalid value in {key}: {raw:?}, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    struct EnvGuard {
        snapshot: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let snapshot = keys
                .iter()
                .map(|&key| (key, std::env::var(key).ok()))
                .collect();
            for key in keys {
                std::env::remove_var(key);
            }
            Self { snapshot }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.snapshot {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    const ENV_KEYS: [&str; 5] = [
        SEED_ENV,
        PARTICLES_ENV,
        STARS_ENV,
        CONTENT_ENV,
        INTERACTIVE_CAMERA_ENV,
    ];

    #[test]
    fn defaults_when_nothing_is_set() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        assert_eq!(portfolio_config(), PortfolioConfig::default());
    }

    #[test]
    fn values_are_read_from_env() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(SEED_ENV, "42");
        std::env::set_var(PARTICLES_ENV, "150");
        std::env::set_var(STARS_ENV, " 80 ");
        std::env::set_var(CONTENT_ENV, "/tmp/content.json");
        std::env::set_var(INTERACTIVE_CAMERA_ENV, "true");

        let config = portfolio_config();

        assert_eq!(config.seed, Some(42));
        // Clamping happens in the generator, not here.
        assert_eq!(config.particle_count, 150);
        assert_eq!(config.star_count, 80);
        assert_eq!(config.content_path, Some(PathBuf::from("/tmp/content.json")));
        assert!(config.interactive_camera);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);

        std::env::set_var(SEED_ENV, "not-a-seed");
        std::env::set_var(PARTICLES_ENV, "-3");
        std::env::set_var(INTERACTIVE_CAMERA_ENV, "nope");

        let config = portfolio_config();

        assert_eq!(config.seed, None);
        assert_eq!(config.particle_count, DEFAULT_PARTICLES);
        assert!(!config.interactive_camera);
    }
}
