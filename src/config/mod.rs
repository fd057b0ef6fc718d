//! Configuration module
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load settings from the first file found, falling back to defaults.
///
/// `PROSPECTS_SETTINGS_PATH` wins over the default search locations. Environment
/// overrides are merged in every case.
pub fn load() -> Result<Settings> {
    if let Ok(path) = std::env::var("PROSPECTS_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return load_from(&path);
        }
    }

    for path in default_paths() {
        if path.exists() {
            return load_from(&path);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

fn load_from(path: &Path) -> Result<Settings> {
    info!("Loading settings from: {}", path.display());
    let mut settings = Settings::from_file(path)?;
    settings.merge_env();
    Ok(settings)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/prospects/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("prospects-rs/settings.yml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    const VARS: [&str; 6] = [
        "PROSPECTS_SETTINGS_PATH",
        "PROSPECTS_DEBUG",
        "PROSPECTS_PORT",
        "PROSPECTS_BIND_ADDRESS",
        "PROSPECTS_API_URL",
        "PROSPECTS_API_TOKEN",
    ];

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Holds the env lock and clears the PROSPECTS_* variables on both ends
    struct CleanEnv {
        _guard: MutexGuard<'static, ()>,
    }

    impl CleanEnv {
        fn acquire() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            for var in VARS {
                std::env::remove_var(var);
            }
            CleanEnv { _guard: guard }
        }
    }

    impl Drop for CleanEnv {
        fn drop(&mut self) {
            for var in VARS {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_env_overrides() {
        let _env = CleanEnv::acquire();
        std::env::set_var("PROSPECTS_DEBUG", "true");
        std::env::set_var("PROSPECTS_PORT", "9090");
        std::env::set_var("PROSPECTS_BIND_ADDRESS", "0.0.0.0");
        std::env::set_var("PROSPECTS_API_URL", "https://erp.example.com/");
        std::env::set_var("PROSPECTS_API_TOKEN", "tok-1");

        let mut settings = Settings::default();
        settings.merge_env();

        assert!(settings.general.debug);
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
        assert_eq!(settings.api.base_url, "https://erp.example.com/");
        assert_eq!(settings.api.token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_unparsable_env_values() {
        let _env = CleanEnv::acquire();
        std::env::set_var("PROSPECTS_PORT", "not-a-port");
        std::env::set_var("PROSPECTS_DEBUG", "garbage");

        let mut settings = Settings::default();
        settings.general.debug = true;
        settings.merge_env();

        assert_eq!(settings.server.port, 8080);
        assert!(!settings.general.debug);
    }

    #[test]
    fn test_settings_path_wins() {
        let _env = CleanEnv::acquire();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9191\napi:\n  base_url: http://erp.test/\n  token: from-file"
        )
        .unwrap();
        std::env::set_var("PROSPECTS_SETTINGS_PATH", file.path());
        std::env::set_var("PROSPECTS_API_TOKEN", "from-env");

        let settings = load().unwrap();

        assert_eq!(settings.server.port, 9191);
        assert_eq!(settings.api.base_url, "http://erp.test/");
        assert_eq!(settings.api.token.as_deref(), Some("from-env"));
        assert_eq!(settings.ui.page_size, crate::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_missing_settings_path_still_merges_env() {
        let _env = CleanEnv::acquire();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("PROSPECTS_SETTINGS_PATH", dir.path().join("absent.yml"));
        std::env::set_var("PROSPECTS_PORT", "7000");

        let settings = load().unwrap();

        assert_eq!(settings.server.port, 7000);
    }

    #[test]
    fn test_default_paths_order() {
        let paths = default_paths();
        assert_eq!(paths[0], PathBuf::from("settings.yml"));
        assert_eq!(paths[1], PathBuf::from("config/settings.yml"));
        assert_eq!(paths[2], PathBuf::from("/etc/prospects/settings.yml"));
    }
}
