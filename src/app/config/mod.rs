use std::fs;
use std::path::{Path, PathBuf};

pub mod user;

pub use user::UserConfig;

use crate::app::cli::Args;

pub const TOKEN_ENV: &str = "SPOTIFY_ACCESS_TOKEN";

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spotimini")
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_log_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spotimini")
            .join("logs")
    }

    /// Load `config.toml`, writing a default one if missing.
    pub fn load() -> UserConfig {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> UserConfig {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                    eprintln!("Ignoring malformed {}: {}", path.display(), e);
                    UserConfig::default()
                }),
                Err(_) => UserConfig::default(),
            }
        } else {
            let c = UserConfig::default();
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(content) = toml::to_string_pretty(&c) {
                let _ = fs::write(path, content);
            }
            c
        }
    }

    /// Layer environment and CLI over the file. CLI wins.
    pub fn resolve(mut config: UserConfig, env_token: Option<String>, args: &Args) -> UserConfig {
        if let Some(token) = env_token.filter(|t| !t.is_empty()) {
            config.access_token = token;
        }
        if let Some(token) = args.token.clone() {
            config.access_token = token;
        }
        if let Some(ms) = args.poll_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(scale) = args.scale {
            config.ui_scale = scale;
        }
        if args.no_icons {
            config.icons_enabled = false;
        }
        config.normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = AppConfig::load_from(&path);
        assert_eq!(cfg, UserConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "poll_interval_ms = \"soon\"").unwrap();
        assert_eq!(AppConfig::load_from(&path), UserConfig::default());
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let file = UserConfig {
            access_token: "from-file".into(),
            ..UserConfig::default()
        };

        let args = Args::parse_from(["spotimini"]);
        let cfg = AppConfig::resolve(file.clone(), Some("from-env".into()), &args);
        assert_eq!(cfg.access_token, "from-env");

        let args = Args::parse_from(["spotimini", "--token", "from-cli", "--poll-ms", "100", "--no-icons"]);
        let cfg = AppConfig::resolve(file, Some("from-env".into()), &args);
        assert_eq!(cfg.access_token, "from-cli");
        assert_eq!(cfg.poll_interval_ms, user::MIN_POLL_INTERVAL_MS);
        assert!(!cfg.icons_enabled);
    }
}
