use crate::app::keys::KeyConfig;
use crate::player::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};

pub const MIN_POLL_INTERVAL_MS: u64 = 250;
pub const MAX_RECENT_LIMIT: usize = 10;

/// User-editable configuration (read-only after load)
/// stored in `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Bearer token for the Web API. `SPOTIFY_ACCESS_TOKEN` and `--token` win over this.
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Widget width in pixels, 300..=800
    #[serde(default = "default_ui_scale")]
    pub ui_scale: u16,
    #[serde(default = "default_volume")]
    pub initial_volume: u8,
    #[serde(default = "default_true")]
    pub icons_enabled: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub keys: KeyConfig,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_recent_limit() -> usize {
    10
}

fn default_ui_scale() -> u16 {
    450
}

fn default_volume() -> u8 {
    50
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_base_url: default_api_base(),
            poll_interval_ms: default_poll_interval(),
            recent_limit: default_recent_limit(),
            ui_scale: default_ui_scale(),
            initial_volume: default_volume(),
            icons_enabled: true,
            log_level: default_log_level(),
            keys: KeyConfig::default(),
        }
    }
}

impl UserConfig {
    /// Pull out-of-range values back into bounds.
    pub fn normalized(mut self) -> Self {
        self.poll_interval_ms = self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        self.recent_limit = self.recent_limit.clamp(1, MAX_RECENT_LIMIT);
        self.initial_volume = self.initial_volume.min(100);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: UserConfig = toml::from_str("access_token = \"abc\"\npoll_interval_ms = 2000\n").unwrap();
        assert_eq!(cfg.access_token, "abc");
        assert_eq!(cfg.poll_interval_ms, 2000);
        assert_eq!(cfg.recent_limit, 10);
        assert_eq!(cfg.ui_scale, 450);
        assert!(cfg.icons_enabled);
        assert_eq!(cfg.keys.play_pause, "Space");
    }

    #[test]
    fn test_normalized_clamps() {
        let cfg = UserConfig {
            poll_interval_ms: 10,
            recent_limit: 500,
            initial_volume: 250,
            ..UserConfig::default()
        }
        .normalized();
        assert_eq!(cfg.poll_interval_ms, MIN_POLL_INTERVAL_MS);
        assert_eq!(cfg.recent_limit, MAX_RECENT_LIMIT);
        assert_eq!(cfg.initial_volume, 100);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&UserConfig::default()).unwrap();
        let back: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, UserConfig::default());
    }
}
