use super::error::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    #[default]
    Off,
    Context,
    Track,
}

impl RepeatMode {
    /// Map the remote `repeat_state` string. Unknown values count as `Track`.
    pub fn from_api(state: &str) -> Self {
        match state {
            "off" => Self::Off,
            "context" => Self::Context,
            _ => Self::Track,
        }
    }

    pub fn as_api(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Context => "context",
            Self::Track => "track",
        }
    }

    /// Off -> Context -> Track -> Off
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::Context,
            Self::Context => Self::Track,
            Self::Track => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Context => "Context",
            Self::Track => "Track",
        }
    }
}

/// A track as the remote service describes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteTrack {
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub artists: Vec<String>,
    /// Album image URLs, largest first
    pub album_images: Vec<String>,
}

impl RemoteTrack {
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

/// Raw "current playback" payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrentPlayback {
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub shuffle_state: bool,
    pub repeat_state: String,
    /// `None` for episodes and ads
    pub item: Option<RemoteTrack>,
}

/// Everything the widget needs from the streaming service.
///
/// Calls are blocking; callers run them on the blocking pool. Token
/// handling is the implementor's business.
pub trait SpotifyApi: Send + Sync {
    /// `Ok(None)` when there is no active session.
    fn current_playback(&self) -> Result<Option<CurrentPlayback>, ApiError>;
    /// Upcoming items, not including the current track.
    fn queue(&self) -> Result<Vec<RemoteTrack>, ApiError>;
    /// Most recent first.
    fn recently_played(&self, limit: usize) -> Result<Vec<RemoteTrack>, ApiError>;

    fn pause(&self) -> Result<(), ApiError>;
    fn resume(&self) -> Result<(), ApiError>;
    fn next(&self) -> Result<(), ApiError>;
    fn prev(&self) -> Result<(), ApiError>;
    fn set_shuffle(&self, enable: bool) -> Result<(), ApiError>;
    fn set_repeat(&self, mode: RepeatMode) -> Result<(), ApiError>;
    fn set_volume(&self, volume: u8) -> Result<(), ApiError>;
    fn start_playback(&self, uris: &[String]) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_mapping() {
        assert_eq!(RepeatMode::from_api("off"), RepeatMode::Off);
        assert_eq!(RepeatMode::from_api("context"), RepeatMode::Context);
        assert_eq!(RepeatMode::from_api("track"), RepeatMode::Track);
        // Anything unexpected falls through to Track
        assert_eq!(RepeatMode::from_api("playlist"), RepeatMode::Track);
    }

    #[test]
    fn test_repeat_cycle_wraps() {
        let mut mode = RepeatMode::Off;
        mode = mode.next();
        assert_eq!(mode, RepeatMode::Context);
        mode = mode.next();
        assert_eq!(mode, RepeatMode::Track);
        mode = mode.next();
        assert_eq!(mode, RepeatMode::Off);
        assert_eq!(RepeatMode::Context.as_api(), "context");
    }

    #[test]
    fn test_artist_line_joins_names() {
        let track = RemoteTrack {
            artists: vec!["Daft Punk".into(), "Pharrell Williams".into()],
            ..Default::default()
        };
        assert_eq!(track.artist_line(), "Daft Punk, Pharrell Williams");
    }
}
