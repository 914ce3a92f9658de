use super::traits::{CurrentPlayback, RemoteTrack, RepeatMode};
use serde::{Deserialize, Serialize};

/// Name and artist line of a track, used for the queue preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub name: String,
    pub artist: String,
}

impl TrackRef {
    /// "Name - Artist A, Artist B"
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.artist)
    }
}

impl From<&RemoteTrack> for TrackRef {
    fn from(track: &RemoteTrack) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist_line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentItem {
    pub name: String,
    pub artist: String,
    pub uri: String,
}

impl RecentItem {
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.artist)
    }
}

impl From<&RemoteTrack> for RecentItem {
    fn from(track: &RemoteTrack) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist_line(),
            uri: track.uri.clone(),
        }
    }
}

/// Point-in-time view of remote playback. Replaced wholesale on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub track_name: String,
    pub artist_name: String,
    pub album_art_url: Option<String>,
    pub progress_ms: u64,
    pub duration_ms: u64,
    pub shuffle_on: bool,
    pub repeat_mode: RepeatMode,
    pub next_in_queue: Option<TrackRef>,
    pub recently_played: Vec<RecentItem>,
}

impl PlaybackSnapshot {
    /// Nothing is playing. Shuffle/repeat still reflect the session if there is one.
    pub fn idle(playback: Option<&CurrentPlayback>, recently_played: Vec<RecentItem>) -> Self {
        Self {
            shuffle_on: playback.map(|p| p.shuffle_state).unwrap_or(false),
            repeat_mode: playback
                .map(|p| RepeatMode::from_api(&p.repeat_state))
                .unwrap_or_default(),
            recently_played,
            ..Self::default()
        }
    }

    /// Build from a playing session. Progress is clamped to the duration.
    pub fn playing(
        playback: &CurrentPlayback,
        track: &RemoteTrack,
        next_in_queue: Option<TrackRef>,
        recently_played: Vec<RecentItem>,
    ) -> Self {
        let duration_ms = track.duration_ms;
        Self {
            is_playing: true,
            track_name: track.name.clone(),
            artist_name: track.artist_line(),
            album_art_url: track.album_images.first().cloned(),
            progress_ms: playback.progress_ms.unwrap_or(0).min(duration_ms),
            duration_ms,
            shuffle_on: playback.shuffle_state,
            repeat_mode: RepeatMode::from_api(&playback.repeat_state),
            next_in_queue,
            recently_played,
        }
    }

    pub fn total_label(&self) -> String {
        format_time(self.duration_ms)
    }
}

/// `M:SS`. Minutes wrap at the hour like the Spotify client's short form.
pub fn format_time(ms: u64) -> String {
    let seconds = (ms / 1000) % 60;
    let minutes = (ms / 60_000) % 60;
    format!("{}:{:02}", minutes, seconds)
}
