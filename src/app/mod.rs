pub mod cli;
pub mod config;
pub mod events;
pub mod inputs;
pub mod keys;
pub mod state;
pub mod tasks;

pub use state::*;

use crate::player::{CommandError, Dispatched, Intent, PollError, PollOutcome, RecentItem};
use crate::ui::theme::Theme;
use config::UserConfig;
use image::DynamicImage;
use keys::KeyConfig;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

const TOAST_DURATION: Duration = Duration::from_millis(2000);
pub const VOLUME_STEP: u8 = 5;

pub struct App {
    pub is_running: bool,
    pub playback: PlaybackView,
    pub artwork: ArtworkState,
    /// URL the current `artwork` belongs to (or is loading)
    pub artwork_url: Option<String>,
    pub logo: Option<DynamicImage>,
    /// Cursor into the snapshot's recently played list
    pub recent_selected: usize,
    pub volume: u8,
    pub scale: UiScale,
    pub toast: Option<Toast>,
    pub theme: Theme,
    pub keys: KeyConfig,
}

impl App {
    pub fn new(config: &UserConfig) -> Self {
        Self {
            is_running: true,
            playback: PlaybackView::default(),
            artwork: ArtworkState::Idle,
            artwork_url: None,
            logo: None,
            recent_selected: 0,
            volume: config.initial_volume.min(100),
            scale: UiScale::new(config.ui_scale),
            toast: None,
            theme: Theme::default(),
            keys: config.keys.clone(),
        }
    }

    /// Apply a poll result. Returns an album art URL that needs fetching.
    pub fn apply_poll(&mut self, outcome: PollOutcome) -> Option<String> {
        let seq = outcome.seq;
        match self.playback.apply(outcome) {
            Applied::Updated => {
                self.clamp_selection();
                self.art_to_fetch()
            }
            Applied::Failed => {
                if let Some(e) = self.playback.error() {
                    if e.is_auth() {
                        error!("Poll {} rejected by the service: {}", seq, e);
                    }
                }
                None
            }
            Applied::Stale => {
                debug!("Dropping stale poll {}", seq);
                None
            }
        }
    }

    fn art_to_fetch(&mut self) -> Option<String> {
        let Some(url) = self.playback.snapshot().album_art_url.clone() else {
            self.artwork_url = None;
            self.artwork = ArtworkState::Idle;
            return None;
        };
        if self.artwork_url.as_deref() == Some(url.as_str()) {
            return None;
        }
        self.artwork_url = Some(url.clone());
        self.artwork = ArtworkState::Loading;
        Some(url)
    }

    /// Art for a URL we no longer show is dropped.
    pub fn apply_artwork(&mut self, url: &str, state: ArtworkState) {
        if self.artwork_url.as_deref() == Some(url) {
            self.artwork = state;
        }
    }

    /// The list on screen lives in the snapshot; a fetch shows up with the next poll.
    pub fn apply_recent(&mut self, result: Result<Vec<RecentItem>, PollError>) {
        match result {
            Ok(items) => debug!("Recently played refreshed ({} tracks)", items.len()),
            Err(e) => {
                warn!("Keeping previous recently played list: {}", e);
                self.show_toast("Could not load recently played");
            }
        }
    }

    pub fn recent(&self) -> &[RecentItem] {
        &self.playback.snapshot().recently_played
    }

    /// The entry under the cursor, with its position.
    pub fn selected_recent(&self) -> Option<(usize, RecentItem)> {
        self.recent()
            .get(self.recent_selected)
            .cloned()
            .map(|item| (self.recent_selected, item))
    }

    fn clamp_selection(&mut self) {
        self.recent_selected = self
            .recent_selected
            .min(self.recent().len().saturating_sub(1));
    }

    /// Apply a finished command. Returns an album art URL that needs fetching.
    pub fn apply_dispatch(&mut self, result: Result<Dispatched, CommandError>) -> Option<String> {
        match result {
            Ok(dispatched) => {
                self.show_toast(&dispatched.effect.message());
                if let Some(recent) = dispatched.recent {
                    self.apply_recent(recent);
                }
                dispatched.refresh.and_then(|outcome| self.apply_poll(outcome))
            }
            Err(e) => {
                self.show_toast(&format!("❌ {}", e));
                None
            }
        }
    }

    pub fn select_prev(&mut self) {
        self.recent_selected = self.recent_selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.recent_selected + 1 < self.recent().len() {
            self.recent_selected += 1;
        }
    }

    pub fn volume_up(&self) -> u8 {
        self.volume.saturating_add(VOLUME_STEP).min(100)
    }

    pub fn volume_down(&self) -> u8 {
        self.volume.saturating_sub(VOLUME_STEP)
    }

    /// Local effects of an intent the command worker accepted.
    pub fn on_queued(&mut self, intent: &Intent) {
        if let Intent::SetVolume(volume) = intent {
            self.volume = (*volume).min(100);
        }
    }

    pub fn current_position_ms(&self) -> u64 {
        self.playback.position_ms(Instant::now())
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + TOAST_DURATION;

        if let Some(ref mut current) = self.toast {
            // Keep start_time so rapid updates don't restart the entrance
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlaybackSnapshot, Sequenced};

    fn app() -> App {
        App::new(&UserConfig::default())
    }

    fn with_art(seq: u64, url: &str) -> PollOutcome {
        Sequenced {
            seq,
            value: Ok(PlaybackSnapshot {
                is_playing: true,
                track_name: "Song".into(),
                album_art_url: Some(url.to_string()),
                duration_ms: 1000,
                ..PlaybackSnapshot::default()
            }),
        }
    }

    #[test]
    fn test_art_fetched_once_per_url() {
        let mut app = app();
        assert_eq!(app.apply_poll(with_art(1, "a")), Some("a".to_string()));
        assert_eq!(app.apply_poll(with_art(2, "a")), None);
        assert_eq!(app.apply_poll(with_art(3, "b")), Some("b".to_string()));
    }

    #[test]
    fn test_stale_artwork_ignored() {
        let mut app = app();
        app.apply_poll(with_art(1, "a"));
        app.apply_poll(with_art(2, "b"));
        app.apply_artwork("a", ArtworkState::Failed);
        assert!(matches!(app.artwork, ArtworkState::Loading));
        app.apply_artwork("b", ArtworkState::Failed);
        assert!(matches!(app.artwork, ArtworkState::Failed));
    }

    fn with_recent(seq: u64, names: &[&str]) -> PollOutcome {
        Sequenced {
            seq,
            value: Ok(PlaybackSnapshot {
                recently_played: names
                    .iter()
                    .map(|n| RecentItem {
                        name: n.to_string(),
                        artist: "X".into(),
                        uri: format!("spotify:track:{}", n),
                    })
                    .collect(),
                ..PlaybackSnapshot::default()
            }),
        }
    }

    #[test]
    fn test_missing_art_clears_previous_cover() {
        let mut app = app();
        app.apply_poll(with_art(1, "a"));
        app.apply_artwork("a", ArtworkState::Failed);

        assert_eq!(app.apply_poll(with_recent(2, &[])), None);
        assert!(app.artwork_url.is_none());
        assert!(matches!(app.artwork, ArtworkState::Idle));

        // Same cover coming back is fetched again
        assert_eq!(app.apply_poll(with_art(3, "a")), Some("a".to_string()));
    }

    #[test]
    fn test_volume_changes_only_once_queued() {
        let mut app = app();
        app.volume = 98;
        assert_eq!(app.volume_up(), 100);
        assert_eq!(app.volume, 98);
        app.on_queued(&Intent::SetVolume(100));
        assert_eq!(app.volume, 100);

        app.volume = 3;
        assert_eq!(app.volume_down(), 0);
        app.on_queued(&Intent::Next);
        assert_eq!(app.volume, 3);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.select_next();
        assert_eq!(app.recent_selected, 0);
        app.apply_poll(with_recent(1, &["a", "b"]));
        app.select_next();
        app.select_next();
        assert_eq!(app.recent_selected, 1);
        assert_eq!(app.selected_recent().map(|(i, item)| (i, item.name)), Some((1, "b".to_string())));

        // A shorter list pulls the cursor back
        app.apply_poll(with_recent(2, &["c"]));
        assert_eq!(app.recent_selected, 0);
        app.select_prev();
        assert_eq!(app.recent_selected, 0);
    }

    #[test]
    fn test_failed_recent_refresh_keeps_list_and_toasts() {
        let mut app = app();
        app.apply_poll(with_recent(1, &["a"]));
        app.apply_recent(Err(PollError::Transient("offline".into())));
        assert_eq!(app.recent().len(), 1);
        assert!(app.toast.is_some());
    }
}
