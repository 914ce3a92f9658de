use crate::player::{PlaybackSnapshot, PollError, PollOutcome};
use image::DynamicImage;
use std::time::{Duration, Instant};

pub enum ArtworkState {
    Idle,
    Loading,
    Loaded(DynamicImage),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

/// What happened to a poll result handed to [`PlaybackView::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// New snapshot on screen, error note cleared
    Updated,
    /// Snapshot kept, error note set
    Failed,
    /// Older than what is already shown; dropped
    Stale,
}

/// The snapshot currently on screen and the error note next to it.
///
/// Only the UI loop writes here. Results are ordered by the sequence number
/// they were issued under, not by arrival.
#[derive(Debug, Default)]
pub struct PlaybackView {
    snapshot: PlaybackSnapshot,
    applied_seq: u64,
    error: Option<PollError>,
    received_at: Option<Instant>,
}

impl PlaybackView {
    pub fn apply(&mut self, outcome: PollOutcome) -> Applied {
        self.apply_at(outcome, Instant::now())
    }

    pub fn apply_at(&mut self, outcome: PollOutcome, now: Instant) -> Applied {
        if outcome.seq <= self.applied_seq {
            return Applied::Stale;
        }
        self.applied_seq = outcome.seq;

        match outcome.value {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.error = None;
                self.received_at = Some(now);
                Applied::Updated
            }
            Err(e) => {
                self.error = Some(e);
                Applied::Failed
            }
        }
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }

    pub fn error(&self) -> Option<&PollError> {
        self.error.as_ref()
    }

    pub fn error_note(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| format!("Error fetching track: {}", e))
    }

    /// Progress extrapolated from the last snapshot, never past the duration.
    pub fn position_ms(&self, now: Instant) -> u64 {
        let snap = &self.snapshot;
        if !snap.is_playing {
            return 0;
        }
        let elapsed = self
            .received_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(Duration::ZERO);
        (snap.progress_ms + elapsed.as_millis() as u64).min(snap.duration_ms)
    }
}

/// Widget width in pixels. Local only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiScale(u16);

impl UiScale {
    pub const MIN: u16 = 300;
    pub const MAX: u16 = 800;
    pub const STEP: u16 = 10;
    /// Roughly the pixel width of one terminal cell
    const CELL_PX: u16 = 10;

    pub fn new(px: u16) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    pub fn px(self) -> u16 {
        self.0
    }

    pub fn grow(self) -> Self {
        Self::new(self.0.saturating_add(Self::STEP))
    }

    pub fn shrink(self) -> Self {
        Self::new(self.0.saturating_sub(Self::STEP))
    }

    /// Card width in terminal columns.
    pub fn columns(self) -> u16 {
        self.0 / Self::CELL_PX
    }
}

impl Default for UiScale {
    fn default() -> Self {
        Self::new(450)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Sequenced;

    fn snapshot(track: &str, progress_ms: u64) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: true,
            track_name: track.to_string(),
            artist_name: "Artist".to_string(),
            progress_ms,
            duration_ms: 200_000,
            ..PlaybackSnapshot::default()
        }
    }

    #[test]
    fn test_out_of_order_result_is_discarded() {
        let mut view = PlaybackView::default();
        let late = Sequenced {
            seq: 1,
            value: Ok(snapshot("Old", 0)),
        };
        let fresh = Sequenced {
            seq: 2,
            value: Ok(snapshot("New", 0)),
        };

        assert_eq!(view.apply(fresh), Applied::Updated);
        assert_eq!(view.apply(late), Applied::Stale);
        assert_eq!(view.snapshot().track_name, "New");
        assert_eq!(view.applied_seq(), 2);
    }

    #[test]
    fn test_failure_keeps_snapshot_and_sets_note() {
        let mut view = PlaybackView::default();
        view.apply(Sequenced {
            seq: 1,
            value: Ok(snapshot("Song", 1000)),
        });
        let before = view.snapshot().clone();

        let applied = view.apply(Sequenced {
            seq: 2,
            value: Err(PollError::Transient("timed out".into())),
        });
        assert_eq!(applied, Applied::Failed);
        assert_eq!(view.snapshot(), &before);
        assert_eq!(view.error_note().as_deref(), Some("Error fetching track: timed out"));

        view.apply(Sequenced {
            seq: 3,
            value: Ok(snapshot("Song", 2000)),
        });
        assert!(view.error().is_none());
    }

    #[test]
    fn test_position_interpolates_and_clamps() {
        let mut view = PlaybackView::default();
        let t0 = Instant::now();
        view.apply_at(
            Sequenced {
                seq: 1,
                value: Ok(snapshot("Song", 199_000)),
            },
            t0,
        );
        assert_eq!(view.position_ms(t0), 199_000);
        assert_eq!(view.position_ms(t0 + Duration::from_millis(500)), 199_500);
        assert_eq!(view.position_ms(t0 + Duration::from_secs(5)), 200_000);
    }

    #[test]
    fn test_not_playing_shows_zero() {
        let view = PlaybackView::default();
        assert_eq!(view.position_ms(Instant::now()), 0);
    }

    #[test]
    fn test_ui_scale_bounds() {
        assert_eq!(UiScale::new(100).px(), 300);
        assert_eq!(UiScale::new(9000).px(), 800);
        assert_eq!(UiScale::new(800).grow().px(), 800);
        assert_eq!(UiScale::new(300).shrink().px(), 300);
        assert_eq!(UiScale::default().grow().px(), 460);
        assert_eq!(UiScale::default().columns(), 45);
    }
}
