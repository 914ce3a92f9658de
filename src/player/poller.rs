use super::error::PollError;
use super::snapshot::{PlaybackSnapshot, RecentItem, TrackRef};
use super::traits::SpotifyApi;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// A result tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequenced<T> {
    pub seq: u64,
    pub value: T,
}

pub type PollOutcome = Sequenced<Result<PlaybackSnapshot, PollError>>;

/// Held while a scheduled poll is outstanding. Dropping it frees the slot.
#[derive(Debug)]
pub struct PollTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for PollTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// Reads remote playback state and turns it into snapshots.
pub struct Poller {
    api: Arc<dyn SpotifyApi>,
    recent_limit: usize,
    recent: RwLock<Vec<RecentItem>>,
    issued: AtomicU64,
    in_flight: Arc<AtomicBool>,
}

impl Poller {
    pub fn new(api: Arc<dyn SpotifyApi>, recent_limit: usize) -> Self {
        Self {
            api,
            recent_limit,
            recent: RwLock::new(Vec::new()),
            issued: AtomicU64::new(0),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claim the scheduled-poll slot. `None` while another scheduled poll runs.
    pub fn try_begin(&self) -> Option<PollTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PollTicket {
                in_flight: self.in_flight.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Hand out the next sequence number. Numbers start at 1.
    pub fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Poll once under a freshly issued sequence number.
    pub fn poll_sequenced(&self) -> PollOutcome {
        let seq = self.next_seq();
        Sequenced {
            seq,
            value: self.poll(),
        }
    }

    pub fn poll(&self) -> Result<PlaybackSnapshot, PollError> {
        let playback = self.api.current_playback().map_err(|e| {
            warn!("Current playback request failed: {}", e);
            PollError::from(e)
        })?;
        let recent = self.recent();

        let snapshot = match playback {
            Some(ref pb) if pb.is_playing => match &pb.item {
                Some(track) => {
                    let next = self
                        .api
                        .queue()
                        .map_err(|e| {
                            warn!("Queue request failed: {}", e);
                            PollError::from(e)
                        })?
                        .first()
                        .map(TrackRef::from);
                    PlaybackSnapshot::playing(pb, track, next, recent)
                }
                // Episodes and ads carry no track item
                None => PlaybackSnapshot::idle(Some(pb), recent),
            },
            other => PlaybackSnapshot::idle(other.as_ref(), recent),
        };

        debug!(
            "Polled: playing={}, track={:?}, progress={}/{}",
            snapshot.is_playing, snapshot.track_name, snapshot.progress_ms, snapshot.duration_ms
        );
        Ok(snapshot)
    }

    /// Fetch the recently played list and remember it for later selection.
    pub fn refresh_recent(&self) -> Result<Vec<RecentItem>, PollError> {
        let items: Vec<RecentItem> = self
            .api
            .recently_played(self.recent_limit)
            .map_err(|e| {
                warn!("Recently played request failed: {}", e);
                PollError::from(e)
            })?
            .iter()
            .take(self.recent_limit)
            .map(RecentItem::from)
            .collect();

        debug!("Fetched {} recently played tracks", items.len());
        *self.recent.write().unwrap_or_else(|e| e.into_inner()) = items.clone();
        Ok(items)
    }

    /// Last fetched recently played list.
    pub fn recent(&self) -> Vec<RecentItem> {
        self.recent.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Length of the last fetched recently played list.
    pub fn recent_len(&self) -> usize {
        self.recent.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}
