use super::error::{CommandError, PollError};
use super::poller::{PollOutcome, Poller};
use super::snapshot::RecentItem;
use super::traits::{RepeatMode, SpotifyApi};
use std::sync::Arc;
use tracing::{info, warn};

/// One discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    TogglePlayback,
    Next,
    Previous,
    ToggleShuffle,
    CycleRepeat,
    SetVolume(u8),
    /// The recently played entry the user picked, at its position in the
    /// list they were looking at
    SelectRecent { index: usize, item: RecentItem },
}

impl Intent {
    pub fn action(&self) -> &'static str {
        match self {
            Self::TogglePlayback => "Play/pause",
            Self::Next => "Next track",
            Self::Previous => "Previous track",
            Self::ToggleShuffle => "Shuffle",
            Self::CycleRepeat => "Repeat",
            Self::SetVolume(_) => "Volume",
            Self::SelectRecent { .. } => "Play recent",
        }
    }
}

/// What the remote mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Paused,
    Resumed,
    Skipped,
    WentBack,
    Shuffle(bool),
    Repeat(RepeatMode),
    Volume(u8),
    Started(RecentItem),
}

impl Effect {
    /// Short toast line for the UI.
    pub fn message(&self) -> String {
        match self {
            Self::Paused => "⏸ Pause".to_string(),
            Self::Resumed => "▶ Play".to_string(),
            Self::Skipped => "⏭ Next Track".to_string(),
            Self::WentBack => "⏮ Previous Track".to_string(),
            Self::Shuffle(on) => format!("🔀 Shuffle: {}", if *on { "ON" } else { "OFF" }),
            Self::Repeat(mode) => format!("🔁 Repeat: {}", mode.label()),
            Self::Volume(v) => format!("🔊 Volume: {}%", v),
            Self::Started(item) => format!("▶ {}", item.name),
        }
    }
}

/// A successful dispatch plus the refresh it triggered.
#[derive(Debug)]
pub struct Dispatched {
    pub intent: Intent,
    pub effect: Effect,
    pub refresh: Option<PollOutcome>,
    /// Re-fetched recently played list, only after `SelectRecent`
    pub recent: Option<Result<Vec<RecentItem>, PollError>>,
}

/// Turns intents into single remote mutations.
///
/// Toggles read the current remote state right before writing. The read and
/// the write are not atomic, so another client changing state in between
/// can make a toggle land on the wrong side.
pub struct Dispatcher {
    api: Arc<dyn SpotifyApi>,
    poller: Arc<Poller>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn SpotifyApi>, poller: Arc<Poller>) -> Self {
        Self { api, poller }
    }

    pub fn dispatch(&self, intent: Intent) -> Result<Dispatched, CommandError> {
        let action = intent.action();
        let result = self.apply(&intent);

        match &result {
            Ok(effect) => info!("{}: {:?}", action, effect),
            Err(e) => warn!("{}", e),
        }
        let effect = result?;

        // Re-fetch the list first so the refreshed snapshot carries it
        let recent = match intent {
            Intent::SelectRecent { .. } => Some(self.poller.refresh_recent()),
            _ => None,
        };
        // Volume is fire-and-forget; the next tick picks it up
        let refresh = match intent {
            Intent::SetVolume(_) => None,
            _ => Some(self.poller.poll_sequenced()),
        };

        Ok(Dispatched {
            intent,
            effect,
            refresh,
            recent,
        })
    }

    fn apply(&self, intent: &Intent) -> Result<Effect, CommandError> {
        let action = intent.action();
        match intent {
            Intent::TogglePlayback => {
                let playing = self
                    .api
                    .current_playback()
                    .map_err(CommandError::remote(action))?
                    .map(|pb| pb.is_playing)
                    .unwrap_or(false);
                if playing {
                    self.api.pause().map_err(CommandError::remote(action))?;
                    Ok(Effect::Paused)
                } else {
                    self.api.resume().map_err(CommandError::remote(action))?;
                    Ok(Effect::Resumed)
                }
            }
            Intent::Next => {
                self.api.next().map_err(CommandError::remote(action))?;
                Ok(Effect::Skipped)
            }
            Intent::Previous => {
                self.api.prev().map_err(CommandError::remote(action))?;
                Ok(Effect::WentBack)
            }
            Intent::ToggleShuffle => {
                let current = self
                    .api
                    .current_playback()
                    .map_err(CommandError::remote(action))?
                    .ok_or(CommandError::NoSession { action })?;
                let target = !current.shuffle_state;
                self.api
                    .set_shuffle(target)
                    .map_err(CommandError::remote(action))?;
                Ok(Effect::Shuffle(target))
            }
            Intent::CycleRepeat => {
                let current = self
                    .api
                    .current_playback()
                    .map_err(CommandError::remote(action))?
                    .ok_or(CommandError::NoSession { action })?;
                let target = RepeatMode::from_api(&current.repeat_state).next();
                self.api
                    .set_repeat(target)
                    .map_err(CommandError::remote(action))?;
                Ok(Effect::Repeat(target))
            }
            Intent::SetVolume(volume) => {
                let volume = (*volume).min(100);
                self.api
                    .set_volume(volume)
                    .map_err(CommandError::remote(action))?;
                Ok(Effect::Volume(volume))
            }
            Intent::SelectRecent { index, item } => {
                // The list may have been re-fetched since the user saw it; play
                // what they picked as long as the position still exists
                let len = self.poller.recent_len();
                if *index >= len {
                    return Err(CommandError::OutOfRange { index: *index, len });
                }
                self.api
                    .start_playback(std::slice::from_ref(&item.uri))
                    .map_err(CommandError::remote(action))?;
                Ok(Effect::Started(item.clone()))
            }
        }
    }
}
