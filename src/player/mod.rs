pub mod dispatcher;
pub mod error;
pub mod poller;
pub mod snapshot;
pub mod traits;
pub mod web;

pub use dispatcher::{Dispatched, Dispatcher, Effect, Intent};
pub use error::{ApiError, AssetFetchError, CommandError, PollError};
pub use poller::{PollOutcome, PollTicket, Poller, Sequenced};
pub use snapshot::{format_time, PlaybackSnapshot, RecentItem, TrackRef};
pub use traits::{CurrentPlayback, RemoteTrack, RepeatMode, SpotifyApi};
pub use web::{WebApiClient, DEFAULT_API_BASE};
