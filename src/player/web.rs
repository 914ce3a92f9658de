use super::error::ApiError;
use super::traits::{CurrentPlayback, RemoteTrack, RepeatMode, SpotifyApi};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

// --- Wire format ---

#[derive(Debug, Deserialize)]
struct WireArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireImage {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireAlbum {
    #[serde(default)]
    images: Vec<WireImage>,
}

#[derive(Debug, Deserialize)]
struct WireTrack {
    name: String,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    duration_ms: u64,
    artists: Vec<WireArtist>,
    #[serde(default)]
    album: Option<WireAlbum>,
}

impl From<WireTrack> for RemoteTrack {
    fn from(t: WireTrack) -> Self {
        Self {
            name: t.name,
            uri: t.uri,
            duration_ms: t.duration_ms,
            artists: t.artists.into_iter().map(|a| a.name).collect(),
            album_images: t
                .album
                .unwrap_or_default()
                .images
                .into_iter()
                .map(|i| i.url)
                .collect(),
        }
    }
}

/// Episodes share the `item` slot but lack `artists`; they decode to `None`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireItem {
    Track(WireTrack),
    Other(serde_json::Value),
}

impl WireItem {
    fn into_track(self) -> Option<RemoteTrack> {
        match self {
            Self::Track(t) => Some(t.into()),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WirePlayback {
    #[serde(default)]
    is_playing: bool,
    progress_ms: Option<u64>,
    #[serde(default)]
    shuffle_state: bool,
    #[serde(default)]
    repeat_state: String,
    item: Option<WireItem>,
}

#[derive(Debug, Deserialize)]
struct WireQueue {
    #[serde(default)]
    queue: Vec<WireItem>,
}

#[derive(Debug, Deserialize)]
struct WirePlayHistory {
    track: WireTrack,
}

#[derive(Debug, Deserialize)]
struct WireRecent {
    #[serde(default)]
    items: Vec<WirePlayHistory>,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WireErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    reason: Option<String>,
}

pub(crate) fn parse_playback(body: &str) -> Result<Option<CurrentPlayback>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let wire: WirePlayback = serde_json::from_str(body)?;
    Ok(Some(CurrentPlayback {
        is_playing: wire.is_playing,
        progress_ms: wire.progress_ms,
        shuffle_state: wire.shuffle_state,
        repeat_state: wire.repeat_state,
        item: wire.item.and_then(WireItem::into_track),
    }))
}

pub(crate) fn parse_queue(body: &str) -> Result<Vec<RemoteTrack>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let wire: WireQueue = serde_json::from_str(body)?;
    Ok(wire
        .queue
        .into_iter()
        .filter_map(WireItem::into_track)
        .collect())
}

pub(crate) fn parse_recent(body: &str) -> Result<Vec<RemoteTrack>, ApiError> {
    let wire: WireRecent = serde_json::from_str(body)?;
    Ok(wire.items.into_iter().map(|h| h.track.into()).collect())
}

/// Map an unsuccessful response to an error.
pub(crate) fn classify_status(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> ApiError {
    let detail = serde_json::from_str::<WireErrorBody>(body).ok().map(|b| b.error);
    let message = detail
        .as_ref()
        .map(|d| d.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            retry_after_secs: retry_after,
        },
        StatusCode::NOT_FOUND
            if detail.and_then(|d| d.reason).as_deref() == Some("NO_ACTIVE_DEVICE") =>
        {
            ApiError::NoActiveDevice
        }
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

/// Spotify Web API client over blocking `reqwest`, authorized by a bearer token.
pub struct WebApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl WebApiClient {
    pub fn new(token: &str, base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("spotimini/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and return the body of a successful response.
    fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.bearer_auth(&self.token).send()?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text()?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(classify_status(status, retry_after, &body))
        }
    }

    fn command(&self, request: RequestBuilder) -> Result<(), ApiError> {
        // Mutations answer 204 with an empty body; a Content-Length keeps PUTs valid
        self.send(request.header(reqwest::header::CONTENT_LENGTH, "0"))
            .map(|_| ())
    }
}

impl SpotifyApi for WebApiClient {
    fn current_playback(&self) -> Result<Option<CurrentPlayback>, ApiError> {
        let body = self.send(self.client.get(self.url("/me/player")))?;
        parse_playback(&body)
    }

    fn queue(&self) -> Result<Vec<RemoteTrack>, ApiError> {
        let body = self.send(self.client.get(self.url("/me/player/queue")))?;
        parse_queue(&body)
    }

    fn recently_played(&self, limit: usize) -> Result<Vec<RemoteTrack>, ApiError> {
        let limit = limit.clamp(1, 50).to_string();
        let body = self.send(
            self.client
                .get(self.url("/me/player/recently-played"))
                .query(&[("limit", limit.as_str())]),
        )?;
        parse_recent(&body)
    }

    fn pause(&self) -> Result<(), ApiError> {
        self.command(self.client.put(self.url("/me/player/pause")))
    }

    fn resume(&self) -> Result<(), ApiError> {
        self.command(self.client.put(self.url("/me/player/play")))
    }

    fn next(&self) -> Result<(), ApiError> {
        self.command(self.client.post(self.url("/me/player/next")))
    }

    fn prev(&self) -> Result<(), ApiError> {
        self.command(self.client.post(self.url("/me/player/previous")))
    }

    fn set_shuffle(&self, enable: bool) -> Result<(), ApiError> {
        let state = enable.to_string();
        self.command(
            self.client
                .put(self.url("/me/player/shuffle"))
                .query(&[("state", state.as_str())]),
        )
    }

    fn set_repeat(&self, mode: RepeatMode) -> Result<(), ApiError> {
        self.command(
            self.client
                .put(self.url("/me/player/repeat"))
                .query(&[("state", mode.as_api())]),
        )
    }

    fn set_volume(&self, volume: u8) -> Result<(), ApiError> {
        let volume = volume.min(100).to_string();
        self.command(
            self.client
                .put(self.url("/me/player/volume"))
                .query(&[("volume_percent", volume.as_str())]),
        )
    }

    fn start_playback(&self, uris: &[String]) -> Result<(), ApiError> {
        let body = serde_json::json!({ "uris": uris });
        self.send(self.client.put(self.url("/me/player/play")).json(&body))
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYING: &str = r#"{
        "is_playing": true,
        "progress_ms": 42000,
        "shuffle_state": false,
        "repeat_state": "track",
        "item": {
            "name": "Digital Love",
            "uri": "spotify:track:2VEZx7NWsZ1D0eJ4uv5Fym",
            "duration_ms": 301000,
            "artists": [{"name": "Daft Punk"}],
            "album": {"images": [{"url": "https://i.scdn.co/image/640"}, {"url": "https://i.scdn.co/image/300"}]}
        }
    }"#;

    #[test]
    fn test_parse_playing() {
        let pb = parse_playback(PLAYING).unwrap().unwrap();
        assert!(pb.is_playing);
        assert_eq!(pb.progress_ms, Some(42000));
        assert_eq!(pb.repeat_state, "track");
        let item = pb.item.unwrap();
        assert_eq!(item.name, "Digital Love");
        assert_eq!(item.artists, vec!["Daft Punk".to_string()]);
        assert_eq!(item.album_images[0], "https://i.scdn.co/image/640");
    }

    #[test]
    fn test_client_builds_and_trims_base() {
        let client = WebApiClient::new("token", "http://127.0.0.1:9/v1/").unwrap();
        assert_eq!(client.url("/me/player"), "http://127.0.0.1:9/v1/me/player");
    }

    #[test]
    fn test_parse_no_content_is_no_session() {
        assert_eq!(parse_playback("").unwrap(), None);
    }

    #[test]
    fn test_parse_episode_has_no_track() {
        let body = r#"{"is_playing": true, "progress_ms": 10, "shuffle_state": false,
            "repeat_state": "off", "item": {"name": "Episode 12", "show": {"name": "A Show"}}}"#;
        let pb = parse_playback(body).unwrap().unwrap();
        assert!(pb.item.is_none());
    }

    #[test]
    fn test_parse_queue_and_recent() {
        let queue = r#"{"currently_playing": null, "queue": [
            {"name": "One More Time", "uri": "spotify:track:a", "duration_ms": 320000, "artists": [{"name": "Daft Punk"}]}
        ]}"#;
        let tracks = parse_queue(queue).unwrap();
        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].album_images.is_empty());

        let recent = r#"{"items": [
            {"played_at": "2024-01-01T00:00:00Z", "track": {"name": "A", "uri": "spotify:track:a", "duration_ms": 1, "artists": []}},
            {"played_at": "2023-12-31T00:00:00Z", "track": {"name": "B", "uri": "spotify:track:b", "duration_ms": 1, "artists": []}}
        ]}"#;
        let tracks = parse_recent(recent).unwrap();
        assert_eq!(tracks[1].uri, "spotify:track:b");
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        assert!(matches!(parse_playback("{not json"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_classify_status() {
        let expired = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
        match classify_status(StatusCode::UNAUTHORIZED, None, expired) {
            ApiError::Unauthorized(msg) => assert_eq!(msg, "The access token expired"),
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, Some(4), ""),
            ApiError::RateLimited {
                retry_after_secs: Some(4)
            }
        ));

        let no_device = r#"{"error": {"status": 404, "message": "Player command failed: No active device found", "reason": "NO_ACTIVE_DEVICE"}}"#;
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, None, no_device),
            ApiError::NoActiveDevice
        ));

        match classify_status(StatusCode::BAD_GATEWAY, None, "") {
            ApiError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
