use thiserror::Error;

/// Failure reported by an API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("no active device")]
    NoActiveDevice,
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Credentials rejected. Retrying with the same token will not help.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// A poll that produced no snapshot. The last good snapshot stays on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("{0}")]
    Transient(String),
    #[error("authorization failed: {0}")]
    Auth(String),
}

impl PollError {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<ApiError> for PollError {
    fn from(err: ApiError) -> Self {
        if err.is_auth() {
            Self::Auth(err.to_string())
        } else {
            Self::Transient(err.to_string())
        }
    }
}

/// A dispatched control action that did not go through.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{action} failed: {source}")]
    Remote {
        action: &'static str,
        #[source]
        source: ApiError,
    },
    #[error("{action} needs an active playback session")]
    NoSession { action: &'static str },
    #[error("no recently played track at position {index} (list has {len})")]
    OutOfRange { index: usize, len: usize },
}

impl CommandError {
    pub(crate) fn remote(action: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| Self::Remote { action, source }
    }
}

/// Icon or album art could not be produced. Never shown to the user.
#[derive(Debug, Error)]
pub enum AssetFetchError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP {0}")]
    Status(u16),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("cache write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_error_classification() {
        let auth: PollError = ApiError::Unauthorized("token expired".into()).into();
        assert!(auth.is_auth());

        let limited: PollError = ApiError::RateLimited {
            retry_after_secs: Some(3),
        }
        .into();
        assert!(!limited.is_auth());
        assert!(limited.to_string().contains("rate limited"));

        let server: PollError = ApiError::Status {
            status: 502,
            message: "Bad gateway".into(),
        }
        .into();
        assert_eq!(server, PollError::Transient("HTTP 502: Bad gateway".into()));
    }

    #[test]
    fn test_command_error_names_action() {
        let err = CommandError::remote("Shuffle")(ApiError::NoActiveDevice);
        assert_eq!(err.to_string(), "Shuffle failed: no active device");
    }
}
