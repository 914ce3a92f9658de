use crate::player::{AssetFetchError, RepeatMode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    ShuffleOn,
    ShuffleOff,
    Prev,
    Play,
    Pause,
    Next,
    RepeatOn,
    RepeatOff,
    Volume,
    Close,
    Minimize,
    Spotify,
}

impl Icon {
    pub const ALL: [Icon; 12] = [
        Icon::ShuffleOn,
        Icon::ShuffleOff,
        Icon::Prev,
        Icon::Play,
        Icon::Pause,
        Icon::Next,
        Icon::RepeatOn,
        Icon::RepeatOff,
        Icon::Volume,
        Icon::Close,
        Icon::Minimize,
        Icon::Spotify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Icon::ShuffleOn => "shuffle_on",
            Icon::ShuffleOff => "shuffle_off",
            Icon::Prev => "prev",
            Icon::Play => "play",
            Icon::Pause => "pause",
            Icon::Next => "next",
            Icon::RepeatOn => "repeat_on",
            Icon::RepeatOff => "repeat_off",
            Icon::Volume => "volume",
            Icon::Close => "close",
            Icon::Minimize => "minimize",
            Icon::Spotify => "spotify",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            Icon::ShuffleOn => "https://img.icons8.com/ios-filled/50/1DB954/shuffle.png",
            Icon::ShuffleOff => "https://img.icons8.com/ios/50/ffffff/shuffle.png",
            Icon::Prev => "https://img.icons8.com/ios-filled/50/ffffff/rewind.png",
            Icon::Play => "https://img.icons8.com/ios-filled/100/ffffff/play.png",
            Icon::Pause => "https://img.icons8.com/ios-filled/100/ffffff/pause.png",
            Icon::Next => "https://img.icons8.com/ios-filled/50/ffffff/fast-forward.png",
            Icon::RepeatOn => "https://img.icons8.com/ios-filled/50/1DB954/repeat.png",
            Icon::RepeatOff => "https://img.icons8.com/ios/50/ffffff/repeat.png",
            Icon::Volume => "https://img.icons8.com/ios-filled/50/ffffff/medium-volume.png",
            Icon::Close => "https://img.icons8.com/ios-filled/50/ffffff/delete-sign.png",
            Icon::Minimize => "https://img.icons8.com/ios-filled/50/ffffff/minimize-window.png",
            Icon::Spotify => "https://img.icons8.com/ios-filled/50/1DB954/spotify.png",
        }
    }

    /// Terminal stand-in when the image is not drawn.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::ShuffleOn | Icon::ShuffleOff => "🔀",
            Icon::Prev => "⏮",
            Icon::Play => "▶",
            Icon::Pause => "⏸",
            Icon::Next => "⏭",
            Icon::RepeatOn | Icon::RepeatOff => "🔁",
            Icon::Volume => "🔊",
            Icon::Close => "✕",
            Icon::Minimize => "—",
            Icon::Spotify => "●",
        }
    }

    pub fn for_shuffle(on: bool) -> Self {
        if on {
            Icon::ShuffleOn
        } else {
            Icon::ShuffleOff
        }
    }

    /// Two states only: any repeat mode other than Off lights the icon.
    pub fn for_repeat(mode: RepeatMode) -> Self {
        if mode == RepeatMode::Off {
            Icon::RepeatOff
        } else {
            Icon::RepeatOn
        }
    }

    /// The button shows the action it will perform.
    pub fn for_playback(is_playing: bool) -> Self {
        if is_playing {
            Icon::Pause
        } else {
            Icon::Play
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Icon::ShuffleOn | Icon::RepeatOn | Icon::Spotify)
    }
}

/// Resolves icons to files in a local cache, downloading each one once.
///
/// Blocking; call from the blocking pool.
pub struct IconProvider {
    dir: PathBuf,
    download: bool,
}

impl IconProvider {
    pub fn new(dir: impl Into<PathBuf>, download: bool) -> Self {
        Self {
            dir: dir.into(),
            download,
        }
    }

    /// `<cache_dir>/spotimini/icons`
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spotimini")
            .join("icons")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, icon: Icon) -> PathBuf {
        self.dir.join(format!("{}.png", icon.name()))
    }

    /// Local file for `icon`, fetching it first if absent. Failures are logged.
    pub fn resolve(&self, icon: Icon) -> Option<PathBuf> {
        let path = self.path_for(icon);
        if path.exists() {
            return Some(path);
        }
        if !self.download {
            return None;
        }
        match self.fetch(icon, &path) {
            Ok(()) => {
                debug!("Cached icon {} at {}", icon.name(), path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Could not download icon {} from {}: {}", icon.name(), icon.url(), e);
                None
            }
        }
    }

    /// Resolve every icon, returning how many are available locally.
    pub fn ensure_all(&self) -> usize {
        Icon::ALL
            .iter()
            .filter(|icon| self.resolve(**icon).is_some())
            .count()
    }

    /// Decoded image for `icon`, if it can be resolved and read.
    pub fn load(&self, icon: Icon) -> Option<image::DynamicImage> {
        let path = self.resolve(icon)?;
        match image::open(&path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("Could not decode icon {}: {}", path.display(), e);
                None
            }
        }
    }

    fn fetch(&self, icon: Icon, path: &Path) -> Result<(), AssetFetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        let response = client.get(icon.url()).send()?;
        if !response.status().is_success() {
            return Err(AssetFetchError::Status(response.status().as_u16()));
        }
        let bytes = response.bytes()?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, &bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_variants() {
        assert_eq!(Icon::for_shuffle(true), Icon::ShuffleOn);
        assert_eq!(Icon::for_shuffle(false), Icon::ShuffleOff);
        assert_eq!(Icon::for_repeat(RepeatMode::Off), Icon::RepeatOff);
        assert_eq!(Icon::for_repeat(RepeatMode::Context), Icon::RepeatOn);
        assert_eq!(Icon::for_repeat(RepeatMode::Track), Icon::RepeatOn);
        assert_eq!(Icon::for_playback(true), Icon::Pause);
    }

    #[test]
    fn test_existing_file_is_used_without_download() {
        let dir = tempfile::tempdir().unwrap();
        let provider = IconProvider::new(dir.path(), false);
        std::fs::write(provider.path_for(Icon::Play), b"png").unwrap();

        assert_eq!(provider.resolve(Icon::Play), Some(dir.path().join("play.png")));
        assert_eq!(provider.resolve(Icon::Pause), None);
        assert_eq!(provider.ensure_all(), 1);
    }

    #[test]
    fn test_undecodable_icon_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let provider = IconProvider::new(dir.path(), false);
        std::fs::write(provider.path_for(Icon::Spotify), b"not an image").unwrap();
        assert!(provider.load(Icon::Spotify).is_none());
    }
}
