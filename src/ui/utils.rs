use crate::player::PlaybackSnapshot;
use unicode_width::UnicodeWidthChar;

pub const NO_TRACK: &str = "No track playing";
pub const NO_ARTIST: &str = "No artist";
pub const NO_QUEUE: &str = "No queue";

/// Truncate to `max_width` terminal columns, appending "…" if truncated 🛡️
pub fn truncate(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

/// Title and artist lines, with placeholders while nothing plays.
pub fn track_lines(snapshot: &PlaybackSnapshot) -> (String, String) {
    if !snapshot.is_playing || snapshot.track_name.is_empty() {
        return (NO_TRACK.to_string(), NO_ARTIST.to_string());
    }
    let artist = if snapshot.artist_name.is_empty() {
        NO_ARTIST.to_string()
    } else {
        snapshot.artist_name.clone()
    };
    (snapshot.track_name.clone(), artist)
}

pub fn queue_label(snapshot: &PlaybackSnapshot) -> String {
    match &snapshot.next_in_queue {
        Some(next) => next.label(),
        None => NO_QUEUE.to_string(),
    }
}
