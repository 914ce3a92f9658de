use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub quit: String,
    pub play_pause: String,
    pub next_track: String,
    pub prev_track: String,
    pub shuffle: String,
    pub repeat: String,
    pub volume_up: String,
    pub volume_down: String,

    // Recently played list
    pub nav_up: String,
    pub nav_down: String,
    pub play_selected: String,
    pub refresh_recent: String,

    // Widget size
    pub scale_up: String,
    pub scale_down: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            play_pause: "Space".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),
            shuffle: "z".to_string(),
            repeat: "x".to_string(),
            volume_up: "+".to_string(),
            volume_down: "-".to_string(),

            nav_up: "Up".to_string(),
            nav_down: "Down".to_string(),
            play_selected: "Enter".to_string(),
            refresh_recent: "r".to_string(),

            scale_up: "]".to_string(),
            scale_down: "[".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s if s.chars().count() == 1 => match s.chars().next() {
                // Uppercase bindings also fire for shift+lowercase
                Some(ch) if ch.is_uppercase() => {
                    event.code == KeyCode::Char(ch)
                        || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                            && event.modifiers.contains(KeyModifiers::SHIFT))
                }
                Some(ch) => event.code == KeyCode::Char(ch),
                None => false,
            },
            _ => false,
        }
    }

    // Helper for UI display
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "Enter" => "⏎".to_string(),
            _ => key_str.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_matches_named_and_char_keys() {
        let keys = KeyConfig::default();
        assert!(keys.matches(key(KeyCode::Char(' ')), &keys.play_pause));
        assert!(keys.matches(key(KeyCode::Enter), &keys.play_selected));
        assert!(keys.matches(key(KeyCode::Char('+')), &keys.volume_up));
        assert!(!keys.matches(key(KeyCode::Char('m')), &keys.next_track));
    }

    #[test]
    fn test_uppercase_binding_accepts_shift() {
        let keys = KeyConfig::default();
        let shifted = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::SHIFT);
        assert!(keys.matches(shifted, "R"));
        assert!(!keys.matches(key(KeyCode::Char('r')), "R"));
    }
}
