use crate::app::App;
use crate::player::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Dispatch(Intent),
    RefreshRecent,
    None,
}

pub fn handle_key(key: KeyEvent, app: &mut App) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let keys = &app.keys;

    if keys.matches(key, &keys.quit) {
        return Action::Quit;
    }
    if keys.matches(key, &keys.play_pause) {
        return Action::Dispatch(Intent::TogglePlayback);
    }
    if keys.matches(key, &keys.next_track) {
        return Action::Dispatch(Intent::Next);
    }
    if keys.matches(key, &keys.prev_track) {
        return Action::Dispatch(Intent::Previous);
    }
    if keys.matches(key, &keys.shuffle) {
        return Action::Dispatch(Intent::ToggleShuffle);
    }
    if keys.matches(key, &keys.repeat) {
        return Action::Dispatch(Intent::CycleRepeat);
    }
    if keys.matches(key, &keys.refresh_recent) {
        return Action::RefreshRecent;
    }

    if keys.matches(key, &keys.volume_up) {
        return Action::Dispatch(Intent::SetVolume(app.volume_up()));
    }
    if keys.matches(key, &keys.volume_down) {
        return Action::Dispatch(Intent::SetVolume(app.volume_down()));
    }

    if keys.matches(key, &keys.nav_up) {
        app.select_prev();
        return Action::None;
    }
    if keys.matches(key, &keys.nav_down) {
        app.select_next();
        return Action::None;
    }
    if keys.matches(key, &keys.play_selected) {
        return match app.selected_recent() {
            Some((index, item)) => Action::Dispatch(Intent::SelectRecent { index, item }),
            None => Action::None,
        };
    }

    if keys.matches(key, &keys.scale_up) {
        app.scale = app.scale.grow();
        return Action::None;
    }
    if keys.matches(key, &keys.scale_down) {
        app.scale = app.scale.shrink();
        return Action::None;
    }

    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::UserConfig;
    use crate::player::{PlaybackSnapshot, RecentItem, Sequenced};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_controls_map_to_intents() {
        let mut app = App::new(&UserConfig::default());
        assert_eq!(
            handle_key(press(KeyCode::Char(' ')), &mut app),
            Action::Dispatch(Intent::TogglePlayback)
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('x')), &mut app),
            Action::Dispatch(Intent::CycleRepeat)
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('+')), &mut app),
            Action::Dispatch(Intent::SetVolume(55))
        );
        // Not applied until the command is queued
        assert_eq!(app.volume, 50);
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut app), Action::Quit);
    }

    #[test]
    fn test_enter_needs_a_recent_list() {
        let mut app = App::new(&UserConfig::default());
        assert_eq!(handle_key(press(KeyCode::Enter), &mut app), Action::None);

        let recent: Vec<RecentItem> = (0..3)
            .map(|i| RecentItem {
                name: format!("Track {}", i),
                artist: "Artist".into(),
                uri: format!("spotify:track:{}", i),
            })
            .collect();
        app.apply_poll(Sequenced {
            seq: 1,
            value: Ok(PlaybackSnapshot {
                recently_played: recent.clone(),
                ..PlaybackSnapshot::default()
            }),
        });
        handle_key(press(KeyCode::Down), &mut app);
        handle_key(press(KeyCode::Down), &mut app);
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut app),
            Action::Dispatch(Intent::SelectRecent {
                index: 2,
                item: recent[2].clone(),
            })
        );
    }

    #[test]
    fn test_scale_keys_adjust_width() {
        let mut app = App::new(&UserConfig::default());
        handle_key(press(KeyCode::Char(']')), &mut app);
        assert_eq!(app.scale.px(), 460);
        handle_key(press(KeyCode::Char('[')), &mut app);
        handle_key(press(KeyCode::Char('[')), &mut app);
        assert_eq!(app.scale.px(), 440);
    }
}
