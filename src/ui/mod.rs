pub mod layout;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;

use crate::app::App;
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    let main_layout = layout::get_main_layout(f.area(), app.scale);

    widgets::player::render(f, main_layout.card_area, app);

    let theme = &app.theme;
    let keys = &app.keys;
    let hint = Line::from(vec![
        Span::styled(
            format!(" {} ", keys.display(&keys.play_pause)),
            Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
        ),
        Span::styled("play ", Style::default().fg(theme.overlay)),
        Span::styled(
            format!(" {}/{} ", keys.display(&keys.scale_down), keys.display(&keys.scale_up)),
            Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
        ),
        Span::styled("size ", Style::default().fg(theme.overlay)),
        Span::styled(
            format!(" {} ", keys.display(&keys.quit)),
            Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
        ),
        Span::styled("quit ", Style::default().fg(theme.overlay)),
    ]);
    f.render_widget(
        Paragraph::new(hint).alignment(Alignment::Right),
        main_layout.footer_area,
    );

    widgets::popups::render(f, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::UserConfig;
    use crate::player::{PlaybackSnapshot, PollError, Sequenced};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_idle_card_shows_placeholders() {
        let mut app = App::new(&UserConfig::default());
        let text = screen(&mut app);
        assert!(text.contains("No track playing"));
        assert!(text.contains("No artist"));
        assert!(text.contains("No queue"));
        assert!(text.contains("Size: 450 px"));
    }

    #[test]
    fn test_error_note_sits_under_track_text() {
        let mut app = App::new(&UserConfig::default());
        app.apply_poll(Sequenced {
            seq: 1,
            value: Ok(PlaybackSnapshot {
                is_playing: true,
                track_name: "Karma Police".into(),
                artist_name: "Radiohead".into(),
                duration_ms: 264_000,
                ..PlaybackSnapshot::default()
            }),
        });
        app.apply_poll(Sequenced {
            seq: 2,
            value: Err(PollError::Transient("timeout".into())),
        });

        let text = screen(&mut app);
        assert!(text.contains("Karma Police"));
        assert!(text.contains("Error fetching track"));
    }
}
