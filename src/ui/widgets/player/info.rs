use crate::app::App;
use crate::ui::utils::{track_lines, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Title, artist and, below them, the note for a failed poll.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let (title, artist) = track_lines(app.playback.snapshot());
    let max_width = area.width.saturating_sub(4) as usize;

    let mut info_text = vec![
        Line::from(Span::styled(
            truncate(&title, max_width),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&artist, max_width),
            Style::default().fg(theme.overlay),
        )),
    ];

    if let Some(note) = app.playback.error_note() {
        info_text.push(Line::from(Span::styled(
            truncate(&note, max_width),
            Style::default().fg(theme.red),
        )));
    }

    let info = Paragraph::new(info_text)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(info, area);
}
