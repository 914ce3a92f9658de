use crate::app::App;
use crate::artwork::half_block_lines;
use crate::icons::Icon;
use crate::ui::layout::get_card_layout;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub mod art;
pub mod controls;
pub mod info;
pub mod progress;

use super::recent;

const LOGO_COLS: u16 = 4;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    let window_hints = Line::from(vec![
        Span::styled(Icon::Minimize.glyph(), Style::default().fg(theme.overlay)),
        Span::raw(" "),
        Span::styled(Icon::Close.glyph(), Style::default().fg(theme.overlay)),
        Span::raw(" "),
    ])
    .right_aligned();

    let card = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title_top(window_hints)
        .border_style(Style::default().fg(theme.surface))
        .style(Style::default().bg(Color::Reset));

    let inner = card.inner(area);
    f.render_widget(card, area);

    let layout = get_card_layout(inner);

    render_header(f, layout.header, app);
    art::render(f, layout.art, app);
    info::render(f, layout.info, app);
    progress::render_progress(f, layout.gauge, app);
    progress::render_time(f, layout.time, app);
    controls::render(f, layout.controls, app);
    recent::render(f, layout.extras, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LOGO_COLS + 1), Constraint::Min(0)])
        .split(area);

    // Glyph until the cached logo arrives
    let logo = match &app.logo {
        Some(img) => Paragraph::new(half_block_lines(img, LOGO_COLS, area.height)),
        None => Paragraph::new(Span::styled(
            format!(" {}", Icon::Spotify.glyph()),
            Style::default().fg(theme.green),
        )),
    };
    f.render_widget(logo, chunks[0]);

    let title = Paragraph::new(Line::from(Span::styled(
        "Spotify",
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, chunks[1]);
}
