use crate::app::App;
use crate::player::format_time;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render_progress(f: &mut Frame, area: Rect, app: &mut App) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;

    let gauge_area_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1];

    let duration = app.playback.snapshot().duration_ms;
    let current_pos = app.current_position_ms();
    let ratio = if duration > 0 {
        current_pos as f64 / duration as f64
    } else {
        0.0
    };

    let width = gauge_area_rect.width as usize;
    let occupied_width = (width as f64 * ratio.clamp(0.0, 1.0)) as usize;
    let fill_style = Style::default().fg(theme.green);
    let empty_style = Style::default().fg(theme.surface);

    let bar_spans: Vec<Span> = (0..width)
        .map(|i| {
            if i + 1 == occupied_width {
                Span::styled("●", fill_style)
            } else if i < occupied_width {
                Span::styled("━", fill_style)
            } else {
                Span::styled("─", empty_style)
            }
        })
        .collect();

    let gauge_p = Paragraph::new(Line::from(bar_spans))
        .alignment(Alignment::Left)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(gauge_p, gauge_area_rect);
}

pub fn render_time(f: &mut Frame, area: Rect, app: &mut App) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let time_str = format!(
        "{} / {}",
        format_time(app.current_position_ms()),
        app.playback.snapshot().total_label()
    );
    let time_label = Paragraph::new(time_str)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.overlay));
    f.render_widget(time_label, area);
}
