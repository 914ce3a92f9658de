use crate::app::{App, ArtworkState};
use crate::artwork::half_block_lines;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;

    if area.height < 1 {
        return;
    }

    match &app.artwork {
        ArtworkState::Loaded(raw_image) => {
            let image_lines = half_block_lines(raw_image, area.width, area.height);

            // Vertical centering
            let padding_top = (area.height as usize).saturating_sub(image_lines.len()) / 2;
            let mut lines = vec![Line::default(); padding_top];
            lines.extend(image_lines);

            let artwork_widget = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().style(Style::default().bg(Color::Reset)));
            f.render_widget(artwork_widget, area);
        }
        ArtworkState::Loading => {
            let p = Paragraph::new(centered(area, &["Loading..."]))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.yellow));
            f.render_widget(p, area);
        }
        ArtworkState::Failed | ArtworkState::Idle => {
            let p = Paragraph::new(centered(area, &["♪", "No Album Art"]))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.overlay));
            f.render_widget(p, area);
        }
    }
}

fn centered(area: Rect, text: &[&'static str]) -> Vec<Line<'static>> {
    let padding_top = (area.height as usize).saturating_sub(text.len()) / 2;
    let mut lines = vec![Line::default(); padding_top];
    lines.extend(text.iter().map(|t| Line::from(*t)));
    lines
}
