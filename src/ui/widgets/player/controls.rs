use crate::app::App;
use crate::icons::Icon;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const VOLUME_BAR: usize = 20;

fn toggle_style(theme: &Theme, icon: Icon) -> Style {
    if icon.is_active() {
        Style::default().fg(theme.green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.overlay)
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let snapshot = app.playback.snapshot();

    let shuffle = Icon::for_shuffle(snapshot.shuffle_on);
    let repeat = Icon::for_repeat(snapshot.repeat_mode);
    let play = Icon::for_playback(snapshot.is_playing);
    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Volume
        ])
        .split(area);

    let buttons = Line::from(vec![
        Span::styled(shuffle.glyph(), toggle_style(theme, shuffle)),
        Span::raw("   "),
        Span::styled(Icon::Prev.glyph(), btn_style),
        Span::raw("   "),
        Span::styled(play.glyph(), btn_style),
        Span::raw("   "),
        Span::styled(Icon::Next.glyph(), btn_style),
        Span::raw("   "),
        Span::styled(repeat.glyph(), toggle_style(theme, repeat)),
    ]);
    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        chunks[0],
    );

    if chunks[2].height == 0 {
        return;
    }

    let filled_width = (VOLUME_BAR as f64 * app.volume as f64 / 100.0).round() as usize;
    let mut bar_spans = vec![Span::styled(
        format!("{} ", Icon::Volume.glyph()),
        Style::default().fg(theme.overlay),
    )];
    bar_spans.extend((0..VOLUME_BAR).map(|i| {
        if i < filled_width {
            Span::styled("━", Style::default().fg(theme.green))
        } else {
            Span::styled("─", Style::default().fg(theme.surface))
        }
    }));
    bar_spans.push(Span::styled(
        format!(" {:>3}%", app.volume),
        Style::default().fg(theme.overlay),
    ));

    f.render_widget(
        Paragraph::new(Line::from(bar_spans)).alignment(Alignment::Center),
        chunks[2],
    );
}
