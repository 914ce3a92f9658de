use crate::app::App;
use crate::ui::utils::{queue_label, truncate};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Queue preview, recently played list and the current widget size.
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let width = area.width.saturating_sub(2) as usize;
    let green = theme.green;
    let muted = theme.overlay;

    let mut lines = vec![Line::from(vec![
        Span::styled(" Up next  ", Style::default().fg(green)),
        Span::styled(
            truncate(&queue_label(app.playback.snapshot()), width.saturating_sub(10)),
            Style::default().fg(theme.text),
        ),
    ])];

    // Rows left between the queue line and the size line
    let list_h = (area.height as usize).saturating_sub(3);
    if list_h > 0 {
        lines.push(Line::from(Span::styled(
            " Recently played",
            Style::default().fg(green),
        )));

        if app.recent().is_empty() {
            lines.push(Line::from(Span::styled("   Nothing yet", Style::default().fg(muted))));
        }

        let start_idx = app
            .recent_selected
            .saturating_sub(list_h / 2)
            .min(app.recent().len().saturating_sub(list_h));

        for (idx, item) in app.recent().iter().enumerate().skip(start_idx).take(list_h) {
            let is_sel = idx == app.recent_selected;
            let (marker, style) = if is_sel {
                (
                    "●",
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", Style::default().fg(muted))
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", marker),
                    Style::default().fg(if is_sel { green } else { theme.surface }),
                ),
                Span::styled(truncate(&item.label(), width.saturating_sub(3)), style),
            ]));
        }
    }

    let lines_above = (area.height as usize).saturating_sub(1);
    lines.truncate(lines_above);
    lines.resize(lines_above, Line::default());
    lines.push(Line::from(Span::styled(
        format!(" Size: {} px", app.scale.px()),
        Style::default().fg(muted),
    )));

    f.render_widget(Paragraph::new(lines), area);
}
