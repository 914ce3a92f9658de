use crate::app::UiScale;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

pub struct MainLayout {
    pub card_area: Rect,
    pub footer_area: Rect,
}

/// Centre a card as wide as the scale asks for, or the terminal allows.
pub fn get_main_layout(area: Rect, scale: UiScale) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Card
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let width = scale.columns().min(chunks[0].width);
    let [card_area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(chunks[0]);

    MainLayout {
        card_area,
        footer_area: chunks[1],
    }
}

pub struct CardLayout {
    pub header: Rect,
    pub art: Rect,
    pub info: Rect,
    pub gauge: Rect,
    pub time: Rect,
    pub controls: Rect,
    pub extras: Rect,
}

/// Split the inside of the card. Art takes whatever the fixed rows leave.
pub fn get_card_layout(inner: Rect) -> CardLayout {
    // Tiny mode: no art, no recent list
    let (art_min, extras_len) = if inner.height < 18 { (0, 2) } else { (4, 8) };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // Logo + title
            Constraint::Min(art_min),        // Art
            Constraint::Length(3),           // Title, artist, error note
            Constraint::Length(1),           // Gauge
            Constraint::Length(1),           // Time
            Constraint::Length(3),           // Controls + volume
            Constraint::Length(extras_len), // Queue, recent, size
        ])
        .split(inner);

    CardLayout {
        header: chunks[0],
        art: chunks[1],
        info: chunks[2],
        gauge: chunks[3],
        time: chunks[4],
        controls: chunks[5],
        extras: chunks[6],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_width_follows_scale() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = get_main_layout(area, UiScale::new(450));
        assert_eq!(layout.card_area.width, 45);
        let left = layout.card_area.x;
        let right = area.width - layout.card_area.right();
        assert!(left.abs_diff(right) <= 1, "left {} right {}", left, right);
        assert_eq!(layout.footer_area.y, 39);
    }

    #[test]
    fn test_card_never_wider_than_terminal() {
        let area = Rect::new(0, 0, 40, 20);
        let layout = get_main_layout(area, UiScale::new(800));
        assert_eq!(layout.card_area.width, 40);
    }
}
