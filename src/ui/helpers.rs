//! Helper functions and shared types for UI rendering

use crate::theme::Gradient;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Focus {
    Cards,
    Chart,
}

/// What a mouse position landed on
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Hit {
    Card(usize),
    CardRow,
    Chart,
    Back,
}

/// Cached rectangles for mouse hit-testing
/// Updated during render to match exactly what's displayed
#[derive(Default, Clone, Debug)]
pub struct PanelRects {
    pub card_row: Option<Rect>,
    pub card_tiles: Vec<(usize, Rect)>,
    /// Inner plot area; clicks are mapped relative to its left edge
    pub chart: Option<Rect>,
    /// Panel including border, used to place the tooltip
    pub chart_panel: Option<Rect>,
    pub back: Option<Rect>,
}

impl PanelRects {
    pub fn find(&self, x: u16, y: u16) -> Option<Hit> {
        if Self::contains_point(self.back, x, y) {
            return Some(Hit::Back);
        }
        if let Some((i, _)) = self
            .card_tiles
            .iter()
            .find(|(_, r)| Self::contains_point(Some(*r), x, y))
        {
            return Some(Hit::Card(*i));
        }
        if Self::contains_point(self.card_row, x, y) {
            return Some(Hit::CardRow);
        }
        if Self::contains_point(self.chart, x, y) {
            return Some(Hit::Chart);
        }
        None
    }

    #[inline(always)]
    pub fn contains_point(rect: Option<Rect>, x: u16, y: u16) -> bool {
        rect.is_some_and(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
    }
}

/// Fill `area` with a top-to-bottom gradient background
pub fn paint_gradient(buf: &mut Buffer, area: Rect, gradient: Gradient) {
    for (i, y) in (area.top()..area.bottom()).enumerate() {
        let bg = gradient.row(i as u16, area.height);
        buf.set_style(Rect::new(area.x, y, area.width, 1), Style::default().bg(bg));
    }
}

/// Truncate to a display width, adding an ellipsis when cut
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(max_width + 3);
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Column where text of display width `text_width` starts when centered in `area`
pub fn centered_x(area: Rect, text_width: usize) -> u16 {
    let text_width = text_width.min(area.width as usize) as u16;
    area.x + (area.width - text_width) / 2
}

/// Title for a bordered panel, matching focused/unfocused styling
pub fn panel_title(title: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {} ", title),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Swift Basics", 20), "Swift Basics");
        assert_eq!(truncate_to_width("Combine Tutorial", 8), "Combine…");
        assert_eq!(truncate_to_width("abc", 0), "");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_find_prefers_tiles_over_row() {
        let rects = PanelRects {
            card_row: Some(Rect::new(0, 5, 80, 9)),
            card_tiles: vec![(0, Rect::new(1, 6, 24, 7)), (1, Rect::new(27, 6, 24, 7))],
            chart: Some(Rect::new(1, 16, 78, 10)),
            ..Default::default()
        };
        assert_eq!(rects.find(2, 7), Some(Hit::Card(0)));
        assert_eq!(rects.find(30, 12), Some(Hit::Card(1)));
        assert_eq!(rects.find(60, 7), Some(Hit::CardRow));
        assert_eq!(rects.find(10, 20), Some(Hit::Chart));
        assert_eq!(rects.find(10, 40), None);
    }

    #[test]
    fn test_centered_x() {
        assert_eq!(centered_x(Rect::new(10, 0, 20, 1), 10), 15);
        assert_eq!(centered_x(Rect::new(0, 0, 4, 1), 10), 0);
    }
}
