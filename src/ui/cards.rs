//! Metric card row rendering.

use super::helpers::{centered_x, paint_gradient, panel_title, truncate_to_width, Focus};
use crate::activity::MetricCard;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 7;
pub const CARD_SPACING: u16 = 2;

/// How many whole cards fit in `width` columns
pub fn cards_that_fit(width: u16) -> usize {
    ((width + CARD_SPACING) / (CARD_WIDTH + CARD_SPACING)) as usize
}

impl super::App {
    /// METRICS row: fixed-size tiles, scrolled horizontally.
    pub(super) fn render_card_row(&mut self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let is_focused = self.focus == Focus::Cards;
        let title_color = if is_focused {
            colors.border_focus
        } else {
            colors.border_default
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if is_focused {
                colors.border_focus
            } else {
                colors.border_muted
            }))
            .title(panel_title("METRICS", title_color).alignment(Alignment::Center));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.cached_rects.card_row = Some(area);

        // Leave a column each side for overflow markers
        let lane = Rect::new(
            inner.x.saturating_add(1),
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        self.cards_visible = cards_that_fit(lane.width).max(1);
        let max_scroll = self.cards.len().saturating_sub(self.cards_visible);
        self.card_scroll = self.card_scroll.min(max_scroll);

        let mut x = lane.x;
        for index in self.card_scroll..self.cards.len() {
            if x + CARD_WIDTH > lane.right() {
                break;
            }
            let tile = Rect::new(x, lane.y, CARD_WIDTH, CARD_HEIGHT.min(lane.height));
            let selected = is_focused && index == self.card_cursor;
            render_card(frame, tile, &self.cards[index], selected);
            self.cached_rects.card_tiles.push((index, tile));
            x += CARD_WIDTH + CARD_SPACING;
        }

        let marker = Style::default()
            .fg(colors.text_primary)
            .add_modifier(Modifier::BOLD);
        let mid = inner.y + inner.height / 2;
        if self.card_scroll > 0 && inner.width > 0 {
            frame.buffer_mut().set_string(inner.x, mid, "‹", marker);
        }
        let shown = self.cached_rects.card_tiles.len();
        if self.card_scroll + shown < self.cards.len() && inner.width > 0 {
            frame
                .buffer_mut()
                .set_string(inner.right() - 1, mid, "›", marker);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &MetricCard, selected: bool) {
    paint_gradient(frame.buffer_mut(), area, card.gradient);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(card.gradient.end)
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let caption = truncate_to_width(&card.caption, inner.width as usize);
    let rows: [(&str, Style); 3] = [
        (card.icon, Style::default().fg(Color::White)),
        (
            &card.value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        (&caption, Style::default().fg(Color::Rgb(235, 235, 245))),
    ];
    // icon, value and caption spaced down the tile
    for (i, (text, style)) in rows.iter().enumerate() {
        let y = inner.y + (i as u16) * 2;
        if y >= inner.bottom() {
            break;
        }
        let x = centered_x(inner, text.width());
        frame.buffer_mut().set_string(x, y, *text, *style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{sample_card_styles, ActivityRecords};
    use crate::config::ShellConfig;
    use crate::ui::tests::{app, draw, screen_text};
    use crate::ui::App;

    #[test]
    fn test_cards_that_fit() {
        assert_eq!(cards_that_fit(24), 1);
        assert_eq!(cards_that_fit(49), 1);
        assert_eq!(cards_that_fit(50), 2);
        assert_eq!(cards_that_fit(10), 0);
    }

    #[test]
    fn test_tiles_render_in_record_order() {
        let mut app = app();
        let terminal = draw(&mut app, 90, 30);
        let text = screen_text(&terminal);
        assert!(text.contains("24"));
        assert!(text.contains("Swift Basics"));

        let order: Vec<usize> = app.cached_rects.card_tiles.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1, 2]);
        let xs: Vec<u16> = app.cached_rects.card_tiles.iter().map(|(_, r)| r.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));

        let row = text.lines().find(|l| l.contains("Swift Basics")).unwrap();
        let a = row.find("Swift Basics").unwrap();
        let b = row.find("UI/UX Design").unwrap();
        let c = row.find("Combine Tutorial").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_narrow_row_scrolls() {
        let mut app = app();
        draw(&mut app, 40, 30);
        assert_eq!(app.cards_visible, 1);
        assert_eq!(app.cached_rects.card_tiles.len(), 1);
        assert!(screen_text(&draw(&mut app, 40, 30)).contains('›'));

        let row = app.cached_rects.card_row.unwrap();
        let scroll = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::ScrollDown,
            column: row.x + 2,
            row: row.y + 2,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert!(app.handle_mouse_event(scroll, std::time::Instant::now()));
        let terminal = draw(&mut app, 40, 30);
        assert_eq!(app.cached_rects.card_tiles[0].0, 1);
        assert!(screen_text(&terminal).contains('‹'));

        // keyboard selection keeps the cursor on screen
        app.card_cursor = 1;
        app.move_cursor(1);
        assert_eq!(app.card_scroll, 2);
    }

    #[test]
    fn test_empty_row_renders() {
        let mut app = App::with_data(
            ShellConfig::default(),
            ActivityRecords::default(),
            &sample_card_styles(),
        );
        let terminal = draw(&mut app, 60, 24);
        assert!(app.cached_rects.card_tiles.is_empty());
        assert!(screen_text(&terminal).contains("METRICS"));
    }
}
