//! RECENT ACTIVITIES bar chart and its tooltip overlay.

use super::helpers::{centered_x, panel_title, truncate_to_width, Focus};
use crate::chart::{bar_eighths, bucket_span, partial_block};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Rows between the chart panel's top edge and the tooltip
const TOOLTIP_OFFSET_Y: u16 = 3;

impl super::App {
    pub(super) fn render_activity_chart(&mut self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let is_focused = self.focus == Focus::Chart;
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
            .title(panel_title("RECENT ACTIVITIES", title_color).alignment(Alignment::Left));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.cached_rects.chart_panel = Some(area);

        if self.records.is_empty() {
            let msg = Paragraph::new(Span::styled(
                "No activity yet",
                Style::default().fg(colors.text_muted),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(msg, inner);
            return;
        }
        if inner.height < 3 || inner.width == 0 {
            return;
        }
        self.cached_rects.chart = Some(inner);

        // value label on top, category labels on the bottom row
        let plot_rows = inner.height - 2;
        let label_y = inner.bottom() - 1;
        let base_y = label_y - 1;
        let n = self.records.len();
        let max = self.records.max_count();
        let bar_fill = colors.bar_gradient();

        for (k, record) in self.records.iter().enumerate() {
            let Some((start, end)) = bucket_span(k, inner.width, n) else {
                continue;
            };
            let span_w = end - start;
            if span_w == 0 {
                continue;
            }
            // one column of gap each side when there is room
            let (bar_x, bar_w) = if span_w >= 3 {
                (inner.x + start + 1, span_w - 2)
            } else {
                (inner.x + start, span_w)
            };

            let highlighted = is_focused && k == self.bar_cursor;
            let eighths = bar_eighths(record.count, max, plot_rows);
            let full_rows = (eighths / 8) as u16;
            let remainder = eighths % 8;

            let buf = frame.buffer_mut();
            for row in 0..full_rows {
                let y = base_y - row;
                let fg = bar_fill.row(row, plot_rows);
                for x in bar_x..bar_x + bar_w {
                    buf.set_string(x, y, "█", Style::default().fg(fg));
                }
            }
            let mut top = base_y + 1 - full_rows;
            if remainder > 0 && full_rows < plot_rows {
                let y = base_y - full_rows;
                let fg = bar_fill.row(full_rows, plot_rows);
                for x in bar_x..bar_x + bar_w {
                    buf.set_string(x, y, partial_block(remainder), Style::default().fg(fg));
                }
                top = y;
            }

            let value = record.count.to_string();
            if top > inner.y {
                let vx = centered_x(Rect::new(bar_x, 0, bar_w, 1), value.width());
                buf.set_string(
                    vx,
                    top - 1,
                    &value,
                    Style::default()
                        .fg(colors.text_primary)
                        .add_modifier(Modifier::BOLD),
                );
            }

            let label = truncate_to_width(&record.name, span_w as usize);
            let label_area = Rect::new(inner.x + start, label_y, span_w, 1);
            let label_style = if highlighted {
                Style::default()
                    .fg(colors.border_focus)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(colors.text_secondary)
            };
            buf.set_string(
                centered_x(label_area, label.width()),
                label_y,
                &label,
                label_style,
            );
        }
    }

    /// Fixed-position overlay for the selected activity: centered in the
    /// frame, a fixed offset below the chart panel's top edge.
    pub(super) fn render_tooltip(&mut self, frame: &mut Frame) {
        let Some(record) = self
            .tooltip
            .visible_record()
            .and_then(|id| self.records.get(id))
        else {
            return;
        };
        let Some(panel) = self.cached_rects.chart_panel else {
            return;
        };
        let colors = self.theme.colors();
        let frame_area = frame.area();

        let lines = vec![
            Line::from(Span::styled(
                format!("Activity: {}", record.name),
                Style::default()
                    .fg(colors.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Progress: {}", record.count),
                Style::default().fg(colors.text_secondary),
            )),
        ];
        let text_w = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = (text_w + 4).min(frame_area.width);
        let height = 4u16.min(frame_area.height);
        let x = frame_area.x + (frame_area.width - width) / 2;
        let y = (panel.y + TOOLTIP_OFFSET_Y).min(frame_area.bottom().saturating_sub(height));
        let area = Rect::new(x, y, width, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.text_muted))
            .style(Style::default().bg(colors.bg_tooltip));
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
    }
}
