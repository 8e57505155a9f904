//! Full-screen detail page for one activity.

use super::helpers::paint_gradient;
use crate::activity::RecordId;
use crate::theme::Gradient;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

impl super::App {
    pub(super) fn render_detail(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        record_id: RecordId,
        gradient: Gradient,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        paint_gradient(frame.buffer_mut(), chunks[1], gradient);

        let Some(record) = self.records.get(record_id).cloned() else {
            self.render_title_bar(frame, chunks[0], "", true);
            self.render_status_bar(frame, chunks[2]);
            return;
        };
        self.render_title_bar(frame, chunks[0], &record.name, true);

        let white = Style::default().fg(Color::White);
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                record.name.clone(),
                white.add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Count  ", white.add_modifier(Modifier::DIM)),
                Span::styled(record.count.to_string(), white.add_modifier(Modifier::BOLD)),
            ]),
            Line::from(""),
        ];
        if record.description.is_empty() {
            lines.push(Line::from(Span::styled(
                "No description",
                white.add_modifier(Modifier::DIM | Modifier::ITALIC),
            )));
        } else {
            lines.push(Line::from(Span::styled(record.description.clone(), white)));
        }

        let body = Rect::new(
            chunks[1].x.saturating_add(4),
            chunks[1].y,
            chunks[1].width.saturating_sub(8),
            chunks[1].height,
        );
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );
        self.render_status_bar(frame, chunks[2]);
    }
}
