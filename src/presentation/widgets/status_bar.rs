use ratatui::{prelude::*, widgets::Paragraph};

use crate::core::state::system::Notification;

/// Bottom two rows: key hints, then the current notification
pub struct StatusBarWidget<'a> {
    hints: &'a str,
    notification: Option<&'a Notification>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(hints: &'a str, notification: Option<&'a Notification>) -> Self {
        Self {
            hints,
            notification,
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),    // Main content area (not used by status bar)
                Constraint::Length(1), // Key hints line
                Constraint::Length(1), // Notification line
            ],
        )
        .split(area);

        Paragraph::new(Span::styled(
            self.hints,
            Style::default().fg(Color::Gray).italic(),
        ))
        .style(Style::default().bg(Color::Black))
        .render(layout[1], buf);

        if let Some(notification) = self.notification {
            Paragraph::new(Span::styled(
                notification.message.as_str(),
                Style::default().fg(Color::Red),
            ))
            .render(layout[2], buf);
        }
    }
}
