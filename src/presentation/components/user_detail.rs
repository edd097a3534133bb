use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{AppState, UserDetailUiState},
    domain::User,
};

#[derive(Debug, Clone, Default)]
pub struct UserDetailComponent;

impl UserDetailComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("User detail")
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1));

        let paragraph = match &state.user_detail.ui {
            UserDetailUiState::Loading => Paragraph::new("Loading…").alignment(Alignment::Center),
            UserDetailUiState::Error(message) => {
                Paragraph::new(format!("{message}\nPress R to retry"))
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
            }
            UserDetailUiState::Success(user) => {
                Paragraph::new(Self::lines(user)).wrap(Wrap { trim: true })
            }
        };

        frame.render_widget(paragraph.block(block), area);
    }

    /// Labelled fields shown for a user
    pub fn lines(user: &User) -> Vec<Line<'static>> {
        let field = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
                Span::raw(value),
            ])
        };

        vec![
            Line::from(Span::styled(user.full_name(), Style::default().bold())),
            Line::default(),
            field("Email", user.email.clone()),
            field("Phone", user.phone.clone()),
            field("Nationality", user.nationality.clone()),
            field("Address", user.formatted_location()),
            field("Picture", user.large_picture_url.clone()),
            field("Thumbnail", user.thumbnail_url.clone()),
        ]
    }
}
