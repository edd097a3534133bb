//! User list screen
//!
//! Renders `UserListUiState` as a selectable list with a footer describing
//! the pagination status.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{AppState, UserListUiState},
    presentation::widgets::user_card::UserCard,
};

const TITLE: &str = "Random users";

#[derive(Debug, Clone, Default)]
pub struct UserListComponent;

impl UserListComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let list = &state.user_list;
        let block = Block::default().title(TITLE).borders(Borders::ALL);

        match &list.ui {
            UserListUiState::Loading => {
                Self::render_message(frame, area, block, "Loading users…", Style::default())
            }
            UserListUiState::Empty => Self::render_message(
                frame,
                area,
                block,
                "No users to display",
                Style::default().fg(Color::DarkGray),
            ),
            UserListUiState::Error { message } => Self::render_message(
                frame,
                area,
                block,
                &format!("{message}\nPress R to retry"),
                Style::default().fg(Color::Red),
            ),
            UserListUiState::Success {
                users,
                is_refreshing,
                ..
            } => {
                let block = if *is_refreshing {
                    block.title(Line::from(" refreshing… ").right_aligned())
                } else {
                    block
                };
                let inner = block.inner(area);
                frame.render_widget(block, area);

                let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
                let width = layout[0].width.saturating_sub(2) as usize;
                let items: Vec<ListItem> = users
                    .iter()
                    .map(|user| UserCard::new(user, width).into())
                    .collect();
                let widget = List::new(items)
                    .highlight_symbol("> ")
                    .highlight_style(Style::default().bg(Color::DarkGray));
                let mut list_state = ListState::default().with_selected(list.selected_index);
                frame.render_stateful_widget(widget, layout[0], &mut list_state);

                let (footer, style) = Self::footer(&list.ui);
                frame.render_widget(Paragraph::new(Span::styled(footer, style)), layout[1]);
            }
        }
    }

    /// Pagination status line shown under the list
    pub fn footer(ui: &UserListUiState) -> (String, Style) {
        match ui {
            UserListUiState::Success {
                error: Some(message),
                ..
            } => (format!("{message} (R to retry)"), Style::default().fg(Color::Red)),
            UserListUiState::Success {
                is_loading_more: true,
                ..
            } => ("Loading more…".to_string(), Style::default().fg(Color::Yellow)),
            UserListUiState::Success {
                is_refreshing: true,
                ..
            } => ("Refreshing…".to_string(), Style::default().fg(Color::Yellow)),
            UserListUiState::Success {
                can_load_more: true,
                users,
                ..
            } => (
                format!("{} users · m to load more", users.len()),
                Style::default().fg(Color::Gray),
            ),
            UserListUiState::Success { users, .. } => (
                format!("{} users · end of list", users.len()),
                Style::default().fg(Color::DarkGray),
            ),
            _ => (String::new(), Style::default()),
        }
    }

    fn render_message(frame: &mut Frame, area: Rect, block: Block, message: &str, style: Style) {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(message.to_string())
                .style(style)
                .alignment(Alignment::Center),
            inner,
        );
    }
}
