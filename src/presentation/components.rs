//! Screen components
//!
//! Components are stateless renderers that receive state as parameters.

use ratatui::prelude::*;

use crate::core::state::{AppState, Screen};

pub mod status_bar;
pub mod user_detail;
pub mod user_list;

pub use status_bar::StatusBarComponent;
pub use user_detail::UserDetailComponent;
pub use user_list::UserListComponent;

/// Collection of all components
#[derive(Debug, Clone, Default)]
pub struct Components {
    pub user_list: UserListComponent,
    pub user_detail: UserDetailComponent,
    pub status_bar: StatusBarComponent,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the active screen and the status bar
    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Min(0),    // Active screen
                Constraint::Length(2), // Status bar (2 rows)
            ])
            .split(frame.area());

        match state.screen {
            Screen::UserList => self.user_list.view(state, frame, layout[0]),
            Screen::UserDetail => self.user_detail.view(state, frame, layout[0]),
        }
        self.status_bar.view(state, frame, layout[1]);
    }
}
