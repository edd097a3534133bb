//! Status bar component
//!
//! Key hints for the active screen and the current notification.

use ratatui::{prelude::*, widgets::Clear};

use crate::{
    core::state::{AppState, Screen},
    presentation::widgets::status_bar::StatusBarWidget,
};

const LIST_HINTS: &str = "j/k: move  enter: open  m: more  r: refresh  R: retry  esc: dismiss  q: quit";
const DETAIL_HINTS: &str = "esc: back  R: retry  q: quit";

#[derive(Debug, Clone, Default)]
pub struct StatusBarComponent;

impl StatusBarComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn hints(screen: Screen) -> &'static str {
        match screen {
            Screen::UserList => LIST_HINTS,
            Screen::UserDetail => DETAIL_HINTS,
        }
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        frame.render_widget(
            StatusBarWidget::new(Self::hints(state.screen), state.system.notification.as_ref()),
            area,
        );
    }
}
