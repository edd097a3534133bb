use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::{
    core::cmd::UiEvent,
    domain::{User, UserError},
};

/// Raw messages from external sources (input, background services, system)
/// These represent unprocessed external events that need to be translated to domain events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawMsg {
    // System events
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Suspend,
    Resume,

    // User input (raw keyboard events)
    Key(KeyEvent),

    // Cache observer
    UsersChanged(Vec<User>),

    // Fetch service results
    PageFetched {
        page: i32,
        result: Result<i32, UserError>,
    },
    UserLoaded {
        user_id: String,
        result: Result<User, UserError>,
    },

    // One-off events emitted by the update functions
    Ui(UiEvent),

    // System status
    Error(String),
}

impl RawMsg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, RawMsg::Tick | RawMsg::Render)
    }
}
