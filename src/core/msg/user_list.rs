use serde::{Deserialize, Serialize};

use crate::domain::{User, UserError};

/// Messages specific to UserListState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserListMsg {
    // Requests from the user
    LoadMore,
    Refresh,
    Retry,
    UserClicked(String),
    OpenSelected,

    // Selection
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,

    // Background results
    UsersChanged(Vec<User>),
    /// Outcome of the fetch for `page`; `Ok` carries the next page cursor
    PageFetched {
        page: i32,
        result: Result<i32, UserError>,
    },
}

impl UserListMsg {
    /// Messages that move the selection
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            UserListMsg::SelectNext
                | UserListMsg::SelectPrevious
                | UserListMsg::SelectFirst
                | UserListMsg::SelectLast
        )
    }
}
