use serde::{Deserialize, Serialize};

pub mod navigation;
pub mod system;
pub mod user_detail;
pub mod user_list;

use navigation::NavigationMsg;
use system::SystemMsg;
use user_detail::UserDetailMsg;
use user_list::UserListMsg;

/// Domain messages representing application intent and business logic
/// These are processed by the update function and represent pure domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // System operations (delegated to SystemState)
    System(SystemMsg),

    // User list operations (delegated to UserListState)
    UserList(UserListMsg),

    // User detail operations (delegated to UserDetailState)
    UserDetail(UserDetailMsg),

    // Screen changes (handled by the top-level update)
    Navigation(NavigationMsg),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        match self {
            Msg::System(msg) => msg.is_frequent(),
            _ => false,
        }
    }
}
