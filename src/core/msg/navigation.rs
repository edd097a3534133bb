use serde::{Deserialize, Serialize};

/// Screen transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMsg {
    OpenUserDetail { user_id: String },
    Back,
}
