use serde::{Deserialize, Serialize};

use crate::domain::{User, UserError};

/// Messages specific to UserDetailState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserDetailMsg {
    Load { user_id: String },
    Loaded {
        user_id: String,
        result: Result<User, UserError>,
    },
    Retry,
}
