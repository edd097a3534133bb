use crate::{
    core::{cmd::Cmd, msg::user_detail::UserDetailMsg},
    domain::User,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserDetailUiState {
    #[default]
    Loading,
    Success(User),
    Error(String),
}

/// Detail screen state for a single cached user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDetailState {
    pub user_id: Option<String>,
    pub ui: UserDetailUiState,
}

impl UserDetailState {
    pub fn update(&mut self, msg: UserDetailMsg) -> Vec<Cmd> {
        match msg {
            UserDetailMsg::Load { user_id } => {
                self.user_id = Some(user_id);
                self.reload()
            }

            UserDetailMsg::Retry => self.reload(),

            UserDetailMsg::Loaded { user_id, result } => {
                // A lookup for a screen that was left in the meantime
                if self.user_id.as_deref() != Some(user_id.as_str()) {
                    return vec![];
                }
                self.ui = match result {
                    Ok(user) => UserDetailUiState::Success(user),
                    Err(error) => UserDetailUiState::Error(error.user_message()),
                };
                vec![]
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn reload(&mut self) -> Vec<Cmd> {
        match &self.user_id {
            Some(user_id) => {
                self.ui = UserDetailUiState::Loading;
                vec![Cmd::LoadUserDetail {
                    user_id: user_id.clone(),
                }]
            }
            None => vec![],
        }
    }
}
