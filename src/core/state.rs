pub mod pagination;
pub mod system;
pub mod user_detail;
pub mod user_list;

use crate::infrastructure::config::Config;

pub use pagination::PaginationState;
pub use system::SystemState;
pub use user_detail::{UserDetailState, UserDetailUiState};
pub use user_list::{UserListState, UserListUiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    UserList,
    UserDetail,
}

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub screen: Screen,
    pub user_list: UserListState,
    pub user_detail: UserDetailState,
    pub system: SystemState,
    pub config: ConfigState,
}

/// Configuration state - holds all user-configurable settings
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Current configuration loaded from file
    pub config: Config,
}

impl AppState {
    pub fn new_with_config(config: Config) -> Self {
        let page_size = config.paging.results_per_page;
        Self {
            user_list: UserListState::new(page_size),
            config: ConfigState { config },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_app_state_starts_on_loading_list() {
        let state = AppState::default();
        assert_eq!(state.screen, Screen::UserList);
        assert_eq!(state.user_list.ui, UserListUiState::Loading);
        assert!(!state.system.should_quit);
    }

    #[test]
    fn test_page_size_comes_from_config() {
        let mut config = Config::default();
        config.paging.results_per_page = 7;

        let state = AppState::new_with_config(config);

        assert_eq!(state.user_list.page_size, 7);
    }
}
