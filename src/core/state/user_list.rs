//! User list view-model
//!
//! Combines the cached users with the pagination state into a single
//! renderable `UserListUiState`. The list content always comes from the cache
//! (`UsersChanged`); fetch outcomes only move the pagination state.

use crate::{
    core::{
        cmd::{Cmd, UiEvent},
        msg::user_list::UserListMsg,
        state::pagination::{FetchRequest, Message, PaginationState},
    },
    domain::{User, UserError},
};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// What the list screen renders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserListUiState {
    /// Nothing fetched yet
    #[default]
    Loading,
    /// The source has no users at all
    Empty,
    /// Failed with nothing cached to show
    Error { message: String },
    Success {
        users: Vec<User>,
        can_load_more: bool,
        is_loading_more: bool,
        is_refreshing: bool,
        /// Last failure while users are still shown
        error: Option<String>,
    },
}

impl UserListUiState {
    pub fn can_load_more(&self) -> bool {
        matches!(
            self,
            UserListUiState::Success {
                can_load_more: true,
                ..
            }
        )
    }

    pub fn users(&self) -> &[User] {
        match self {
            UserListUiState::Success { users, .. } => users,
            _ => &[],
        }
    }
}

/// Pure mapping from cache content and pagination state to the UI state
pub fn merge(users: &[User], pagination: &PaginationState) -> UserListUiState {
    let success = |can_load_more, is_loading_more, is_refreshing, error| UserListUiState::Success {
        users: users.to_vec(),
        can_load_more,
        is_loading_more,
        is_refreshing,
        error,
    };

    match pagination {
        PaginationState::InitialLoading => UserListUiState::Loading,
        PaginationState::LoadingMore { .. } => success(false, true, false, None),
        PaginationState::Refreshing => success(false, false, true, None),
        PaginationState::Idle {
            can_load_more: false,
            ..
        } if users.is_empty() => UserListUiState::Empty,
        PaginationState::Idle { can_load_more, .. } => success(*can_load_more, false, false, None),
        PaginationState::Error { message, .. } if users.is_empty() => UserListUiState::Error {
            message: message.clone(),
        },
        PaginationState::Error { message, .. } => success(false, false, false, Some(message.clone())),
    }
}

/// Message shown for a failed page fetch
pub fn fetch_error_message(error: &UserError) -> String {
    match error {
        UserError::Connectivity(_) | UserError::Server(_) => error.user_message(),
        UserError::NotFound(_) | UserError::Storage(_) => {
            "Failed to load users. Please try again.".to_string()
        }
    }
}

/// User list screen state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListState {
    pub users: Vec<User>,
    pub pagination: PaginationState,
    pub ui: UserListUiState,
    pub selected_index: Option<usize>,
    pub page_size: u32,
}

impl Default for UserListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl UserListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            users: Vec::new(),
            pagination: PaginationState::InitialLoading,
            ui: UserListUiState::Loading,
            selected_index: None,
            page_size,
        }
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selected_index.and_then(|i| self.users.get(i))
    }

    /// User list specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: UserListMsg) -> Vec<Cmd> {
        match msg {
            UserListMsg::LoadMore => self.paginate(Message::LoadMoreRequested),
            UserListMsg::Refresh => self.paginate(Message::RefreshRequested),
            UserListMsg::Retry => self.paginate(Message::RetryRequested),

            UserListMsg::UserClicked(user_id) => {
                vec![Cmd::Emit(UiEvent::NavigateToUserDetail { user_id })]
            }

            UserListMsg::OpenSelected => match self.selected_user() {
                Some(user) => vec![Cmd::Emit(UiEvent::NavigateToUserDetail {
                    user_id: user.id().to_string(),
                })],
                None => vec![],
            },

            UserListMsg::SelectNext => {
                self.selected_index = match self.selected_index {
                    _ if self.users.is_empty() => None,
                    None => Some(0),
                    Some(i) => Some((i + 1).min(self.users.len() - 1)),
                };
                self.load_more_at_end()
            }

            UserListMsg::SelectPrevious => {
                self.selected_index = match self.selected_index {
                    _ if self.users.is_empty() => None,
                    None => Some(0),
                    Some(i) => Some(i.saturating_sub(1)),
                };
                vec![]
            }

            UserListMsg::SelectFirst => {
                self.selected_index = (!self.users.is_empty()).then_some(0);
                vec![]
            }

            UserListMsg::SelectLast => {
                self.selected_index = self.users.len().checked_sub(1);
                self.load_more_at_end()
            }

            UserListMsg::UsersChanged(users) => {
                self.users = users;
                self.selected_index = match self.selected_index {
                    Some(_) if self.users.is_empty() => None,
                    Some(i) => Some(i.min(self.users.len() - 1)),
                    None => None,
                };
                self.refresh_ui();
                vec![]
            }

            UserListMsg::PageFetched { page, result } => {
                if self.pagination.requested_page() != Some(page) {
                    log::debug!("Ignoring stale result for page {page}");
                    return vec![];
                }
                match result {
                    Ok(next_page) => self.paginate(Message::FetchSucceeded { next_page }),
                    Err(error) => {
                        let message = fetch_error_message(&error);
                        let mut cmds = self.paginate(Message::FetchFailed {
                            message: message.clone(),
                        });
                        if !self.users.is_empty() {
                            cmds.push(Cmd::Emit(UiEvent::ShowTransientError { message }));
                        }
                        cmds
                    }
                }
            }
        }
    }

    fn paginate(&mut self, message: Message) -> Vec<Cmd> {
        let request = self.pagination.update(message);
        self.refresh_ui();
        match request {
            Some(FetchRequest { page }) => vec![Cmd::FetchPage {
                page,
                page_size: self.page_size,
            }],
            None => vec![],
        }
    }

    fn load_more_at_end(&mut self) -> Vec<Cmd> {
        let at_end = matches!(self.selected_index, Some(i) if i + 1 == self.users.len());
        if at_end && self.ui.can_load_more() {
            self.paginate(Message::LoadMoreRequested)
        } else {
            vec![]
        }
    }

    /// Recompute the UI state; it is only replaced when the merge result
    /// actually differs
    fn refresh_ui(&mut self) -> bool {
        let next = merge(&self.users, &self.pagination);
        if next == self.ui {
            false
        } else {
            self.ui = next;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_helpers::users_fixture;

    fn fetched(page: i32, result: Result<i32, UserError>) -> UserListMsg {
        UserListMsg::PageFetched { page, result }
    }

    fn success(users: Vec<User>, can_load_more: bool) -> UserListUiState {
        UserListUiState::Success {
            users,
            can_load_more,
            is_loading_more: false,
            is_refreshing: false,
            error: None,
        }
    }

    /// State after the first page of `n` users has arrived
    fn loaded(n: usize, next_page: i32) -> UserListState {
        let mut state = UserListState::default();
        state.update(UserListMsg::LoadMore);
        state.update(UserListMsg::UsersChanged(users_fixture(0..n)));
        state.update(fetched(1, Ok(next_page)));
        state
    }

    #[test]
    fn test_merge_initial_loading() {
        assert_eq!(
            merge(&users_fixture(0..3), &PaginationState::InitialLoading),
            UserListUiState::Loading
        );
    }

    #[test]
    fn test_merge_loading_more_hides_load_more() {
        let users = users_fixture(0..2);
        assert_eq!(
            merge(&users, &PaginationState::LoadingMore { next_page: 2 }),
            UserListUiState::Success {
                users,
                can_load_more: false,
                is_loading_more: true,
                is_refreshing: false,
                error: None,
            }
        );
    }

    #[test]
    fn test_merge_refreshing() {
        let users = users_fixture(0..2);
        assert_eq!(
            merge(&users, &PaginationState::Refreshing),
            UserListUiState::Success {
                users,
                can_load_more: false,
                is_loading_more: false,
                is_refreshing: true,
                error: None,
            }
        );
    }

    #[rstest]
    #[case(true, 3)]
    #[case(false, -1)]
    fn test_merge_idle(#[case] can_load_more: bool, #[case] next_page: i32) {
        let users = users_fixture(0..4);
        assert_eq!(
            merge(
                &users,
                &PaginationState::Idle {
                    can_load_more,
                    next_page
                }
            ),
            success(users, can_load_more)
        );
    }

    #[test]
    fn test_merge_idle_exhausted_without_users_is_empty() {
        assert_eq!(
            merge(
                &[],
                &PaginationState::Idle {
                    can_load_more: false,
                    next_page: -1
                }
            ),
            UserListUiState::Empty
        );
    }

    #[test]
    fn test_merge_error_without_users() {
        let pagination = PaginationState::Error {
            next_page: 1,
            message: "Server error. Please try again later.".to_string(),
        };
        assert_eq!(
            merge(&[], &pagination),
            UserListUiState::Error {
                message: "Server error. Please try again later.".to_string()
            }
        );
    }

    #[test]
    fn test_merge_error_with_users_keeps_list() {
        let users = users_fixture(0..3);
        let pagination = PaginationState::Error {
            next_page: 2,
            message: "Server error. Please try again later.".to_string(),
        };
        assert_eq!(
            merge(&users, &pagination),
            UserListUiState::Success {
                users,
                can_load_more: false,
                is_loading_more: false,
                is_refreshing: false,
                error: Some("Server error. Please try again later.".to_string()),
            }
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let users = users_fixture(0..5);
        let pagination = PaginationState::Idle {
            can_load_more: true,
            next_page: 2,
        };
        assert_eq!(merge(&users, &pagination), merge(&users, &pagination));
    }

    #[rstest]
    #[case(UserError::Connectivity("refused".into()), "Network connection error. Please check your connection.")]
    #[case(UserError::Server("502".into()), "Server error. Please try again later.")]
    #[case(UserError::Storage("locked".into()), "Failed to load users. Please try again.")]
    #[case(UserError::NotFound("x".into()), "Failed to load users. Please try again.")]
    fn test_fetch_error_message(#[case] error: UserError, #[case] expected: &str) {
        assert_eq!(fetch_error_message(&error), expected);
    }

    #[test]
    fn test_first_load_requests_page_one() {
        let mut state = UserListState::default();
        let cmds = state.update(UserListMsg::LoadMore);

        assert_eq!(
            cmds,
            vec![Cmd::FetchPage {
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
            }]
        );
        assert_eq!(state.pagination, PaginationState::LoadingMore { next_page: 1 });
    }

    #[test]
    fn test_first_page_success_then_load_more_connectivity_failure() {
        let mut state = loaded(20, 2);
        assert_eq!(state.ui, success(users_fixture(0..20), true));

        let cmds = state.update(UserListMsg::LoadMore);
        assert_eq!(
            cmds,
            vec![Cmd::FetchPage {
                page: 2,
                page_size: DEFAULT_PAGE_SIZE,
            }]
        );

        let cmds = state.update(fetched(
            2,
            Err(UserError::Connectivity("timed out".to_string())),
        ));

        let message = "Network connection error. Please check your connection.".to_string();
        assert_eq!(
            cmds,
            vec![Cmd::Emit(UiEvent::ShowTransientError {
                message: message.clone()
            })]
        );
        assert_eq!(
            state.ui,
            UserListUiState::Success {
                users: users_fixture(0..20),
                can_load_more: false,
                is_loading_more: false,
                is_refreshing: false,
                error: Some(message),
            }
        );
        assert_eq!(state.pagination.next_page(), 2);
    }

    #[test]
    fn test_failure_without_users_shows_error_and_no_event() {
        let mut state = UserListState::default();
        state.update(UserListMsg::LoadMore);

        let cmds = state.update(fetched(1, Err(UserError::Server("500".to_string()))));

        assert!(cmds.is_empty());
        assert_eq!(
            state.ui,
            UserListUiState::Error {
                message: "Server error. Please try again later.".to_string()
            }
        );
    }

    #[test]
    fn test_retry_resumes_failed_page() {
        let mut state = loaded(20, 2);
        state.update(UserListMsg::LoadMore);
        state.update(fetched(2, Err(UserError::Server("503".to_string()))));

        let cmds = state.update(UserListMsg::Retry);

        assert_eq!(
            cmds,
            vec![Cmd::FetchPage {
                page: 2,
                page_size: DEFAULT_PAGE_SIZE,
            }]
        );
    }

    #[test]
    fn test_refresh_fetches_page_one() {
        let mut state = loaded(20, 2);
        let cmds = state.update(UserListMsg::Refresh);

        assert_eq!(
            cmds,
            vec![Cmd::FetchPage {
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
            }]
        );
        assert!(matches!(
            state.ui,
            UserListUiState::Success {
                is_refreshing: true,
                ..
            }
        ));
    }

    #[test]
    fn test_requests_while_fetching_emit_nothing() {
        let mut state = UserListState::default();
        state.update(UserListMsg::LoadMore);

        assert!(state.update(UserListMsg::LoadMore).is_empty());
        assert!(state.update(UserListMsg::Refresh).is_empty());
        assert!(state.update(UserListMsg::Retry).is_empty());
    }

    #[test]
    fn test_exhausted_list_does_not_fetch() {
        let mut state = loaded(7, -1);
        assert_eq!(state.ui, success(users_fixture(0..7), false));
        assert!(state.update(UserListMsg::LoadMore).is_empty());
    }

    #[test]
    fn test_stale_page_result_is_ignored() {
        let mut state = loaded(20, 2);
        let before = state.clone();

        let cmds = state.update(fetched(1, Err(UserError::Server("late".to_string()))));

        assert!(cmds.is_empty());
        assert_eq!(state, before);
    }

    #[rstest]
    #[case(2, UserListUiState::Success {
        users: vec![],
        can_load_more: true,
        is_loading_more: false,
        is_refreshing: false,
        error: None,
    })]
    #[case(-1, UserListUiState::Empty)]
    fn test_page_result_before_cache_emission_converges(
        #[case] next_page: i32,
        #[case] interim: UserListUiState,
    ) {
        let mut state = UserListState::default();
        state.update(UserListMsg::LoadMore);
        state.update(fetched(1, Ok(next_page)));
        assert_eq!(state.ui, interim);

        state.update(UserListMsg::UsersChanged(users_fixture(0..20)));
        assert_eq!(state.ui, success(users_fixture(0..20), next_page > 0));
        assert_eq!(state, loaded(20, next_page));
    }

    #[test]
    fn test_users_changed_updates_success_list() {
        let mut state = loaded(20, 2);
        state.update(UserListMsg::UsersChanged(users_fixture(0..40)));
        assert_eq!(state.ui.users().len(), 40);
    }

    #[test]
    fn test_selection_reaching_end_loads_more() {
        let mut state = loaded(3, 2);

        assert!(state.update(UserListMsg::SelectNext).is_empty());
        assert_eq!(state.selected_index, Some(0));
        assert!(state.update(UserListMsg::SelectNext).is_empty());

        let cmds = state.update(UserListMsg::SelectNext);
        assert_eq!(state.selected_index, Some(2));
        assert_eq!(
            cmds,
            vec![Cmd::FetchPage {
                page: 2,
                page_size: DEFAULT_PAGE_SIZE,
            }]
        );

        // Already fetching: staying at the end does not start another fetch.
        assert!(state.update(UserListMsg::SelectNext).is_empty());
        assert_eq!(state.selected_index, Some(2));
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = loaded(5, -1);

        state.update(UserListMsg::SelectPrevious);
        assert_eq!(state.selected_index, Some(0));
        state.update(UserListMsg::SelectPrevious);
        assert_eq!(state.selected_index, Some(0));

        state.update(UserListMsg::SelectLast);
        assert_eq!(state.selected_index, Some(4));
        state.update(UserListMsg::SelectFirst);
        assert_eq!(state.selected_index, Some(0));

        state.update(UserListMsg::SelectLast);
        state.update(UserListMsg::UsersChanged(users_fixture(0..2)));
        assert_eq!(state.selected_index, Some(1));

        state.update(UserListMsg::UsersChanged(vec![]));
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_open_selected_emits_navigation_once() {
        let mut state = loaded(3, 2);
        assert!(state.update(UserListMsg::OpenSelected).is_empty());

        state.update(UserListMsg::SelectNext);
        let cmds = state.update(UserListMsg::OpenSelected);

        assert_eq!(
            cmds,
            vec![Cmd::Emit(UiEvent::NavigateToUserDetail {
                user_id: "user0@example.com".to_string()
            })]
        );
    }

    #[test]
    fn test_user_clicked_emits_navigation() {
        let mut state = UserListState::default();
        assert_eq!(
            state.update(UserListMsg::UserClicked("someone@example.com".to_string())),
            vec![Cmd::Emit(UiEvent::NavigateToUserDetail {
                user_id: "someone@example.com".to_string()
            })]
        );
    }
}
