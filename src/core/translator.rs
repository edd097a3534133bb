use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    core::{
        cmd::UiEvent,
        msg::{
            navigation::NavigationMsg, system::SystemMsg, user_detail::UserDetailMsg,
            user_list::UserListMsg, Msg,
        },
        raw_msg::RawMsg,
        state::{AppState, Screen},
    },
    presentation::config::keybindings::Action,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        RawMsg::Resume => vec![Msg::System(SystemMsg::Resume)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],
        RawMsg::Tick => vec![Msg::System(SystemMsg::Tick)],

        // User input - translate based on screen and key bindings
        RawMsg::Key(key) => translate_key_event(key, state),

        // Background results
        RawMsg::UsersChanged(users) => vec![Msg::UserList(UserListMsg::UsersChanged(users))],
        RawMsg::PageFetched { page, result } => {
            vec![Msg::UserList(UserListMsg::PageFetched { page, result })]
        }
        RawMsg::UserLoaded { user_id, result } => {
            vec![Msg::UserDetail(UserDetailMsg::Loaded { user_id, result })]
        }

        RawMsg::Ui(UiEvent::NavigateToUserDetail { user_id }) => {
            vec![Msg::Navigation(NavigationMsg::OpenUserDetail { user_id })]
        }
        RawMsg::Ui(UiEvent::ShowTransientError { message }) => {
            vec![Msg::System(SystemMsg::ShowError(message))]
        }

        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        // Rendering is orchestrated by the runner
        RawMsg::Render => vec![],
    }
}

/// Translates keyboard input to domain events based on current application state
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    // Ctrl-C always quits, even with a broken keybinding table
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        return vec![Msg::System(SystemMsg::Quit)];
    }

    match state.config.config.keybindings.action_for(key) {
        Some(action) => translate_action_to_msg(action, state),
        None => vec![],
    }
}

fn translate_action_to_msg(action: Action, state: &AppState) -> Vec<Msg> {
    match (action, state.screen) {
        (Action::Quit, _) => vec![Msg::System(SystemMsg::Quit)],
        (Action::Suspend, _) => vec![Msg::System(SystemMsg::Suspend)],

        (Action::ScrollDown, Screen::UserList) => vec![Msg::UserList(UserListMsg::SelectNext)],
        (Action::ScrollUp, Screen::UserList) => vec![Msg::UserList(UserListMsg::SelectPrevious)],
        (Action::ScrollToTop, Screen::UserList) => vec![Msg::UserList(UserListMsg::SelectFirst)],
        (Action::ScrollToBottom, Screen::UserList) => {
            vec![Msg::UserList(UserListMsg::SelectLast)]
        }
        (Action::Open, Screen::UserList) => vec![Msg::UserList(UserListMsg::OpenSelected)],
        (Action::LoadMore, Screen::UserList) => vec![Msg::UserList(UserListMsg::LoadMore)],
        (Action::Refresh, Screen::UserList) => vec![Msg::UserList(UserListMsg::Refresh)],
        (Action::Retry, Screen::UserList) => vec![Msg::UserList(UserListMsg::Retry)],
        (Action::Back, Screen::UserList) if state.system.notification.is_some() => {
            vec![Msg::System(SystemMsg::ClearNotification)]
        }

        (Action::Back, Screen::UserDetail) => vec![Msg::Navigation(NavigationMsg::Back)],
        (Action::Retry | Action::Refresh, Screen::UserDetail) => {
            vec![Msg::UserDetail(UserDetailMsg::Retry)]
        }

        _ => vec![],
    }
}
