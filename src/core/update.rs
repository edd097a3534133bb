use crate::{
    core::cmd::Cmd,
    core::msg::{
        navigation::NavigationMsg, user_detail::UserDetailMsg, user_list::UserListMsg, Msg,
    },
    core::state::{AppState, Screen},
};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    match msg {
        // System messages (delegated to SystemState)
        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        // User list messages (delegated to UserListState)
        Msg::UserList(user_list_msg) => {
            let commands = state.user_list.update(user_list_msg);
            (state, commands)
        }

        // User detail messages (delegated to UserDetailState)
        Msg::UserDetail(user_detail_msg) => {
            let commands = state.user_detail.update(user_detail_msg);
            (state, commands)
        }

        Msg::Navigation(NavigationMsg::OpenUserDetail { user_id }) => {
            log::info!("Opening detail for {user_id}");
            state.screen = Screen::UserDetail;
            let commands = state.user_detail.update(UserDetailMsg::Load { user_id });
            (state, commands)
        }

        Msg::Navigation(NavigationMsg::Back) => {
            if state.screen == Screen::UserDetail {
                state.screen = Screen::UserList;
                state.user_detail.clear();
            }
            (state, vec![])
        }
    }
}

/// Messages sent once when the runtime starts
pub fn init() -> Vec<Msg> {
    vec![Msg::UserList(UserListMsg::LoadMore)]
}
