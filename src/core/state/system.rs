use crate::core::{
    cmd::{Cmd, TuiCommand},
    msg::system::SystemMsg,
};

/// Ticks a notification stays visible
pub const NOTIFICATION_TICKS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub remaining_ticks: u32,
}

/// System-related state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemState {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub notification: Option<Notification>,
}

impl SystemState {
    /// System-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: SystemMsg) -> Vec<Cmd> {
        match msg {
            SystemMsg::Quit => {
                self.should_quit = true;
                vec![]
            }

            SystemMsg::Suspend => {
                self.should_suspend = true;
                vec![]
            }

            SystemMsg::Resume => {
                self.should_suspend = false;
                vec![]
            }

            SystemMsg::Resize(width, height) => {
                vec![Cmd::Tui(TuiCommand::Resize { width, height })]
            }

            SystemMsg::Tick => {
                if let Some(notification) = &mut self.notification {
                    notification.remaining_ticks = notification.remaining_ticks.saturating_sub(1);
                    if notification.remaining_ticks == 0 {
                        self.notification = None;
                    }
                }
                vec![]
            }

            SystemMsg::ShowError(message) => {
                self.notification = Some(Notification {
                    message,
                    remaining_ticks: NOTIFICATION_TICKS,
                });
                vec![]
            }

            SystemMsg::ClearNotification => {
                self.notification = None;
                vec![]
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_state_quit_isolated() {
        let mut system = SystemState::default();
        assert!(!system.should_quit);

        let cmds = system.update(SystemMsg::Quit);

        assert!(system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_suspend_and_resume() {
        let mut system = SystemState::default();
        system.update(SystemMsg::Suspend);
        assert!(system.should_suspend);
        system.update(SystemMsg::Resume);
        assert!(!system.should_suspend);
    }

    #[test]
    fn test_resize_generates_tui_command() {
        let mut system = SystemState::default();
        assert_eq!(
            system.update(SystemMsg::Resize(80, 24)),
            vec![Cmd::Tui(TuiCommand::Resize {
                width: 80,
                height: 24
            })]
        );
    }

    #[test]
    fn test_notification_expires_after_ticks() {
        let mut system = SystemState::default();
        system.update(SystemMsg::ShowError("Server error. Please try again later.".to_string()));
        assert!(system.notification.is_some());

        for _ in 1..NOTIFICATION_TICKS {
            system.update(SystemMsg::Tick);
        }
        assert!(system.notification.is_some());

        system.update(SystemMsg::Tick);
        assert_eq!(system.notification, None);
    }

    #[test]
    fn test_new_notification_replaces_old() {
        let mut system = SystemState::default();
        system.update(SystemMsg::ShowError("first".to_string()));
        system.update(SystemMsg::Tick);
        system.update(SystemMsg::ShowError("second".to_string()));

        assert_eq!(
            system.notification,
            Some(Notification {
                message: "second".to_string(),
                remaining_ticks: NOTIFICATION_TICKS,
            })
        );

        system.update(SystemMsg::ClearNotification);
        assert_eq!(system.notification, None);
    }
}
