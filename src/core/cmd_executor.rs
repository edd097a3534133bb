use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::{Cmd, TuiCommand},
        raw_msg::RawMsg,
    },
    infrastructure::fetch_service::FetchOperation,
};

/// Command executor that bridges Elm commands to the background services and
/// the host
#[derive(Clone)]
pub struct CmdExecutor {
    fetch_sender: mpsc::UnboundedSender<FetchOperation>,
    raw_sender: mpsc::UnboundedSender<RawMsg>,
    tui_sender: Option<mpsc::UnboundedSender<TuiCommand>>,
}

impl CmdExecutor {
    /// `raw_sender` carries emitted UI events back into the runtime
    pub fn new(
        fetch_sender: mpsc::UnboundedSender<FetchOperation>,
        raw_sender: mpsc::UnboundedSender<RawMsg>,
    ) -> Self {
        Self {
            fetch_sender,
            raw_sender,
            tui_sender: None,
        }
    }

    /// Inject TUI command sender for executing TuiCommand asynchronously.
    pub fn set_tui_sender(&mut self, sender: mpsc::UnboundedSender<TuiCommand>) {
        self.tui_sender = Some(sender);
    }

    pub fn execute_command(&self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::FetchPage { page, page_size } => {
                log::debug!("Requesting page {page}");
                self.fetch_sender.send(FetchOperation::FetchPage {
                    page: *page,
                    page_size: *page_size,
                })?;
            }

            Cmd::LoadUserDetail { user_id } => {
                self.fetch_sender.send(FetchOperation::LoadUser {
                    user_id: user_id.clone(),
                })?;
            }

            Cmd::Emit(event) => {
                self.raw_sender.send(RawMsg::Ui(event.clone()))?;
            }

            Cmd::Tui(tui_cmd) => {
                if let Some(tx) = &self.tui_sender {
                    let _ = tx.send(tui_cmd.clone());
                } else {
                    log::warn!("CmdExecutor: TUI sender not configured; dropping {tui_cmd:?}");
                }
            }
        }

        Ok(())
    }

    /// Execute multiple commands, logging failures instead of stopping
    pub fn execute_commands(&self, commands: &[Cmd]) -> Vec<String> {
        let mut failures = Vec::new();

        for cmd in commands {
            if let Err(e) = self.execute_command(cmd) {
                let error_msg = format!("Failed to execute {}: {e}", cmd.name());
                log::error!("{error_msg}");
                failures.push(error_msg);
            }
        }

        failures
    }
}

/// Extension trait for Cmd to get human-readable names
trait CmdName {
    fn name(&self) -> String;
}

impl CmdName for Cmd {
    fn name(&self) -> String {
        match self {
            Cmd::FetchPage { page, .. } => format!("FetchPage({page})"),
            Cmd::LoadUserDetail { .. } => "LoadUserDetail".to_string(),
            Cmd::Emit(..) => "Emit".to_string(),
            Cmd::Tui(TuiCommand::Resize { .. }) => "Tui(Resize)".to_string(),
        }
    }
}
