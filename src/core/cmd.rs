use serde::{Deserialize, Serialize};

/// UI (TUI) specific sub-commands executed by the host/runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuiCommand {
    Resize { width: u16, height: u16 },
}

/// One-off events for the host. Each is consumed exactly once, unlike state
/// which is re-read on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    NavigateToUserDetail { user_id: String },
    ShowTransientError { message: String },
}

/// Elm-like command definitions
/// Represents side effects (network communication, cache reads, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Fetch one page through the repository; exactly one per pagination
    /// transition that asks for it
    FetchPage { page: i32, page_size: u32 },
    /// Point lookup in the local cache for the detail screen
    LoadUserDetail {
        user_id: String,
    },
    Emit(UiEvent),

    // UI-related commands
    Tui(TuiCommand),
}
