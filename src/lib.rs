//! # randomusers - Random User TUI Client
//!
//! A terminal client that browses users from the randomuser.me API page by
//! page, built with Rust and Ratatui. Fetched users are cached locally (SQLite
//! or in memory) and the list view observes that cache.
//!
//! ## Architecture Overview
//!
//! The crate follows the Elm architecture:
//!
//! - **Model** (`core::state`): Application state, one sub-state per screen
//! - **Message** (`core::msg`): Events that can change the state
//! - **Update** (`core::update`): Pure functions that transform state
//! - **Command** (`core::cmd`): Side effects (fetching, navigation events)
//! - **View** (`presentation::components`): Rendering from the current state
//!
//! ## Example Usage
//!
//! ```rust
//! use randomusers::{
//!     core::{msg::{user_list::UserListMsg, Msg}, state::AppState, update::update},
//!     Cmd,
//! };
//!
//! let state = AppState::default();
//! let (state, cmds) = update(Msg::UserList(UserListMsg::LoadMore), state);
//!
//! assert!(state.user_list.pagination.is_fetching());
//! assert!(matches!(cmds.as_slice(), [Cmd::FetchPage { page: 1, .. }]));
//! ```
//!
//! ## Modules
//!
//! - [`core`] - State, messages, update and commands
//! - [`domain`] - User model and error taxonomy
//! - [`infrastructure`] - HTTP client, local cache, terminal, config
//! - [`repositories`] - Remote/local coordination
//! - [`integration`] - Runtime wiring the core to the services
//! - [`presentation`] - Components, widgets and keybindings

#![allow(dead_code)]

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod repositories;
pub mod utils;

#[doc(hidden)]
pub mod test_helpers;

// Re-exports for convenience
pub use crate::core::{
    cmd::Cmd, msg::Msg, raw_msg::RawMsg, state::AppState, translator::translate_raw_to_domain,
    update::update,
};
pub use integration::elm_integration::{ElmRuntime, ElmRuntimeStats};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
