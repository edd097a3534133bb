//! Presentation layer
//!
//! This module contains UI components and widgets:
//! - Screen components rendered from `AppState`
//! - Reusable widgets
//! - Configuration (keybindings)

pub mod components;
pub mod config;
pub mod widgets;
