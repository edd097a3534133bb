//! Reusable UI widgets
//!
//! This module contains widgets shared by the screen components.

pub mod status_bar;
pub mod user_card;
