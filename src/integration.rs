//! Integration layer
//!
//! Ties the Elm core to the terminal and the background services.

pub mod app_runner;
pub mod elm_integration;
