//! Infrastructure layer
//!
//! External integrations and services:
//! - TUI foundation and CLI argument processing
//! - Configuration loading
//! - Remote user API and local user cache
//! - Background fetch service

pub mod cli;
pub mod config;
pub mod fetch_service;
pub mod local;
pub mod remote;
pub mod tui;
