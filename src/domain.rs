//! Domain logic
//!
//! This module contains the value types the rest of the crate passes around:
//! - Users and their postal location
//! - Paginated fetch results
//! - The closed error taxonomy
//! - Text processing utilities

pub mod error;
pub mod page;
pub mod text;
pub mod user;

pub use error::UserError;
pub use page::PagedUsers;
pub use user::{User, UserLocation};
