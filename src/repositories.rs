//! Repositories
//!
//! Coordinate the remote and local data sources. The local cache is the single
//! source of truth the UI observes.

pub mod user;

pub use user::UserRepository;
