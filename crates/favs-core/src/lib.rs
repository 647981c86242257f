//! Domain layer of the favs workspace.
//!
//! # Module Structure
//!
//! - `favorite`: collections, items, buckets, identities and per-type views
//! - `storage`: the key-value substrate trait
//! - `notice`: the user-facing notification channel
//! - `config`: runtime configuration model
//! - `error`: the shared error type

pub mod config;
pub mod error;
pub mod favorite;
pub mod notice;
pub mod storage;

// Re-export common error type
pub use error::FavsError;
