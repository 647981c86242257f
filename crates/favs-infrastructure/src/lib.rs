//! Infrastructure layer of the favs workspace.
//!
//! Durable storage (key-value backends, versioned DTOs, the favorites
//! repository), configuration loading, path management and notifiers.

pub mod config_service;
pub mod dto;
pub mod favorites_repository;
pub mod notifier;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::favorites_repository::KeyValueFavoritesRepository;
pub use crate::notifier::{ChannelNotifier, TracingNotifier};
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, open_store};
