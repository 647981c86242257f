//! Favorites domain models and repository traits.
//!
//! A favorites collection is a per-identity set of liked sessions, products,
//! professionals and events, each kept as a denormalized snapshot.

mod bucket;
mod identity;
mod model;
mod repository;
mod view;

pub use bucket::Bucket;
pub use identity::{ANONYMOUS_PARTITION, Identity, STORAGE_KEY_PREFIX};
pub use model::{FavoriteCollection, FavoriteItem, Transition};
pub use repository::FavoritesRepository;
pub use view::{
    EventFavoriteView, FavoriteView, ProductFavoriteView, ProfessionalFavoriteView,
    SessionFavoriteView, project_entity,
};
