//! The favorites store.
//!
//! A two-tier cache of one identity's favorites: the in-memory collection is
//! authoritative, the repository is a write-through shadow read once when an
//! identity signs in. Every mutation persists the whole collection and
//! publishes a new snapshot before returning.

use chrono::Utc;
use favs_core::favorite::{
    Bucket, EventFavoriteView, FavoriteCollection, FavoriteItem, FavoriteView, FavoritesRepository,
    Identity, ProductFavoriteView, ProfessionalFavoriteView, SessionFavoriteView, Transition,
    project_entity,
};
use favs_core::FavsError;
use favs_core::notice::{Notice, Notifier};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

/// Lifecycle of the store for the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// No identity; buckets are empty and mutations are rejected.
    Unauthenticated,
    /// An identity was acquired and its durable collection is being read.
    Loading,
    /// The collection reflects the durable tier (or is empty after a failed load).
    Ready,
}

/// What a toggle call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Nothing changed: not signed in, or the entity was unusable.
    Rejected,
}

/// Point-in-time view of the store, published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesSnapshot {
    pub status: StoreStatus,
    pub identity: Option<Identity>,
    pub collection: FavoriteCollection,
}

impl FavoritesSnapshot {
    fn unauthenticated() -> Self {
        Self {
            status: StoreStatus::Unauthenticated,
            identity: None,
            collection: FavoriteCollection::new(),
        }
    }
}

/// Shared favorites state for every consumer of the application.
///
/// All mutations go through [`toggle`](Self::toggle) and the `clear_*`
/// methods. They take one write lock for scan, mutate, persist and publish,
/// so concurrent callers are serialized and the durable write order matches
/// the mutation order. No method returns an error: storage faults are logged
/// and the in-memory state stays authoritative.
pub struct FavoritesStore {
    state: RwLock<FavoritesSnapshot>,
    repository: Arc<dyn FavoritesRepository>,
    notifier: Arc<dyn Notifier>,
    publisher: watch::Sender<FavoritesSnapshot>,
}

impl FavoritesStore {
    /// Creates an unauthenticated store.
    pub fn new(repository: Arc<dyn FavoritesRepository>, notifier: Arc<dyn Notifier>) -> Self {
        let (publisher, _) = watch::channel(FavoritesSnapshot::unauthenticated());
        Self {
            state: RwLock::new(FavoritesSnapshot::unauthenticated()),
            repository,
            notifier,
            publisher,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, FavoritesSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, FavoritesSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &FavoritesSnapshot) {
        self.publisher.send_replace(state.clone());
    }

    // ============================================================================
    // Identity transitions
    // ============================================================================

    /// Acquires `identity` and loads its durable collection.
    ///
    /// Any previous identity's collection is dropped from memory first. A
    /// missing or unreadable blob yields an empty collection. Signing in
    /// again as the identity that is already ready keeps the in-memory state.
    pub fn sign_in(&self, identity: Identity) {
        let mut state = self.write_state();

        if state.status == StoreStatus::Ready && state.identity.as_ref() == Some(&identity) {
            tracing::debug!(partition = %identity, "Identity already signed in");
            return;
        }

        state.status = StoreStatus::Loading;
        state.identity = Some(identity.clone());
        state.collection = FavoriteCollection::new();
        self.publish(&state);

        state.collection = self.load_collection(&identity);
        state.status = StoreStatus::Ready;
        self.publish(&state);

        tracing::info!(
            partition = %identity,
            total = state.collection.total_count(),
            "Favorites ready"
        );
    }

    /// Drops the current identity. The durable copy is left untouched.
    pub fn sign_out(&self) {
        let mut state = self.write_state();
        if let Some(identity) = state.identity.take() {
            tracing::info!(partition = %identity, "Favorites signed out");
        }
        *state = FavoritesSnapshot::unauthenticated();
        self.publish(&state);
    }

    fn load_collection(&self, identity: &Identity) -> FavoriteCollection {
        match self.repository.load(identity) {
            Ok(Some(mut collection)) => {
                let dropped = collection.dedupe();
                if dropped > 0 {
                    tracing::warn!(
                        partition = %identity,
                        dropped,
                        "Dropped duplicate favorites from persisted collection"
                    );
                }
                collection
            }
            Ok(None) => FavoriteCollection::new(),
            Err(e) => {
                tracing::warn!(
                    partition = %identity,
                    error = %e,
                    "Failed to load favorites, starting empty"
                );
                FavoriteCollection::new()
            }
        }
    }

    fn persist(&self, identity: &Identity, collection: &FavoriteCollection) {
        if let Err(e) = self.repository.save(identity, collection) {
            tracing::warn!(partition = %identity, error = %e, "Failed to persist favorites");
        }
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Adds `item` to `bucket` if absent, removes it if present.
    ///
    /// Rejected with a login notice when no identity is ready. Items without
    /// a snapshot time are stamped with the current time when added.
    pub fn toggle(&self, bucket: Bucket, item: FavoriteItem) -> ToggleOutcome {
        let (outcome, notice) = {
            let mut state = self.write_state();
            let Some(identity) = ready_identity(&state) else {
                drop(state);
                self.notifier.notify(login_required());
                return ToggleOutcome::Rejected;
            };

            let label = display_label(bucket, &item.title);
            let item = match item.saved_at {
                Some(_) => item,
                None => item.with_saved_at(Utc::now()),
            };

            let id = item.id.clone();
            let (outcome, notice) = match state.collection.toggle(bucket, item) {
                Transition::Added => (
                    ToggleOutcome::Added,
                    Notice::success(format!("{} added to favorites", label)),
                ),
                Transition::Removed(removed) => (
                    ToggleOutcome::Removed,
                    Notice::success(format!(
                        "{} removed from favorites",
                        display_label(bucket, &removed.title)
                    )),
                ),
            };
            tracing::debug!(partition = %identity, %bucket, %id, ?outcome, "Toggled favorite");

            self.persist(&identity, &state.collection);
            self.publish(&state);
            (outcome, notice)
        };

        self.notifier.notify(notice);
        outcome
    }

    /// Normalizes a raw entity (all of its fields kept) and toggles it.
    pub fn toggle_entity(&self, bucket: Bucket, entity: &Value) -> ToggleOutcome {
        if !self.is_ready() {
            self.notifier.notify(login_required());
            return ToggleOutcome::Rejected;
        }

        match FavoriteItem::normalize(entity.clone()) {
            Ok(item) => self.toggle(bucket, item),
            Err(e) => self.reject_entity(bucket, &e),
        }
    }

    /// Projects `entity` through view `V` and toggles the result in `V::BUCKET`.
    pub fn toggle_view<V: FavoriteView, T: Serialize + ?Sized>(&self, entity: &T) -> ToggleOutcome {
        if !self.is_ready() {
            self.notifier.notify(login_required());
            return ToggleOutcome::Rejected;
        }

        let projected = serde_json::to_value(entity)
            .map_err(FavsError::from)
            .and_then(|value| project_entity::<V>(&value));

        match projected {
            Ok(item) => self.toggle(V::BUCKET, item),
            Err(e) => self.reject_entity(V::BUCKET, &e),
        }
    }

    /// Toggles a wellness session, keeping the session field subset.
    pub fn toggle_session_favorite<T: Serialize + ?Sized>(&self, session: &T) -> ToggleOutcome {
        self.toggle_view::<SessionFavoriteView, T>(session)
    }

    /// Toggles a product, keeping price, currency and stock among others.
    pub fn toggle_product_favorite<T: Serialize + ?Sized>(&self, product: &T) -> ToggleOutcome {
        self.toggle_view::<ProductFavoriteView, T>(product)
    }

    /// Toggles a professional, keeping name, specialties and rating among others.
    pub fn toggle_professional_favorite<T: Serialize + ?Sized>(
        &self,
        professional: &T,
    ) -> ToggleOutcome {
        self.toggle_view::<ProfessionalFavoriteView, T>(professional)
    }

    /// Toggles an event, keeping date, time and capacity among others.
    pub fn toggle_event_favorite<T: Serialize + ?Sized>(&self, event: &T) -> ToggleOutcome {
        self.toggle_view::<EventFavoriteView, T>(event)
    }

    fn reject_entity(&self, bucket: Bucket, error: &FavsError) -> ToggleOutcome {
        tracing::warn!(%bucket, %error, "Rejected favorite entity");
        self.notifier.notify(Notice::error(format!(
            "This {} cannot be added to favorites",
            bucket.singular()
        )));
        ToggleOutcome::Rejected
    }

    /// Empties one bucket. Silently ignored when no identity is ready.
    pub fn clear_favorites_by_type(&self, bucket: Bucket) {
        {
            let mut state = self.write_state();
            let Some(identity) = ready_identity(&state) else {
                return;
            };
            let removed = state.collection.clear(bucket);
            tracing::debug!(partition = %identity, %bucket, removed, "Cleared favorites bucket");

            self.persist(&identity, &state.collection);
            self.publish(&state);
        }

        self.notifier
            .notify(Notice::success(format!("Favorite {} cleared", bucket)));
    }

    /// Empties every bucket. Silently ignored when no identity is ready.
    pub fn clear_all_favorites(&self) {
        {
            let mut state = self.write_state();
            let Some(identity) = ready_identity(&state) else {
                return;
            };
            state.collection.clear_all();
            tracing::debug!(partition = %identity, "Cleared all favorites");

            self.persist(&identity, &state.collection);
            self.publish(&state);
        }

        self.notifier.notify(Notice::success("All favorites cleared"));
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// True iff an item with `id` is in `bucket`.
    pub fn is_favorite(&self, bucket: Bucket, id: &str) -> bool {
        self.read_state().collection.contains(bucket, id)
    }

    /// Number of items in `bucket`.
    pub fn favorites_count(&self, bucket: Bucket) -> usize {
        self.read_state().collection.count(bucket)
    }

    /// Number of items across all buckets.
    pub fn total_favorites_count(&self) -> usize {
        self.read_state().collection.total_count()
    }

    /// Items of `bucket` in insertion order.
    pub fn favorites(&self, bucket: Bucket) -> Vec<FavoriteItem> {
        self.read_state().collection.bucket(bucket).to_vec()
    }

    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.read_state().clone()
    }

    pub fn status(&self) -> StoreStatus {
        self.read_state().status
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read_state().identity.clone()
    }

    /// True when an identity is signed in and its collection is loaded.
    pub fn is_ready(&self) -> bool {
        self.status() == StoreStatus::Ready
    }

    /// Subscribes to snapshots. The receiver starts at the current snapshot
    /// and sees every later mutation and identity transition.
    pub fn subscribe(&self) -> watch::Receiver<FavoritesSnapshot> {
        self.publisher.subscribe()
    }
}

fn ready_identity(state: &FavoritesSnapshot) -> Option<Identity> {
    match state.status {
        StoreStatus::Ready => state.identity.clone(),
        StoreStatus::Unauthenticated | StoreStatus::Loading => None,
    }
}

fn login_required() -> Notice {
    Notice::error("Please log in to manage your favorites")
}

fn display_label(bucket: Bucket, title: &str) -> String {
    if title.is_empty() {
        let singular = bucket.singular();
        let mut chars = singular.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        format!("\"{}\"", title)
    }
}
