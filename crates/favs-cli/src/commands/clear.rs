use favs_application::FavoritesStore;
use favs_core::favorite::Bucket;

pub fn run(store: &FavoritesStore, bucket: Option<Bucket>) {
    match bucket {
        Some(bucket) => store.clear_favorites_by_type(bucket),
        None => store.clear_all_favorites(),
    }
}
