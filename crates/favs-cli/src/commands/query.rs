use anyhow::Result;
use colored::Colorize;
use favs_application::FavoritesStore;
use favs_core::favorite::{Bucket, FavoriteItem};

pub fn list(store: &FavoritesStore, bucket: Option<Bucket>, json: bool) -> Result<()> {
    if json {
        let snapshot = store.snapshot();
        let rendered = match bucket {
            Some(bucket) => serde_json::to_string_pretty(snapshot.collection.bucket(bucket))?,
            None => serde_json::to_string_pretty(&snapshot.collection)?,
        };
        println!("{}", rendered);
        return Ok(());
    }

    let buckets: Vec<Bucket> = match bucket {
        Some(bucket) => vec![bucket],
        None => Bucket::all().collect(),
    };

    for bucket in buckets {
        let items = store.favorites(bucket);
        println!("{} ({})", bucket.to_string().bold(), items.len());
        for item in &items {
            println!("  {}", describe(item));
        }
    }
    Ok(())
}

fn describe(item: &FavoriteItem) -> String {
    let title = if item.title.is_empty() {
        "(untitled)".dimmed().to_string()
    } else {
        item.title.clone()
    };
    match item.saved_at {
        Some(saved_at) => format!(
            "{}  {}  {}",
            item.id.cyan(),
            title,
            format!("saved {}", saved_at.format("%Y-%m-%d %H:%M")).dimmed()
        ),
        None => format!("{}  {}", item.id.cyan(), title),
    }
}

pub fn count(store: &FavoritesStore, bucket: Option<Bucket>) {
    match bucket {
        Some(bucket) => println!("{}", store.favorites_count(bucket)),
        None => println!("{}", store.total_favorites_count()),
    }
}

pub fn check(store: &FavoritesStore, bucket: Bucket, id: &str) {
    if store.is_favorite(bucket, id) {
        println!("{}", "yes".green());
    } else {
        println!("{}", "no".red());
    }
}
