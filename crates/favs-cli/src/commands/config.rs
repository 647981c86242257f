use anyhow::{Context, Result};
use favs_core::config::FavsConfig;
use favs_infrastructure::paths::FavsPaths;

use crate::GlobalArgs;

pub fn show(config: &FavsConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

pub fn path(global: &GlobalArgs) -> Result<()> {
    let path = match &global.config {
        Some(path) => path.clone(),
        None => FavsPaths::config_file()?,
    };
    println!("{}", path.display());
    Ok(())
}
