//! Input plumbing shared by the `wastenot` subcommands

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use wastenot_planner::Recipe;
use wastenot_recipe::{CachedRecipeSource, FixtureRecipeSource, InMemoryCache};

use crate::config::Config;

/// Recipe catalogue as the commands see it: a fixture behind the lookup cache
pub type Catalogue = CachedRecipeSource<FixtureRecipeSource, InMemoryCache<Vec<Recipe>>>;

/// Deserialize a JSON document from `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Open the recipe catalogue: `path` when given, the bundled fixture otherwise
pub fn open_catalogue(config: &Config, path: Option<&Path>) -> Result<Catalogue> {
    let source = match path {
        Some(path) => FixtureRecipeSource::from_path(path)
            .with_context(|| format!("Failed to load recipes from {}", path.display()))?,
        None => FixtureRecipeSource::bundled().context("Failed to load bundled recipes")?,
    };

    tracing::debug!(recipes = source.recipes().len(), "recipe catalogue opened");

    let cache = InMemoryCache::with_capacity(config.cache.max_entries);
    Ok(CachedRecipeSource::new(source, cache).with_ttl(config.cache.ttl()))
}

/// Serialize `value` as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
