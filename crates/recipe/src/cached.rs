use crate::cache::{CacheService, DEFAULT_TTL};
use crate::error::RecipeSourceResult;
use crate::source::RecipeSource;
use std::time::Duration;
use wastenot_planner::Recipe;

/// Wraps a [`RecipeSource`] with a cache keyed by call signature
///
/// Keys: `recipe_<id>`, `popular`, `category_<id>`,
/// `ingredients_<sorted names joined by ",">`, `search_<query>`.
/// Only successful lookups are stored.
pub struct CachedRecipeSource<S, C> {
    inner: S,
    cache: C,
    ttl: Duration,
}

impl<S, C> CachedRecipeSource<S, C>
where
    S: RecipeSource,
    C: CacheService<Vec<Recipe>>,
{
    pub fn new(inner: S, cache: C) -> Self {
        Self {
            inner,
            cache,
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    fn cached(
        &self,
        key: &str,
        fetch: impl FnOnce(&S) -> RecipeSourceResult<Vec<Recipe>>,
    ) -> RecipeSourceResult<Vec<Recipe>> {
        if let Some(hit) = self.cache.get(key) {
            tracing::debug!(key, "recipe cache hit");
            return Ok(hit);
        }

        tracing::debug!(key, "recipe cache miss");
        let fresh = fetch(&self.inner)?;
        self.cache.put(key, fresh.clone(), self.ttl);
        Ok(fresh)
    }

    fn ingredients_key(names: &[String]) -> String {
        let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        format!("ingredients_{}", sorted.join(","))
    }
}

impl<S, C> RecipeSource for CachedRecipeSource<S, C>
where
    S: RecipeSource,
    C: CacheService<Vec<Recipe>>,
{
    fn recipe_by_id(&self, id: &str) -> RecipeSourceResult<Recipe> {
        let key = format!("recipe_{}", id);
        let mut found = self.cached(&key, |source| source.recipe_by_id(id).map(|r| vec![r]))?;
        match found.pop() {
            Some(recipe) => Ok(recipe),
            None => self.inner.recipe_by_id(id),
        }
    }

    fn popular_recipes(&self) -> RecipeSourceResult<Vec<Recipe>> {
        self.cached("popular", |source| source.popular_recipes())
    }

    fn recipes_by_category(&self, category: &str) -> RecipeSourceResult<Vec<Recipe>> {
        let key = format!("category_{}", category);
        self.cached(&key, |source| source.recipes_by_category(category))
    }

    fn recipes_by_ingredients(&self, names: &[String]) -> RecipeSourceResult<Vec<Recipe>> {
        let key = Self::ingredients_key(names);
        self.cached(&key, |source| source.recipes_by_ingredients(names))
    }

    fn search(&self, query: &str) -> RecipeSourceResult<Vec<Recipe>> {
        let key = format!("search_{}", query);
        self.cached(&key, |source| source.search(query))
    }
}
