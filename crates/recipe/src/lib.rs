pub mod cache;
pub mod cached;
pub mod error;
pub mod source;

pub use cache::{
    CacheService, Clock, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL, InMemoryCache, ManualClock,
    SystemClock,
};
pub use cached::CachedRecipeSource;
pub use error::{RecipeSourceError, RecipeSourceResult};
pub use source::{FixtureRecipeSource, RecipeSource};
