use crate::model::{MealSlot, Recipe};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default number of leading recipes eligible for fallback assignment
pub const DEFAULT_FALLBACK_POOL_SIZE: usize = 5;

/// Decides what happens to slots the ingredient-driven pass could not fill
///
/// Implementations must return exactly one entry per slot in `unfilled`;
/// `None` leaves that slot empty.
pub trait FillPolicy {
    fn name(&self) -> &'static str;

    fn fill(&self, unfilled: &[&MealSlot], recipes: &[Recipe]) -> Vec<Option<String>>;
}

/// Cycles through the first `pool_size` listed recipes.
///
/// Recipe sources list popular recipes first, so this is a deterministic
/// "most popular" fallback.
#[derive(Debug, Clone)]
pub struct TopListedRotation {
    pub pool_size: usize,
}

impl Default for TopListedRotation {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_FALLBACK_POOL_SIZE,
        }
    }
}

impl FillPolicy for TopListedRotation {
    fn name(&self) -> &'static str {
        "top_listed_rotation"
    }

    fn fill(&self, unfilled: &[&MealSlot], recipes: &[Recipe]) -> Vec<Option<String>> {
        let pool = &recipes[..self.pool_size.min(recipes.len())];
        if pool.is_empty() {
            return vec![None; unfilled.len()];
        }

        (0..unfilled.len())
            .map(|i| Some(pool[i % pool.len()].id.clone()))
            .collect()
    }
}

/// Uniform pick among the first `pool_size` recipes, reproducible by seed
#[derive(Debug, Clone)]
pub struct SeededRandomFill {
    pub pool_size: usize,
    pub seed: u64,
}

impl SeededRandomFill {
    pub fn new(seed: u64) -> Self {
        Self {
            pool_size: DEFAULT_FALLBACK_POOL_SIZE,
            seed,
        }
    }
}

impl FillPolicy for SeededRandomFill {
    fn name(&self) -> &'static str {
        "seeded_random"
    }

    fn fill(&self, unfilled: &[&MealSlot], recipes: &[Recipe]) -> Vec<Option<String>> {
        let pool = &recipes[..self.pool_size.min(recipes.len())];
        if pool.is_empty() {
            return vec![None; unfilled.len()];
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        unfilled
            .iter()
            .map(|_| Some(pool[rng.random_range(0..pool.len())].id.clone()))
            .collect()
    }
}

/// Leaves every remaining slot empty so callers can surface it
#[derive(Debug, Clone, Default)]
pub struct LeaveUnfilled;

impl FillPolicy for LeaveUnfilled {
    fn name(&self) -> &'static str {
        "leave_unfilled"
    }

    fn fill(&self, unfilled: &[&MealSlot], _recipes: &[Recipe]) -> Vec<Option<String>> {
        vec![None; unfilled.len()]
    }
}
