use crate::error::{RecipeSourceError, RecipeSourceResult};
use std::path::Path;
use wastenot_planner::Recipe;
use wastenot_planner::matcher::contains_fragment;

const BUNDLED_RECIPES: &str = include_str!("../fixtures/recipes.json");

/// Read side of a recipe catalogue
///
/// List operations return recipes in the catalogue's own order, most popular
/// first, which the planner's top-listed fallback relies on.
pub trait RecipeSource {
    /// # Errors
    /// `NotFound` when no recipe has this id.
    fn recipe_by_id(&self, id: &str) -> RecipeSourceResult<Recipe>;

    fn popular_recipes(&self) -> RecipeSourceResult<Vec<Recipe>>;

    fn recipes_by_category(&self, category: &str) -> RecipeSourceResult<Vec<Recipe>>;

    /// Recipes with at least one line containing one of `names`
    fn recipes_by_ingredients(&self, names: &[String]) -> RecipeSourceResult<Vec<Recipe>>;

    /// Recipes whose name or any ingredient line contains `query`, ignoring case
    fn search(&self, query: &str) -> RecipeSourceResult<Vec<Recipe>>;
}

/// Recipe catalogue held in memory, loaded from JSON
#[derive(Debug, Clone, Default)]
pub struct FixtureRecipeSource {
    recipes: Vec<Recipe>,
}

impl FixtureRecipeSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The eight-recipe catalogue shipped with the crate
    pub fn bundled() -> RecipeSourceResult<Self> {
        Self::from_json_str(BUNDLED_RECIPES)
    }

    pub fn from_json_str(json: &str) -> RecipeSourceResult<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Ok(Self::new(recipes))
    }

    pub fn from_path(path: impl AsRef<Path>) -> RecipeSourceResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let source = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), recipes = source.recipes.len(), "loaded recipe fixture");
        Ok(source)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    fn filtered(&self, keep: impl Fn(&Recipe) -> bool) -> Vec<Recipe> {
        self.recipes.iter().filter(|r| keep(r)).cloned().collect()
    }
}

impl RecipeSource for FixtureRecipeSource {
    fn recipe_by_id(&self, id: &str) -> RecipeSourceResult<Recipe> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RecipeSourceError::NotFound(id.to_string()))
    }

    fn popular_recipes(&self) -> RecipeSourceResult<Vec<Recipe>> {
        Ok(self.recipes.clone())
    }

    fn recipes_by_category(&self, category: &str) -> RecipeSourceResult<Vec<Recipe>> {
        Ok(self.filtered(|r| r.category == category))
    }

    fn recipes_by_ingredients(&self, names: &[String]) -> RecipeSourceResult<Vec<Recipe>> {
        Ok(self.filtered(|r| {
            r.ingredients
                .iter()
                .any(|line| names.iter().any(|name| contains_fragment(&line.name, name)))
        }))
    }

    fn search(&self, query: &str) -> RecipeSourceResult<Vec<Recipe>> {
        Ok(self.filtered(|r| {
            contains_fragment(&r.name, query)
                || r.ingredients
                    .iter()
                    .any(|line| contains_fragment(&line.name, query))
        }))
    }
}
