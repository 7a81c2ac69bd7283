use crate::fit::FitScorer;
use crate::matcher::contains_fragment;
use crate::model::{Ingredient, Recipe, UserPreferences};
use chrono::NaiveDate;
use serde::Serialize;

const EFFICIENCY_WEIGHT: f64 = 0.7;
const PREFERENCE_WEIGHT: f64 = 0.3;
const MIN_PREFERENCE_SCORE: f64 = 0.1;

/// A recipe annotated with its ranking score and the parts it was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub score: f64,
    pub efficiency: f64,
    pub preference_score: f64,
}

impl RankedRecipe {
    /// True when at least one recipe line matches the inventory it was ranked against
    pub fn uses_inventory(&self) -> bool {
        self.efficiency > 0.0
    }
}

/// RecipeRanker orders recipes by inventory fit and user dislikes
///
/// Formula: `efficiency * 0.7 + preference * 0.3`
pub struct RecipeRanker;

impl RecipeRanker {
    /// Share of the recipe the user is happy to eat.
    ///
    /// 1.0 without preferences or dislikes; otherwise
    /// `max(0.1, 1 - disliked_lines / lines)`.
    pub fn preference_score(recipe: &Recipe, preferences: Option<&UserPreferences>) -> f64 {
        let Some(preferences) = preferences else {
            return 1.0;
        };

        let disliked = Self::disliked_line_count(recipe, preferences);
        if disliked == 0 {
            return 1.0;
        }

        (1.0 - disliked as f64 / recipe.ingredients.len() as f64).max(MIN_PREFERENCE_SCORE)
    }

    /// Number of recipe lines containing any disliked fragment
    pub fn disliked_line_count(recipe: &Recipe, preferences: &UserPreferences) -> usize {
        recipe
            .ingredients
            .iter()
            .filter(|line| {
                preferences
                    .disliked_ingredients
                    .iter()
                    .any(|fragment| contains_fragment(&line.name, fragment))
            })
            .count()
    }

    /// Rank `recipes` against `inventory`, best first.
    ///
    /// The sort is stable: equal scores keep input order.
    pub fn rank(
        inventory: &[Ingredient],
        recipes: &[Recipe],
        preferences: Option<&UserPreferences>,
        today: NaiveDate,
    ) -> Vec<RankedRecipe> {
        let mut ranked: Vec<RankedRecipe> = recipes
            .iter()
            .map(|recipe| {
                let efficiency = FitScorer::usage_efficiency(recipe, inventory, today);
                let preference_score = Self::preference_score(recipe, preferences);
                RankedRecipe {
                    recipe: recipe.clone(),
                    score: efficiency * EFFICIENCY_WEIGHT + preference_score * PREFERENCE_WEIGHT,
                    efficiency,
                    preference_score,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}
