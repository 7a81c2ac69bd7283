use crate::matcher::find_in_inventory;
use crate::model::{Ingredient, Recipe};
use crate::urgency::UrgencyScorer;
use chrono::NaiveDate;

/// Weight of recipe coverage in the usage-efficiency score
pub const COVERAGE_WEIGHT: f64 = 0.7;
/// Weight of the expiring-ingredient bonus in the usage-efficiency score
pub const EXPIRY_BONUS_WEIGHT: f64 = 0.3;

/// FitScorer rates how well a recipe consumes a given inventory
///
/// Formula: `coverage * 0.7 + expiry_bonus * 0.3` where
/// - coverage = matched recipe lines / recipe lines
/// - expiry_bonus = matched lines hitting an expiring-soon item / inventory size
pub struct FitScorer;

impl FitScorer {
    /// Returns a score from 0.0 (recipe uses nothing on hand) to 1.0
    pub fn usage_efficiency(recipe: &Recipe, inventory: &[Ingredient], today: NaiveDate) -> f64 {
        if recipe.ingredients.is_empty() || inventory.is_empty() {
            return 0.0;
        }

        let mut used = 0usize;
        let mut expiring_used = 0usize;

        for line in &recipe.ingredients {
            if let Some(matched) = find_in_inventory(&line.name, inventory) {
                used += 1;
                if UrgencyScorer::is_expiring_soon(matched, today) {
                    expiring_used += 1;
                }
            }
        }

        let coverage = used as f64 / recipe.ingredients.len() as f64;
        // Two recipe lines can hit the same expiring item, so clamp the bonus
        let expiry_bonus = (expiring_used as f64 / inventory.len() as f64).min(1.0);

        coverage * COVERAGE_WEIGHT + expiry_bonus * EXPIRY_BONUS_WEIGHT
    }
}
