use crate::diversity::DiversityScorer;
use crate::error::PlanningError;
use crate::matcher::{contains_fragment, find_in_inventory};
use crate::model::{Ingredient, MealPlan, Recipe, UserPreferences};
use crate::urgency::UrgencyScorer;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

const USAGE_WEIGHT: f64 = 0.3;
const WASTE_REDUCTION_WEIGHT: f64 = 0.3;
const VARIETY_WEIGHT: f64 = 0.15;
const PREFERENCE_WEIGHT: f64 = 0.15;
const NUTRITION_WEIGHT: f64 = 0.1;

/// Stand-in until real nutrition data is scored
pub const NUTRITION_PLACEHOLDER: f64 = 0.5;

/// Quality breakdown of a meal plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEvaluation {
    pub ingredient_usage: f64,
    pub waste_reduction: f64,
    pub variety: f64,
    pub preference_match: f64,
    pub nutrition_balance: f64,
    /// Category spread of the inventory the plan uses; reported, not weighted
    pub ingredient_diversity: f64,
    pub total: f64,
}

/// PlanEvaluator scores a finished plan
///
/// Formula: `usage * 0.3 + waste * 0.3 + variety * 0.15 + preference * 0.15 + nutrition * 0.1`
pub struct PlanEvaluator;

impl PlanEvaluator {
    /// # Errors
    /// Returns `PlanningError` when the plan violates its date-range invariant.
    #[tracing::instrument(skip_all, fields(plan_id = %plan.id))]
    pub fn evaluate(
        plan: &MealPlan,
        inventory: &[Ingredient],
        recipes: &[Recipe],
        preferences: Option<&UserPreferences>,
        today: NaiveDate,
    ) -> Result<PlanEvaluation, PlanningError> {
        plan.validate()?;

        for meal in &plan.meals {
            if let Some(recipe_id) = &meal.recipe_id {
                if !recipes.iter().any(|r| &r.id == recipe_id) {
                    tracing::debug!(slot_id = %meal.id, %recipe_id, "slot references unknown recipe");
                }
            }
        }

        let assigned: Vec<&Recipe> = plan.assigned_recipes(recipes).collect();

        let mut used: Vec<&Ingredient> = Vec::new();
        let mut used_ids: HashSet<&str> = HashSet::new();
        for recipe in &assigned {
            for line in &recipe.ingredients {
                if let Some(matched) = find_in_inventory(&line.name, inventory) {
                    if used_ids.insert(matched.id.as_str()) {
                        used.push(matched);
                    }
                }
            }
        }

        let total_expiring = inventory
            .iter()
            .filter(|i| UrgencyScorer::is_expiring_soon(i, today))
            .count();
        let expiring_used = used
            .iter()
            .filter(|i| UrgencyScorer::is_expiring_soon(i, today))
            .count();

        let ingredient_usage = used.len() as f64 / inventory.len().max(1) as f64;
        let waste_reduction = expiring_used as f64 / total_expiring.max(1) as f64;

        let distinct_recipes: HashSet<&str> = plan
            .meals
            .iter()
            .filter_map(|m| m.recipe_id.as_deref())
            .collect();
        let variety = distinct_recipes.len() as f64 / plan.meals.len().max(1) as f64;

        let preference_match = match preferences {
            None => 1.0,
            Some(preferences) => Self::preference_match(&assigned, preferences),
        };

        let used_names: Vec<&str> = used.iter().map(|i| i.name.as_str()).collect();
        let ingredient_diversity = DiversityScorer::score_names(&used_names);

        let total = ingredient_usage * USAGE_WEIGHT
            + waste_reduction * WASTE_REDUCTION_WEIGHT
            + variety * VARIETY_WEIGHT
            + preference_match * PREFERENCE_WEIGHT
            + NUTRITION_PLACEHOLDER * NUTRITION_WEIGHT;

        tracing::debug!(total, ingredient_usage, waste_reduction, variety, "plan evaluated");

        Ok(PlanEvaluation {
            ingredient_usage,
            waste_reduction,
            variety,
            preference_match,
            nutrition_balance: NUTRITION_PLACEHOLDER,
            ingredient_diversity,
            total,
        })
    }

    /// `1 - disliked / total` over every ingredient line of every filled slot
    fn preference_match(assigned: &[&Recipe], preferences: &UserPreferences) -> f64 {
        let mut total = 0usize;
        let mut disliked = 0usize;

        for line in assigned.iter().flat_map(|r| r.ingredients.iter()) {
            total += 1;
            if preferences
                .disliked_ingredients
                .iter()
                .any(|fragment| contains_fragment(&line.name, fragment))
            {
                disliked += 1;
            }
        }

        (1.0 - disliked as f64 / total.max(1) as f64).max(0.0)
    }
}
