use crate::error::PlanningError;
use crate::fill_policy::FillPolicy;
use crate::matcher::matched_inventory;
use crate::model::{Ingredient, MealPlan, MealSlot, Recipe};
use crate::ranker::RecipeRanker;
use crate::urgency::{UrgencyScorer, sort_by_urgency};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// Why a recipe was placed in a slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AssignmentReason {
    /// Chosen because it consumes this unused inventory item
    #[serde(rename_all = "camelCase")]
    ConsumesIngredient {
        ingredient_id: String,
        ingredient_name: String,
        urgency: f64,
    },
    /// Nothing in stock drove the choice; the fill policy picked it
    Fallback { policy: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAssignment {
    pub slot_id: String,
    pub recipe_id: String,
    pub reason: AssignmentReason,
    pub reasoning: String,
}

/// Result of optimizing a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPlan {
    /// Same slots, same order as the input; only empty slots gain a recipe
    pub plan: MealPlan,
    /// One entry per slot filled by this run, in fill order
    pub assignments: Vec<SlotAssignment>,
    /// Slots still empty after the fill policy ran, in plan order
    pub unfilled_slot_ids: Vec<String>,
}

impl OptimizedPlan {
    pub fn is_complete(&self) -> bool {
        self.unfilled_slot_ids.is_empty()
    }
}

/// Human-readable explanation for an ingredient-driven assignment
///
/// # Example Templates
/// - "Uses 牛乳 (expired 2 days ago) in 牛乳プリン"
/// - "Uses 豚肉 (expires tomorrow) in 生姜焼き"
/// - "Uses 玉ねぎ from your inventory in カレー"
pub fn generate_reasoning_text(
    ingredient: &Ingredient,
    recipe: &Recipe,
    today: NaiveDate,
) -> String {
    let when = match UrgencyScorer::days_until_expiry(ingredient, today) {
        Some(days) if days < -1 => format!(" (expired {} days ago)", -days),
        Some(-1) => " (expired yesterday)".to_string(),
        Some(0) => " (expires today)".to_string(),
        Some(1) => " (expires tomorrow)".to_string(),
        Some(days) => format!(" (expires in {} days)", days),
        None => " from your inventory".to_string(),
    };

    format!("Uses {}{} in {}", ingredient.name, when, recipe.name)
}

/// PlanOptimizer fills empty meal slots so that the most urgent unused
/// ingredients are cooked first
///
/// **Flow:**
/// 1. Ingredients already covered by assigned recipes are marked used
/// 2. Remaining ingredients are visited from most to least urgent
/// 3. Each visit ranks all recipes against that single ingredient and puts the
///    best matching recipe into the next empty slot, marking everything that
///    recipe consumes as used
/// 4. Slots left over go to the injected [`FillPolicy`]
///
/// Complexity: O(inventory × recipes × recipe lines × inventory)
pub struct PlanOptimizer;

impl PlanOptimizer {
    /// Fill the empty slots of `plan`.
    ///
    /// # Errors
    /// Returns `PlanningError` when the plan violates its date-range invariant.
    #[tracing::instrument(skip_all, fields(plan_id = %plan.id, slots = plan.meals.len()))]
    pub fn optimize(
        plan: &MealPlan,
        inventory: &[Ingredient],
        recipes: &[Recipe],
        today: NaiveDate,
        policy: &dyn FillPolicy,
    ) -> Result<OptimizedPlan, PlanningError> {
        plan.validate()?;

        let mut optimized = plan.clone();
        let mut assignments = Vec::new();

        let mut used: HashSet<&str> = HashSet::new();
        for recipe in plan.assigned_recipes(recipes) {
            for ingredient in matched_inventory(recipe, inventory) {
                used.insert(ingredient.id.as_str());
            }
        }

        let unused: Vec<&Ingredient> = inventory
            .iter()
            .filter(|i| !used.contains(i.id.as_str()))
            .collect();
        let unused = sort_by_urgency(&unused, today);

        let mut fill_queue: VecDeque<usize> = plan
            .meals
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_filled())
            .map(|(index, _)| index)
            .collect();

        for ingredient in unused {
            if fill_queue.is_empty() {
                break;
            }
            // Consumed by a recipe assigned earlier in this loop
            if used.contains(ingredient.id.as_str()) {
                continue;
            }

            let best = RecipeRanker::rank(std::slice::from_ref(ingredient), recipes, None, today)
                .into_iter()
                .next()
                .filter(|ranked| ranked.uses_inventory());

            let Some(best) = best else {
                tracing::debug!(ingredient = %ingredient.name, "no recipe uses ingredient");
                continue;
            };

            let Some(slot_index) = fill_queue.pop_front() else {
                break;
            };

            let slot = &mut optimized.meals[slot_index];
            slot.recipe_id = Some(best.recipe.id.clone());

            let urgency = UrgencyScorer::score(ingredient, today);
            tracing::debug!(
                slot_id = %slot.id,
                recipe_id = %best.recipe.id,
                ingredient = %ingredient.name,
                urgency,
                "assigned recipe for ingredient"
            );

            assignments.push(SlotAssignment {
                slot_id: slot.id.clone(),
                recipe_id: best.recipe.id.clone(),
                reason: AssignmentReason::ConsumesIngredient {
                    ingredient_id: ingredient.id.clone(),
                    ingredient_name: ingredient.name.clone(),
                    urgency,
                },
                reasoning: generate_reasoning_text(ingredient, &best.recipe, today),
            });

            for consumed in matched_inventory(&best.recipe, inventory) {
                used.insert(consumed.id.as_str());
            }
        }

        let remaining: Vec<usize> = fill_queue.into_iter().collect();
        let remaining_slots: Vec<&MealSlot> = remaining.iter().map(|&i| &plan.meals[i]).collect();
        let picks = policy.fill(&remaining_slots, recipes);

        let mut unfilled_slot_ids = Vec::new();
        for (position, &slot_index) in remaining.iter().enumerate() {
            let slot = &mut optimized.meals[slot_index];
            match picks.get(position).cloned().flatten() {
                Some(recipe_id) => {
                    slot.recipe_id = Some(recipe_id.clone());
                    assignments.push(SlotAssignment {
                        slot_id: slot.id.clone(),
                        reasoning: format!(
                            "No remaining stock suggested a recipe for {} {}; picked by {}",
                            slot.date,
                            slot.meal_type,
                            policy.name()
                        ),
                        recipe_id,
                        reason: AssignmentReason::Fallback {
                            policy: policy.name().to_string(),
                        },
                    });
                }
                None => unfilled_slot_ids.push(slot.id.clone()),
            }
        }

        tracing::info!(
            assigned = assignments.len(),
            unfilled = unfilled_slot_ids.len(),
            policy = policy.name(),
            "meal plan optimized"
        );

        Ok(OptimizedPlan {
            plan: optimized,
            assignments,
            unfilled_slot_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill_policy::{LeaveUnfilled, TopListedRotation};
    use crate::model::{MealType, RecipeIngredient};
    use chrono::Duration;
    use strum::VariantArray;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
    }

    fn recipe(id: &str, lines: &[&str]) -> Recipe {
        Recipe::new(
            id,
            format!("Recipe {}", id),
            lines
                .iter()
                .map(|n| RecipeIngredient::new(*n, 1.0, ""))
                .collect(),
        )
    }

    fn plan(slots: usize) -> MealPlan {
        let meals = (0..slots)
            .map(|i| {
                MealSlot::empty(
                    format!("slot{}", i),
                    today() + Duration::days(i as i64 / 3),
                    MealType::VARIANTS[i % 3],
                )
            })
            .collect::<Vec<_>>();
        MealPlan {
            id: "plan".to_string(),
            start_date: today(),
            end_date: today() + Duration::days(6),
            meals,
        }
    }

    #[test]
    fn test_most_urgent_ingredient_fills_first_slot() {
        let inventory = vec![
            Ingredient::new("onion", "玉ねぎ").expiring_on(today() + Duration::days(14)),
            Ingredient::new("milk", "牛乳").expiring_on(today() + Duration::days(1)),
        ];
        let recipes = vec![recipe("curry", &["玉ねぎ"]), recipe("pudding", &["牛乳", "砂糖"])];

        let result =
            PlanOptimizer::optimize(&plan(2), &inventory, &recipes, today(), &LeaveUnfilled)
                .unwrap();

        assert_eq!(result.plan.meals[0].recipe_id.as_deref(), Some("pudding"));
        assert_eq!(result.plan.meals[1].recipe_id.as_deref(), Some("curry"));
        assert!(result.is_complete());
        assert_eq!(
            result.assignments[0].reasoning,
            "Uses 牛乳 (expires tomorrow) in Recipe pudding"
        );
    }

    #[test]
    fn test_ingredients_covered_by_existing_slots_are_skipped() {
        let inventory = vec![
            Ingredient::new("milk", "牛乳").expiring_on(today()),
            Ingredient::new("pork", "豚肉").expiring_on(today() + Duration::days(2)),
        ];
        let recipes = vec![recipe("pudding", &["牛乳"]), recipe("ginger-pork", &["豚肉"])];
        let mut plan = plan(2);
        plan.meals[1].recipe_id = Some("pudding".to_string());

        let result =
            PlanOptimizer::optimize(&plan, &inventory, &recipes, today(), &LeaveUnfilled).unwrap();

        assert_eq!(result.plan.meals[0].recipe_id.as_deref(), Some("ginger-pork"));
        assert_eq!(result.plan.meals[1].recipe_id.as_deref(), Some("pudding"));
        assert_eq!(result.assignments.len(), 1);
    }

    #[test]
    fn test_consumed_stock_is_not_counted_twice() {
        let inventory = vec![
            Ingredient::new("milk", "牛乳").expiring_on(today()),
            Ingredient::new("egg", "卵").expiring_on(today()),
        ];
        // One recipe eats both urgent items; the second slot must not get a
        // second recipe driven by the egg.
        let recipes = vec![recipe("pudding", &["牛乳", "卵"])];

        let result =
            PlanOptimizer::optimize(&plan(2), &inventory, &recipes, today(), &LeaveUnfilled)
                .unwrap();

        assert_eq!(result.plan.meals[0].recipe_id.as_deref(), Some("pudding"));
        assert_eq!(result.unfilled_slot_ids, vec!["slot1".to_string()]);
    }

    #[test]
    fn test_fallback_policy_fills_remaining_slots() {
        let inventory = vec![Ingredient::new("milk", "牛乳").expiring_on(today())];
        let recipes = vec![recipe("toast", &["パン"]), recipe("pudding", &["牛乳"])];

        let result = PlanOptimizer::optimize(
            &plan(3),
            &inventory,
            &recipes,
            today(),
            &TopListedRotation::default(),
        )
        .unwrap();

        let ids: Vec<_> = result
            .plan
            .meals
            .iter()
            .map(|m| m.recipe_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["pudding", "toast", "pudding"]);
        assert!(matches!(
            result.assignments[1].reason,
            AssignmentReason::Fallback { .. }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_slot() {
        let mut plan = plan(1);
        plan.meals[0].date = today() - Duration::days(1);

        let err = PlanOptimizer::optimize(&plan, &[], &[], today(), &LeaveUnfilled).unwrap_err();
        assert!(matches!(err, PlanningError::SlotOutOfRange { .. }));
    }

    #[test]
    fn test_reasoning_text_variants() {
        let r = recipe("soup", &["玉ねぎ"]);
        let onion = Ingredient::new("onion", "玉ねぎ");
        assert_eq!(
            generate_reasoning_text(&onion, &r, today()),
            "Uses 玉ねぎ from your inventory in Recipe soup"
        );
        let old = onion.clone().expiring_on(today() - Duration::days(2));
        assert_eq!(
            generate_reasoning_text(&old, &r, today()),
            "Uses 玉ねぎ (expired 2 days ago) in Recipe soup"
        );
        let later = onion.expiring_on(today() + Duration::days(5));
        assert_eq!(
            generate_reasoning_text(&later, &r, today()),
            "Uses 玉ねぎ (expires in 5 days) in Recipe soup"
        );
    }
}
