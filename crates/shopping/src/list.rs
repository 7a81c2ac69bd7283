use crate::categorization::{CategorizationService, Category};
use serde::{Deserialize, Serialize};
use strum::VariantArray;
use wastenot_planner::matcher::find_in_inventory;
use wastenot_planner::{Ingredient, MealPlan, Recipe};

/// Something left to buy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    #[serde(default)]
    pub purchased: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub meal_plan_id: String,
    /// In order of first appearance across the plan
    pub items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Items grouped by grocery section, sections in `Category` order.
    /// Empty sections are omitted.
    pub fn by_category(&self) -> Vec<(Category, Vec<&ShoppingItem>)> {
        Category::VARIANTS
            .iter()
            .filter_map(|category| {
                let items: Vec<&ShoppingItem> = self
                    .items
                    .iter()
                    .filter(|item| item.category == *category)
                    .collect();
                (!items.is_empty()).then_some((*category, items))
            })
            .collect()
    }

    /// Flip the purchased flag of the item named `name`; false if absent
    pub fn toggle_purchased(&mut self, name: &str) -> bool {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => {
                item.purchased = !item.purchased;
                true
            }
            None => false,
        }
    }

    pub fn remaining(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.items.iter().filter(|item| !item.purchased)
    }
}

/// Builds the list of ingredients a plan needs beyond what is in stock
pub struct ShoppingListGenerator;

impl ShoppingListGenerator {
    /// **Flow:**
    /// 1. Every filled slot contributes its recipe's lines, scaled by servings
    /// 2. Lines are merged by case-insensitive name; the first unit seen is kept
    /// 3. The first matching inventory item's quantity is subtracted
    /// 4. Fully covered lines are dropped, the rest categorized
    #[tracing::instrument(skip_all, fields(plan_id = %plan.id))]
    pub fn generate(plan: &MealPlan, recipes: &[Recipe], inventory: &[Ingredient]) -> ShoppingList {
        let mut required: Vec<(String, f64, String)> = Vec::new();

        for meal in &plan.meals {
            let Some(recipe_id) = meal.recipe_id.as_deref() else {
                continue;
            };
            let Some(recipe) = recipes.iter().find(|r| r.id == recipe_id) else {
                tracing::debug!(slot_id = %meal.id, recipe_id, "skipping unknown recipe");
                continue;
            };

            let servings = f64::from(meal.servings.max(1));
            for line in &recipe.ingredients {
                let key = line.name.to_lowercase();
                let amount = line.quantity * servings;
                match required.iter_mut().find(|(name, _, _)| name.to_lowercase() == key) {
                    Some((_, quantity, _)) => *quantity += amount,
                    None => required.push((line.name.clone(), amount, line.unit.clone())),
                }
            }
        }

        let items: Vec<ShoppingItem> = required
            .into_iter()
            .filter_map(|(name, quantity, unit)| {
                let on_hand = find_in_inventory(&name, inventory).map_or(0.0, |i| i.quantity);
                let needed = (quantity - on_hand).max(0.0);
                (needed > 0.0).then(|| ShoppingItem {
                    category: CategorizationService::categorize(&name),
                    name,
                    quantity: needed,
                    unit,
                    purchased: false,
                })
            })
            .collect();

        tracing::debug!(items = items.len(), "shopping list generated");

        ShoppingList {
            meal_plan_id: plan.id.clone(),
            items,
        }
    }
}
