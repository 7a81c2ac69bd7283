use crate::error::PlanningError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Where an ingredient is kept at home
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageLocation {
    #[default]
    Fridge,
    Freezer,
    Pantry,
    Other,
}

/// An item in the household inventory.
///
/// Ingredients are owned by the inventory collaborator; the planner only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    /// Absent expiry means the item is treated as low urgency
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub storage_location: StorageLocation,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            quantity: 1.0,
            unit: String::new(),
            expiry_date: None,
            storage_location: StorageLocation::default(),
            purchase_date: None,
        }
    }

    pub fn expiring_on(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    pub fn with_quantity(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.quantity = quantity;
        self.unit = unit.into();
        self
    }
}

/// An ingredient line of a recipe. Matched to inventory by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
}

/// Provenance of a recipe record (external API, fixture file, user entry)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSourceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Minutes
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub nutrition_info: Option<NutritionInfo>,
    #[serde(default)]
    pub source: Option<RecipeSourceInfo>,
}

impl Recipe {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        ingredients: Vec<RecipeIngredient>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            cooking_time: 0,
            difficulty: String::new(),
            ingredients,
            instructions: Vec::new(),
            nutrition_info: None,
            source: None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

/// One meal (date + meal type) of a plan, optionally assigned a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub custom_ingredients: Vec<RecipeIngredient>,
}

fn default_servings() -> u32 {
    1
}

impl MealSlot {
    pub fn empty(id: impl Into<String>, date: NaiveDate, meal_type: MealType) -> Self {
        Self {
            id: id.into(),
            date,
            meal_type,
            recipe_id: None,
            servings: default_servings(),
            custom_ingredients: Vec::new(),
        }
    }

    pub fn is_filled(&self) -> bool {
        self.recipe_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Insertion order is significant and preserved by optimization
    pub meals: Vec<MealSlot>,
}

impl MealPlan {
    /// Check the date-range invariant: `start_date <= end_date` and every
    /// slot dated within it.
    pub fn validate(&self) -> Result<(), PlanningError> {
        if self.start_date > self.end_date {
            return Err(PlanningError::InvalidPlanRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if let Some(slot) = self
            .meals
            .iter()
            .find(|m| m.date < self.start_date || m.date > self.end_date)
        {
            return Err(PlanningError::SlotOutOfRange {
                slot_id: slot.id.clone(),
                date: slot.date,
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }

    pub fn filled_count(&self) -> usize {
        self.meals.iter().filter(|m| m.is_filled()).count()
    }

    /// Recipes referenced by filled slots, resolved against `recipes`.
    ///
    /// Slots whose recipe id is unknown are skipped.
    pub fn assigned_recipes<'a>(
        &'a self,
        recipes: &'a [Recipe],
    ) -> impl Iterator<Item = &'a Recipe> {
        self.meals.iter().filter_map(move |meal| {
            let recipe_id = meal.recipe_id.as_deref()?;
            recipes.iter().find(|r| r.id == recipe_id)
        })
    }
}

/// Read-only user tastes fed into scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Name fragments, matched case-insensitively against recipe ingredient names
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
}

impl UserPreferences {
    pub fn disliking<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            disliked_ingredients: fragments.into_iter().map(Into::into).collect(),
        }
    }
}
