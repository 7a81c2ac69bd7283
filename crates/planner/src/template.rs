use crate::error::PlanningError;
use crate::model::{MealPlan, MealSlot, MealType};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAN_DAYS: u32 = 7;

/// Longest plan a template may describe
pub const MAX_PLAN_DAYS: u32 = 366;

/// Shape of a new, empty meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTemplate {
    pub start_date: NaiveDate,
    pub days: u32,
    pub include_breakfast: bool,
    pub include_lunch: bool,
    pub include_dinner: bool,
}

impl PlanTemplate {
    /// A week of breakfast, lunch and dinner starting on `start_date`
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            days: DEFAULT_PLAN_DAYS,
            include_breakfast: true,
            include_lunch: true,
            include_dinner: true,
        }
    }

    pub fn meal_types(&self) -> Vec<MealType> {
        [
            (self.include_breakfast, MealType::Breakfast),
            (self.include_lunch, MealType::Lunch),
            (self.include_dinner, MealType::Dinner),
        ]
        .into_iter()
        .filter_map(|(enabled, meal_type)| enabled.then_some(meal_type))
        .collect()
    }

    /// Build the plan: one empty slot per day and enabled meal type, day-major.
    ///
    /// # Errors
    /// `InvalidInput` when `days` is zero or above [`MAX_PLAN_DAYS`], every
    /// meal type is disabled, or the plan would run past the last
    /// representable date.
    pub fn build(&self, plan_id: &str) -> Result<MealPlan, PlanningError> {
        if self.days == 0 {
            return Err(PlanningError::InvalidInput(
                "plan must span at least one day".to_string(),
            ));
        }
        if self.days > MAX_PLAN_DAYS {
            return Err(PlanningError::InvalidInput(format!(
                "plan may span at most {} days, got {}",
                MAX_PLAN_DAYS, self.days
            )));
        }

        let meal_types = self.meal_types();
        if meal_types.is_empty() {
            return Err(PlanningError::InvalidInput(
                "at least one meal type must be enabled".to_string(),
            ));
        }

        let end_date = self.offset(self.days - 1)?;

        let mut meals = Vec::with_capacity(self.days as usize * meal_types.len());
        for offset in 0..self.days {
            let date = self.offset(offset)?;
            for meal_type in &meal_types {
                meals.push(MealSlot::empty(
                    format!("{}-{}-{}", plan_id, date, meal_type),
                    date,
                    *meal_type,
                ));
            }
        }

        Ok(MealPlan {
            id: plan_id.to_string(),
            start_date: self.start_date,
            end_date,
            meals,
        })
    }

    fn offset(&self, days: u32) -> Result<NaiveDate, PlanningError> {
        self.start_date
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| {
                PlanningError::InvalidInput(format!(
                    "plan starting {} cannot span {} days",
                    self.start_date, self.days
                ))
            })
    }
}
