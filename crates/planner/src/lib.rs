pub mod diversity;
pub mod error;
pub mod evaluator;
pub mod fill_policy;
pub mod fit;
pub mod matcher;
pub mod model;
pub mod optimizer;
pub mod ranker;
pub mod substitution;
pub mod template;
pub mod urgency;

pub use diversity::{DiversityScorer, IngredientFamily};
pub use error::PlanningError;
pub use evaluator::{PlanEvaluation, PlanEvaluator};
pub use fill_policy::{FillPolicy, LeaveUnfilled, SeededRandomFill, TopListedRotation};
pub use fit::FitScorer;
pub use model::{
    Ingredient, MealPlan, MealSlot, MealType, NutritionInfo, Recipe, RecipeIngredient,
    RecipeSourceInfo, StorageLocation, UserPreferences,
};
pub use optimizer::{AssignmentReason, OptimizedPlan, PlanOptimizer, SlotAssignment};
pub use ranker::{RankedRecipe, RecipeRanker};
pub use substitution::SubstitutionAdvisor;
pub use template::PlanTemplate;
pub use urgency::{ExpiryStatus, UrgencyScorer, expiring_within, sort_by_urgency};
