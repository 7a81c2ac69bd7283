use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use wastenot::cli::{open_catalogue, print_json, read_json};
use wastenot::config::{Config, FillPolicyKind};
use wastenot_planner::{
    Ingredient, MealPlan, PlanEvaluator, PlanOptimizer, PlanTemplate, RecipeRanker,
    SubstitutionAdvisor, UrgencyScorer, UserPreferences, expiring_within,
};
use wastenot_recipe::RecipeSource;
use wastenot_shopping::ShoppingListGenerator;

/// wastenot - Plan meals around what is about to expire
#[derive(Parser)]
#[command(name = "wastenot")]
#[command(about = "Food-waste-aware recipe ranking and meal planning", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Pantry {
    /// Inventory JSON file (array of ingredients)
    #[arg(long)]
    inventory: PathBuf,

    /// Recipe catalogue JSON file (defaults to the bundled recipes)
    #[arg(long)]
    recipes: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes by how well they use the inventory
    Rank {
        #[command(flatten)]
        pantry: Pantry,

        /// User preferences JSON file
        #[arg(long)]
        preferences: Option<PathBuf>,

        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Number of recipes to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Fill the empty slots of a meal plan
    Optimize {
        #[command(flatten)]
        pantry: Pantry,

        /// Meal plan JSON file
        #[arg(long)]
        plan: PathBuf,

        /// Fill policy (overrides config file)
        #[arg(long)]
        policy: Option<FillPolicyKind>,

        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Score a meal plan
    Evaluate {
        #[command(flatten)]
        pantry: Pantry,

        /// Meal plan JSON file
        #[arg(long)]
        plan: PathBuf,

        /// User preferences JSON file
        #[arg(long)]
        preferences: Option<PathBuf>,

        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Suggest inventory substitutes for a recipe's missing ingredients
    Substitute {
        /// Recipe id in the catalogue
        recipe_id: String,

        #[command(flatten)]
        pantry: Pantry,
    },
    /// List ingredients expiring soon, most urgent first
    Expiring {
        /// Inventory JSON file (array of ingredients)
        #[arg(long)]
        inventory: PathBuf,

        /// Window in days (overrides config file)
        #[arg(long)]
        days: Option<i64>,

        /// Reference date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Build the shopping list for a meal plan
    Shopping {
        #[command(flatten)]
        pantry: Pantry,

        /// Meal plan JSON file
        #[arg(long)]
        plan: PathBuf,
    },
    /// Create an empty meal plan
    NewPlan {
        /// First day of the plan, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Number of days
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Plan id (defaults to a random UUID)
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        no_breakfast: bool,

        #[arg(long)]
        no_lunch: bool,

        #[arg(long)]
        no_dinner: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone()).context("Failed to load configuration")?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    wastenot::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Rank {
            pantry,
            preferences,
            today,
            limit,
        } => rank_command(&config, &pantry, preferences.as_deref(), resolve(today), limit),
        Commands::Optimize {
            pantry,
            plan,
            policy,
            today,
        } => optimize_command(&config, &pantry, &plan, policy, resolve(today)),
        Commands::Evaluate {
            pantry,
            plan,
            preferences,
            today,
        } => evaluate_command(&config, &pantry, &plan, preferences.as_deref(), resolve(today)),
        Commands::Substitute { recipe_id, pantry } => {
            substitute_command(&config, &pantry, &recipe_id)
        }
        Commands::Expiring {
            inventory,
            days,
            today,
        } => expiring_command(&config, &inventory, days, resolve(today)),
        Commands::Shopping { pantry, plan } => shopping_command(&config, &pantry, &plan),
        Commands::NewPlan {
            start,
            days,
            id,
            no_breakfast,
            no_lunch,
            no_dinner,
        } => {
            let template = PlanTemplate {
                days,
                include_breakfast: !no_breakfast,
                include_lunch: !no_lunch,
                include_dinner: !no_dinner,
                ..PlanTemplate::starting(resolve(start))
            };
            new_plan_command(&template, id)
        }
    }
}

fn resolve(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

#[tracing::instrument(skip(config, pantry))]
fn rank_command(
    config: &Config,
    pantry: &Pantry,
    preferences: Option<&Path>,
    today: NaiveDate,
    limit: usize,
) -> Result<()> {
    let inventory: Vec<Ingredient> = read_json(&pantry.inventory)?;
    let recipes = open_catalogue(config, pantry.recipes.as_deref())?.popular_recipes()?;
    let preferences = preferences
        .map(read_json::<UserPreferences>)
        .transpose()?;

    let ranked = RecipeRanker::rank(&inventory, &recipes, preferences.as_ref(), today);
    let top: Vec<_> = ranked.into_iter().take(limit).collect();

    tracing::info!(ranked = top.len(), "Ranking complete");
    print_json(&top)
}

#[tracing::instrument(skip(config, pantry))]
fn optimize_command(
    config: &Config,
    pantry: &Pantry,
    plan: &Path,
    policy: Option<FillPolicyKind>,
    today: NaiveDate,
) -> Result<()> {
    let inventory: Vec<Ingredient> = read_json(&pantry.inventory)?;
    let recipes = open_catalogue(config, pantry.recipes.as_deref())?.popular_recipes()?;
    let plan: MealPlan = read_json(plan)?;

    let mut planner = config.planner.clone();
    if let Some(kind) = policy {
        planner.fill_policy = kind;
        anyhow::ensure!(
            kind != FillPolicyKind::SeededRandom || planner.seed.is_some(),
            "seeded_random needs planner.seed in the configuration"
        );
    }
    let policy = planner.fill_policy();

    let optimized = PlanOptimizer::optimize(&plan, &inventory, &recipes, today, policy.as_ref())
        .context("Failed to optimize meal plan")?;

    tracing::info!(
        policy = policy.name(),
        assigned = optimized.assignments.len(),
        unfilled = optimized.unfilled_slot_ids.len(),
        "Optimization complete"
    );
    print_json(&optimized)
}

#[tracing::instrument(skip(config, pantry))]
fn evaluate_command(
    config: &Config,
    pantry: &Pantry,
    plan: &Path,
    preferences: Option<&Path>,
    today: NaiveDate,
) -> Result<()> {
    let inventory: Vec<Ingredient> = read_json(&pantry.inventory)?;
    let recipes = open_catalogue(config, pantry.recipes.as_deref())?.popular_recipes()?;
    let plan: MealPlan = read_json(plan)?;
    let preferences = preferences
        .map(read_json::<UserPreferences>)
        .transpose()?;

    let evaluation =
        PlanEvaluator::evaluate(&plan, &inventory, &recipes, preferences.as_ref(), today)
            .context("Failed to evaluate meal plan")?;

    print_json(&evaluation)
}

#[tracing::instrument(skip(config, pantry))]
fn substitute_command(config: &Config, pantry: &Pantry, recipe_id: &str) -> Result<()> {
    let inventory: Vec<Ingredient> = read_json(&pantry.inventory)?;
    let recipe = open_catalogue(config, pantry.recipes.as_deref())?
        .recipe_by_id(recipe_id)
        .with_context(|| format!("Unknown recipe {}", recipe_id))?;

    let substitutions = SubstitutionAdvisor::suggest(&recipe, &inventory);

    print_json(&json!({
        "recipeId": recipe.id,
        "recipeName": recipe.name,
        "substitutions": substitutions,
    }))
}

#[tracing::instrument(skip(config))]
fn expiring_command(
    config: &Config,
    inventory: &Path,
    days: Option<i64>,
    today: NaiveDate,
) -> Result<()> {
    let inventory: Vec<Ingredient> = read_json(inventory)?;
    let window = days.unwrap_or(config.planner.expiring_window_days);
    anyhow::ensure!(window >= 0, "Expiry window must not be negative");

    let report: Vec<_> = expiring_within(&inventory, today, window)
        .into_iter()
        .map(|ingredient| {
            json!({
                "id": ingredient.id,
                "name": ingredient.name,
                "expiryDate": ingredient.expiry_date,
                "daysUntilExpiry": UrgencyScorer::days_until_expiry(ingredient, today),
                "urgency": UrgencyScorer::score(ingredient, today),
                "status": UrgencyScorer::status(ingredient, today),
            })
        })
        .collect();

    print_json(&report)
}

#[tracing::instrument(skip(config, pantry))]
fn shopping_command(config: &Config, pantry: &Pantry, plan: &Path) -> Result<()> {
    let inventory: Vec<Ingredient> = read_json(&pantry.inventory)?;
    let recipes = open_catalogue(config, pantry.recipes.as_deref())?.popular_recipes()?;
    let plan: MealPlan = read_json(plan)?;

    let list = ShoppingListGenerator::generate(&plan, &recipes, &inventory);

    tracing::info!(items = list.items.len(), "Shopping list generated");
    print_json(&list)
}

#[tracing::instrument(skip(template))]
fn new_plan_command(template: &PlanTemplate, id: Option<String>) -> Result<()> {
    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let plan = template.build(&id).context("Failed to create meal plan")?;

    print_json(&plan)
}
