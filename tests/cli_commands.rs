//! End-to-end runs of the `wastenot` binary

use anyhow::Result;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::{Command, Output};
use temp_dir::TempDir;

fn run(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_wastenot"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()?)
}

fn wastenot(args: &[&str]) -> Result<Value> {
    let output = run(args)?;

    assert!(
        output.status.success(),
        "wastenot {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

/// Runs a command expected to fail cleanly; returns its stderr
fn wastenot_fails(args: &[&str]) -> Result<String> {
    let output = run(args)?;
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    assert_eq!(output.status.code(), Some(1), "unexpected exit: {}", stderr);
    assert!(!stderr.contains("panicked"), "wastenot panicked: {}", stderr);
    Ok(stderr)
}

fn write(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.child(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn dinner_plan(days: &str) -> Result<Value> {
    wastenot(&[
        "new-plan",
        "--start",
        "2025-10-20",
        "--days",
        days,
        "--id",
        "week-1",
        "--no-breakfast",
        "--no-lunch",
    ])
}

const INVENTORY: &str = r#"[
  { "id": "ing-spinach", "name": "ほうれん草", "quantity": 1, "unit": "束",
    "expiryDate": "2025-10-21", "storageLocation": "fridge" },
  { "id": "ing-soy", "name": "醤油", "quantity": 500, "unit": "ml",
    "storageLocation": "pantry" }
]"#;

#[test]
fn test_cli_help_shows_all_commands() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_wastenot"))
        .arg("--help")
        .output()?;
    let help_text = String::from_utf8_lossy(&output.stdout);

    for command in [
        "rank",
        "optimize",
        "evaluate",
        "substitute",
        "expiring",
        "shopping",
        "new-plan",
    ] {
        assert!(help_text.contains(command), "{} command not in help", command);
    }
    Ok(())
}

#[test]
fn test_new_plan_then_optimize() -> Result<()> {
    let dir = TempDir::new()?;
    let inventory = dir.child("inventory.json");
    std::fs::write(&inventory, INVENTORY)?;

    let plan = wastenot(&[
        "new-plan",
        "--start",
        "2025-10-20",
        "--days",
        "2",
        "--id",
        "week-1",
        "--no-breakfast",
        "--no-lunch",
    ])?;
    assert_eq!(plan["id"], "week-1");
    assert_eq!(plan["meals"].as_array().map(Vec::len), Some(2));

    let plan_path = dir.child("plan.json");
    std::fs::write(&plan_path, serde_json::to_string(&plan)?)?;

    let optimized = wastenot(&[
        "optimize",
        "--plan",
        &plan_path.to_string_lossy(),
        "--inventory",
        &inventory.to_string_lossy(),
        "--today",
        "2025-10-20",
    ])?;

    assert_eq!(optimized["unfilledSlotIds"].as_array().map(Vec::len), Some(0));
    assert_eq!(optimized["plan"]["meals"][0]["recipeId"], "recipe-008");
    Ok(())
}

#[test]
fn test_rank_puts_spinach_recipe_first() -> Result<()> {
    let dir = TempDir::new()?;
    let inventory = dir.child("inventory.json");
    std::fs::write(&inventory, INVENTORY)?;

    let ranked = wastenot(&[
        "rank",
        "--inventory",
        &inventory.to_string_lossy(),
        "--today",
        "2025-10-20",
        "--limit",
        "3",
    ])?;

    assert_eq!(ranked.as_array().map(Vec::len), Some(3));
    assert_eq!(ranked[0]["recipe"]["name"], "ほうれん草のおひたし");
    Ok(())
}

#[test]
fn test_evaluate_scores_optimized_plan_higher() -> Result<()> {
    let dir = TempDir::new()?;
    let inventory = write(&dir, "inventory.json", INVENTORY)?;
    let inventory = inventory.to_string_lossy();
    let empty = write(&dir, "empty.json", &dinner_plan("2")?.to_string())?;
    let empty = empty.to_string_lossy();

    let optimized = wastenot(&[
        "optimize",
        "--plan",
        &empty,
        "--inventory",
        &inventory,
        "--today",
        "2025-10-20",
    ])?;
    let filled = write(&dir, "filled.json", &optimized["plan"].to_string())?;
    let filled = filled.to_string_lossy();

    let evaluate = |plan: &str| {
        wastenot(&[
            "evaluate",
            "--plan",
            plan,
            "--inventory",
            &inventory,
            "--today",
            "2025-10-20",
        ])
    };
    let before = evaluate(&empty)?;
    let after = evaluate(&filled)?;

    assert_eq!(before["ingredientUsage"], 0.0);
    assert!(after["ingredientUsage"].as_f64() > Some(0.0));
    assert!(after["total"].as_f64() > before["total"].as_f64());
    Ok(())
}

#[test]
fn test_substitute_suggests_olive_oil_for_butter() -> Result<()> {
    let dir = TempDir::new()?;
    let recipes = write(
        &dir,
        "recipes.json",
        r#"[{"id": "saute", "name": "きのこソテー",
             "ingredients": [{"name": "バター"}, {"name": "しめじ"}]}]"#,
    )?;
    let inventory = write(
        &dir,
        "inventory.json",
        r#"[{"id": "oil", "name": "オリーブオイル"}, {"id": "shimeji", "name": "しめじ"}]"#,
    )?;

    let result = wastenot(&[
        "substitute",
        "saute",
        "--inventory",
        &inventory.to_string_lossy(),
        "--recipes",
        &recipes.to_string_lossy(),
    ])?;

    assert_eq!(result["recipeName"], "きのこソテー");
    assert_eq!(result["substitutions"], json!({ "バター": "オリーブオイル" }));
    Ok(())
}

#[test]
fn test_substitute_unknown_recipe_fails() -> Result<()> {
    let dir = TempDir::new()?;
    let inventory = write(&dir, "inventory.json", INVENTORY)?;

    let stderr = wastenot_fails(&[
        "substitute",
        "recipe-404",
        "--inventory",
        &inventory.to_string_lossy(),
    ])?;

    assert!(stderr.contains("recipe-404"));
    Ok(())
}

#[test]
fn test_expiring_orders_by_date_within_window() -> Result<()> {
    let dir = TempDir::new()?;
    let inventory = write(
        &dir,
        "inventory.json",
        r#"[
          { "id": "yogurt", "name": "ヨーグルト", "expiryDate": "2025-10-25" },
          { "id": "milk", "name": "牛乳", "expiryDate": "2025-10-21" },
          { "id": "salt", "name": "塩" },
          { "id": "tofu", "name": "豆腐", "expiryDate": "2025-10-19" }
        ]"#,
    )?;
    let inventory = inventory.to_string_lossy();

    let report = wastenot(&[
        "expiring",
        "--inventory",
        &inventory,
        "--today",
        "2025-10-20",
        "--days",
        "2",
    ])?;
    let ids: Vec<&str> = report
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["tofu", "milk"]);
    assert_eq!(report[0]["daysUntilExpiry"], -1);
    assert_eq!(report[1]["status"], "critical");

    let everything = wastenot(&[
        "expiring",
        "--inventory",
        &inventory,
        "--today",
        "2025-10-20",
        "--days",
        "100000000",
    ])?;
    assert_eq!(everything.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn test_shopping_lists_only_missing_ingredients() -> Result<()> {
    let dir = TempDir::new()?;
    let inventory = write(&dir, "inventory.json", INVENTORY)?;
    let mut plan = dinner_plan("1")?;
    plan["meals"][0]["recipeId"] = json!("recipe-008");
    let plan = write(&dir, "plan.json", &plan.to_string())?;

    let list = wastenot(&[
        "shopping",
        "--plan",
        &plan.to_string_lossy(),
        "--inventory",
        &inventory.to_string_lossy(),
    ])?;

    assert_eq!(list["mealPlanId"], "week-1");
    let names: Vec<&str> = list["items"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, vec!["かつお節"]);
    Ok(())
}

#[test]
fn test_seeded_policy_override_needs_seed() -> Result<()> {
    let dir = TempDir::new()?;
    let inventory = write(&dir, "inventory.json", INVENTORY)?;
    let plan = write(&dir, "plan.json", &dinner_plan("2")?.to_string())?;

    let stderr = wastenot_fails(&[
        "optimize",
        "--plan",
        &plan.to_string_lossy(),
        "--inventory",
        &inventory.to_string_lossy(),
        "--policy",
        "seeded_random",
    ])?;

    assert!(stderr.contains("seed"));
    Ok(())
}

#[test]
fn test_new_plan_rejects_oversized_span() -> Result<()> {
    let stderr = wastenot_fails(&["new-plan", "--days", "4000000000"])?;
    assert!(stderr.contains("Failed to create meal plan"));

    wastenot_fails(&["new-plan", "--start", "2025-10-20", "--days", "367"])?;
    Ok(())
}
