use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pantryplan_mealplan::{PlanSnapshot, WeekPlan};
use pantryplan_shared::pantry::PantryItem;
use pantryplan_shared::recipe::Recipe;
use serde::de::DeserializeOwned;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let recipes: Vec<Recipe> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = recipes.len(), "recipes loaded");

    Ok(recipes)
}

pub fn load_pantry(path: &Path) -> Result<Vec<PantryItem>> {
    let pantry: Vec<PantryItem> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = pantry.len(), "pantry loaded");

    Ok(pantry)
}

/// Plan stored as `{ anchor, range?, slots }`.
pub fn load_plan(path: &Path) -> Result<WeekPlan> {
    let snapshot: PlanSnapshot = read_json(path)?;
    let plan = WeekPlan::from_snapshot(snapshot)
        .with_context(|| format!("Invalid plan in {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        anchor = %plan.anchor(),
        assigned = plan.assigned().count(),
        "plan loaded"
    );

    Ok(plan)
}
