use async_trait::async_trait;
use pantryplan_shared::mealplan::{MealType, SlotRecipe};
use pantryplan_shared::recipe::Recipe;
use pantryplan_shared::{Error, Result, format_date, normalize_name, parse_date};
use serde::Deserialize;
use serde_json::Value;
use time::Date;

use crate::{PlanRange, WeekPlan};

/// What a plan producer is asked to fill.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanRequest {
    pub anchor: Date,
    pub range: PlanRange,
    /// Meal types to fill; empty means all of them.
    pub meal_types: Vec<MealType>,
    pub servings: Option<u16>,
    /// Recipes the producer may choose from.
    pub recipe_ids: Vec<String>,
}

impl PlanRequest {
    pub fn for_plan(plan: &WeekPlan, catalog: &[Recipe]) -> Self {
        Self {
            anchor: plan.anchor(),
            range: plan.range(),
            meal_types: vec![],
            servings: None,
            recipe_ids: catalog.iter().map(|r| r.id.to_owned()).collect(),
        }
    }

    pub fn wants(&self, meal_type: MealType) -> bool {
        self.meal_types.is_empty() || self.meal_types.contains(&meal_type)
    }
}

/// External generator of week-shaped meal plans.
///
/// Called once per request, never retried here. Its payload is a list of
/// `{ date, mealType, recipeRef, servings? }` entries, either as a bare
/// array or under an `entries`/`meals`/`slots` key.
#[async_trait]
pub trait PlanProducer: Send + Sync {
    async fn generate(&self, request: &PlanRequest) -> anyhow::Result<Value>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedEntry {
    pub date: String,
    pub meal_type: MealType,
    pub recipe_ref: String,
    pub servings: Option<u16>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneratedPlan {
    pub entries: Vec<GeneratedEntry>,
    /// Entries that could not be read and were dropped.
    pub malformed: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default, alias = "day")]
    date: Option<String>,
    #[serde(default, alias = "meal", alias = "meal_type")]
    meal_type: Option<String>,
    #[serde(default, alias = "recipe", alias = "recipeId", alias = "recipe_ref")]
    recipe_ref: Option<String>,
    #[serde(default)]
    servings: Option<Value>,
}

impl RawEntry {
    fn into_entry(self) -> Option<GeneratedEntry> {
        let date = format_date(parse_date(self.date.as_deref()?)?);
        let meal_type = self.meal_type?.trim().parse::<MealType>().ok()?;
        let recipe_ref = self.recipe_ref?.trim().to_owned();

        if recipe_ref.is_empty() {
            return None;
        }

        let servings = self.servings.as_ref().and_then(read_servings);

        Some(GeneratedEntry {
            date,
            meal_type,
            recipe_ref,
            servings,
        })
    }
}

/// A positive whole number of servings, written as `2` or `2.0`.
fn read_servings(value: &Value) -> Option<u16> {
    let servings = match value.as_u64() {
        Some(n) => n,
        None => {
            let n = value.as_f64().filter(|n| n.fract() == 0.0 && *n > 0.0)?;
            if n > f64::from(u16::MAX) {
                return None;
            }
            n as u64
        }
    };

    u16::try_from(servings).ok().filter(|n| *n > 0)
}

impl GeneratedPlan {
    /// Read a producer payload. Entries that are not objects or lack a
    /// readable date, meal type or recipe reference are counted and dropped.
    pub fn from_value(value: &Value) -> Self {
        let items: &[Value] = match value {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => ["entries", "meals", "slots"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_array))
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        };

        let mut plan = GeneratedPlan::default();

        for item in items {
            let entry = serde_json::from_value::<RawEntry>(item.clone())
                .ok()
                .and_then(RawEntry::into_entry);

            match entry {
                Some(entry) => plan.entries.push(entry),
                None => {
                    tracing::debug!(entry = %item, "malformed generated entry dropped");
                    plan.malformed += 1;
                }
            }
        }

        plan
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub skipped: usize,
}

fn resolve_recipe<'a>(catalog: &'a [Recipe], recipe_ref: &str) -> Option<&'a Recipe> {
    catalog.iter().find(|r| r.id == recipe_ref).or_else(|| {
        let wanted = normalize_name(recipe_ref);
        catalog.iter().find(|r| normalize_name(&r.name) == wanted)
    })
}

/// Merge a generated plan into `plan`, slot by slot.
///
/// Each entry is applied on its own: an entry outside the plan, for a meal
/// type that was not requested, or naming a recipe missing from the catalog
/// is skipped without affecting the others.
pub fn apply_generated(
    plan: &WeekPlan,
    generated: &GeneratedPlan,
    request: &PlanRequest,
    catalog: &[Recipe],
) -> (WeekPlan, ApplyReport) {
    let mut next = plan.clone();
    let mut report = ApplyReport {
        skipped: generated.malformed,
        ..Default::default()
    };

    for entry in &generated.entries {
        if !request.wants(entry.meal_type) {
            report.skipped += 1;
            continue;
        }

        let Some(recipe) = resolve_recipe(catalog, &entry.recipe_ref) else {
            tracing::debug!(recipe_ref = %entry.recipe_ref, date = %entry.date, "generated recipe not in catalog");
            report.skipped += 1;
            continue;
        };

        let slot_recipe = SlotRecipe {
            id: recipe.id.to_owned(),
            name: recipe.name.to_owned(),
            servings: entry.servings.or(request.servings),
        };

        match next.assign(&entry.date, entry.meal_type, slot_recipe) {
            Ok(updated) => {
                next = updated;
                report.applied += 1;
            }
            Err(err) => {
                tracing::debug!(error = %err, "generated entry skipped");
                report.skipped += 1;
            }
        }
    }

    (next, report)
}

/// Ask `producer` for a plan and merge it into `plan`.
///
/// A failing producer yields [`Error::Generation`] and no plan at all, so
/// the caller's plan is never partially updated.
pub async fn generate_plan<P: PlanProducer + ?Sized>(
    plan: &WeekPlan,
    producer: &P,
    request: &PlanRequest,
    catalog: &[Recipe],
) -> Result<(WeekPlan, ApplyReport)> {
    let payload = producer.generate(request).await.map_err(|err| {
        tracing::warn!(error = %err, anchor = %request.anchor, "plan generation failed");
        Error::Generation(err.to_string())
    })?;

    let generated = GeneratedPlan::from_value(&payload);
    let (next, report) = apply_generated(plan, &generated, request, catalog);

    tracing::info!(
        anchor = %request.anchor,
        applied = report.applied,
        skipped = report.skipped,
        "generated plan applied"
    );

    Ok((next, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_bare_array() {
        let plan = GeneratedPlan::from_value(&json!([
            { "date": "2024-12-31", "mealType": "dinner", "recipeRef": "r1", "servings": 2 },
            { "date": "2025-01-01", "mealType": "Lunch", "recipeRef": "Sopa" },
        ]));

        assert_eq!(plan.malformed, 0);
        assert_eq!(
            plan.entries,
            vec![
                GeneratedEntry {
                    date: "2024-12-31".to_owned(),
                    meal_type: MealType::Dinner,
                    recipe_ref: "r1".to_owned(),
                    servings: Some(2),
                },
                GeneratedEntry {
                    date: "2025-01-01".to_owned(),
                    meal_type: MealType::Lunch,
                    recipe_ref: "Sopa".to_owned(),
                    servings: None,
                },
            ]
        );
    }

    #[test]
    fn test_from_value_wrapped_and_malformed() {
        let plan = GeneratedPlan::from_value(&json!({
            "meals": [
                { "date": "2024-12-31", "mealType": "dinner", "recipeRef": "r1" },
                { "date": "yesterday", "mealType": "dinner", "recipeRef": "r1" },
                { "date": "2024-12-31T00:00:00-03:00", "mealType": "dinner", "recipeRef": "r1" },
                { "date": "2024-12-31", "mealType": "brunch", "recipeRef": "r1" },
                { "date": "2024-12-31", "mealType": "dinner" },
                { "date": "2024-12-31", "mealType": "dinner", "recipeRef": "  " },
                { "date": "2024-12-31", "mealType": "lunch", "recipeRef": "r1", "servings": "four" },
                "dinner on tuesday",
                42,
            ]
        }));

        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.entries[1].servings, None);
        assert_eq!(plan.malformed, 7);
    }

    #[test]
    fn test_from_value_servings_as_whole_float() {
        let plan = GeneratedPlan::from_value(&json!([
            { "date": "2024-12-31", "mealType": "dinner", "recipeRef": "r1", "servings": 2.0 },
            { "date": "2024-12-31", "mealType": "lunch", "recipeRef": "r1", "servings": 2.5 },
            { "date": "2025-01-01", "mealType": "lunch", "recipeRef": "r1", "servings": 0 },
            { "date": "2025-01-02", "mealType": "lunch", "recipeRef": "r1", "servings": -3.0 },
            { "date": "2025-01-03", "mealType": "lunch", "recipeRef": "r1", "servings": 70000 },
        ]));

        let servings = plan.entries.iter().map(|e| e.servings).collect::<Vec<_>>();

        assert_eq!(servings, vec![Some(2), None, None, None, None]);
        assert_eq!(plan.malformed, 0);
    }

    #[test]
    fn test_from_value_unrecognized_shape() {
        assert_eq!(GeneratedPlan::from_value(&json!("nope")), GeneratedPlan::default());
        assert_eq!(
            GeneratedPlan::from_value(&json!({ "week": 1 })),
            GeneratedPlan::default()
        );
    }
}
