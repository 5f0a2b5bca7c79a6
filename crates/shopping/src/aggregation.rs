use std::collections::{HashMap, HashSet};

use pantryplan_shared::mealplan::MealSlot;
use pantryplan_shared::normalize_name;
use pantryplan_shared::recipe::{Category, Recipe};
use pantryplan_shared::Unit;
use serde::Serialize;

use crate::categorize;

/// Ingredient quantity demanded by the current plan.
///
/// Recomputed from the plan on every read, never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredIngredient {
    /// Lowercased, trimmed ingredient name.
    pub name: String,
    /// Trimmed name as first written in a recipe.
    pub display_name: String,
    /// `name`, or `name (unit)` when the same name is already required in
    /// another unit.
    pub label: String,
    pub quantity: f64,
    pub unit: Unit,
    pub category: Category,
}

impl RequiredIngredient {
    pub fn new(name: &str, quantity: f64, unit: impl Into<Unit>) -> Self {
        let display_name = name.trim().to_owned();
        let name = normalize_name(name);

        Self {
            display_name,
            label: name.to_owned(),
            category: categorize(&name),
            name,
            quantity,
            unit: unit.into(),
        }
    }
}

pub(crate) enum Group {
    Existing(usize),
    New { isolated: bool },
}

/// Index of `(name, unit)` groups, in insertion order.
///
/// A name seen again in another unit opens a separate, isolated group:
/// units are never converted into each other.
#[derive(Default)]
pub(crate) struct UnitGroups {
    index: HashMap<(String, Unit), usize>,
    names: HashSet<String>,
}

impl UnitGroups {
    pub(crate) fn locate(&mut self, name: &str, unit: &Unit, next: usize) -> Group {
        let key = (name.to_owned(), unit.clone());

        if let Some(position) = self.index.get(&key) {
            return Group::Existing(*position);
        }

        let isolated = !self.names.insert(name.to_owned());
        self.index.insert(key, next);

        Group::New { isolated }
    }
}

pub(crate) fn isolated_label(name: &str, unit: &Unit) -> String {
    format!("{name} ({unit})")
}

/// Sum the scaled ingredients of every assigned slot.
///
/// Empty slots and slots whose recipe is not in `catalog` contribute
/// nothing. Output keeps first-seen order.
pub fn aggregate_requirements<'a>(
    slots: impl IntoIterator<Item = &'a MealSlot>,
    catalog: &[Recipe],
) -> Vec<RequiredIngredient> {
    let recipes = catalog
        .iter()
        .map(|recipe| (recipe.id.as_str(), recipe))
        .collect::<HashMap<_, _>>();

    let mut groups = UnitGroups::default();
    let mut required: Vec<RequiredIngredient> = vec![];

    for slot in slots {
        let Some(slot_recipe) = &slot.recipe else {
            continue;
        };

        let Some(recipe) = recipes.get(slot_recipe.id.as_str()) else {
            tracing::debug!(
                recipe_id = %slot_recipe.id,
                date = %slot.date,
                meal_type = %slot.meal_type,
                "slot references unknown recipe"
            );
            continue;
        };

        let factor = recipe.scale_factor(slot_recipe.servings);

        for ingredient in &recipe.ingredients {
            let name = normalize_name(&ingredient.name);

            if name.is_empty() {
                continue;
            }

            let quantity = ingredient.effective_quantity() * factor;

            match groups.locate(&name, &ingredient.unit, required.len()) {
                Group::Existing(position) => required[position].quantity += quantity,
                Group::New { isolated } => required.push(RequiredIngredient {
                    label: if isolated {
                        isolated_label(&name, &ingredient.unit)
                    } else {
                        name.to_owned()
                    },
                    category: ingredient.category.unwrap_or_else(|| categorize(&name)),
                    display_name: ingredient.name.trim().to_owned(),
                    quantity,
                    unit: ingredient.unit.clone(),
                    name,
                }),
            }
        }
    }

    required
}
