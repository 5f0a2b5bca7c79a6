use pantryplan_shared::normalize_name;
use pantryplan_shared::pantry::PantryItem;
use serde::Serialize;

use crate::RequiredIngredient;

/// Exact matcher used for shopping lists: trimmed, case-insensitive equality.
pub fn names_match_exact(required: &str, pantry: &str) -> bool {
    normalize_name(required) == normalize_name(pantry)
}

/// Permissive matcher used for availability heuristics.
///
/// Accepts containment in either direction, and folds a trailing "s" off
/// the pantry name ("tomates" matches "tomate").
pub fn names_match_loose(required: &str, pantry: &str) -> bool {
    let required = normalize_name(required);
    let pantry = normalize_name(pantry);

    if required.is_empty() || pantry.is_empty() {
        return false;
    }

    if required.contains(&pantry) || pantry.contains(&required) {
        return true;
    }

    match pantry.strip_suffix('s') {
        Some(singular) if !singular.is_empty() => {
            required.contains(singular) || singular.contains(&required)
        }
        _ => false,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Resolution {
    /// Fully covered by the pantry.
    pub available: Vec<RequiredIngredient>,
    /// Still to acquire, with only the uncovered remainder as quantity.
    pub missing: Vec<RequiredIngredient>,
}

fn pantry_quantity(item: &PantryItem) -> f64 {
    if item.quantity.is_finite() && item.quantity > 0.0 {
        item.quantity
    } else {
        0.0
    }
}

/// Split requirements into what the pantry covers and what is missing.
///
/// Among pantry items with the same name, one in the same unit is
/// preferred. Quantities in different units are compared as they are.
pub fn resolve_against_pantry(required: &[RequiredIngredient], pantry: &[PantryItem]) -> Resolution {
    let mut resolution = Resolution::default();

    for ingredient in required {
        let mut candidates = pantry
            .iter()
            .filter(|item| names_match_exact(&ingredient.name, &item.name))
            .peekable();

        let first = candidates.peek().copied();
        let item = candidates
            .find(|item| item.unit == ingredient.unit)
            .or(first);

        let Some(item) = item else {
            resolution.missing.push(ingredient.clone());
            continue;
        };

        if item.unit != ingredient.unit {
            tracing::debug!(
                ingredient = %ingredient.name,
                required_unit = %ingredient.unit,
                pantry_unit = %item.unit,
                "comparing pantry quantity across units"
            );
        }

        let available = pantry_quantity(item);

        if available >= ingredient.quantity {
            resolution.available.push(ingredient.clone());
        } else {
            resolution.missing.push(RequiredIngredient {
                quantity: ingredient.quantity - available,
                ..ingredient.clone()
            });
        }
    }

    resolution
}
