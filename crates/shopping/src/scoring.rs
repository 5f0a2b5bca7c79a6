use pantryplan_shared::pantry::PantryItem;
use pantryplan_shared::recipe::Recipe;
use serde::Serialize;

use crate::names_match_loose;

/// Percentage at which a recipe counts as cookable with what is at home.
pub const CAN_COOK_THRESHOLD: u8 = 80;

/// How much of a recipe the pantry roughly covers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityScore {
    pub recipe_id: String,
    pub recipe_name: String,
    pub matched: usize,
    pub total: usize,
    pub percentage: u8,
    pub missing_names: Vec<String>,
}

/// Score a recipe with the permissive matcher.
///
/// A recipe without ingredients scores 0, never 100.
pub fn score_recipe(recipe: &Recipe, pantry: &[PantryItem]) -> AvailabilityScore {
    let mut matched = 0;
    let mut missing_names = vec![];

    for ingredient in &recipe.ingredients {
        let in_pantry = pantry
            .iter()
            .any(|item| names_match_loose(&ingredient.name, &item.name));

        if in_pantry {
            matched += 1;
        } else {
            missing_names.push(ingredient.name.trim().to_owned());
        }
    }

    let total = recipe.ingredients.len();
    let percentage = if total == 0 {
        0
    } else {
        ((matched as f64 / total as f64) * 100.0).round() as u8
    };

    AvailabilityScore {
        recipe_id: recipe.id.to_owned(),
        recipe_name: recipe.name.to_owned(),
        matched,
        total,
        percentage,
        missing_names,
    }
}

/// Score every recipe, best first. Ties keep catalog order.
pub fn rank_recipes(recipes: &[Recipe], pantry: &[PantryItem]) -> Vec<AvailabilityScore> {
    let mut scores = recipes
        .iter()
        .map(|recipe| score_recipe(recipe, pantry))
        .collect::<Vec<_>>();

    scores.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    scores
}

/// Scores at or above `threshold` percent.
pub fn can_cook_now(scores: &[AvailabilityScore], threshold: u8) -> Vec<&AvailabilityScore> {
    scores.iter().filter(|s| s.percentage >= threshold).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub can_cook_now: Vec<AvailabilityScore>,
    pub almost: Vec<AvailabilityScore>,
}

/// Ranked suggestions split at `threshold`, each bucket capped at `limit`.
///
/// Recipes with nothing at home are left out of `almost`.
pub fn suggest(recipes: &[Recipe], pantry: &[PantryItem], threshold: u8, limit: usize) -> Suggestions {
    let (ready, rest): (Vec<_>, Vec<_>) = rank_recipes(recipes, pantry)
        .into_iter()
        .partition(|score| score.percentage >= threshold);

    Suggestions {
        can_cook_now: ready.into_iter().take(limit).collect(),
        almost: rest
            .into_iter()
            .filter(|score| score.matched > 0)
            .take(limit)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantryplan_shared::recipe::Ingredient;

    fn tortilla() -> Recipe {
        Recipe::new("tortilla", "Tortilla de papas", 4)
            .with_ingredient(Ingredient::new("papas", 1.0, "kg"))
            .with_ingredient(Ingredient::new("huevo", 6.0, ""))
            .with_ingredient(Ingredient::new("cebolla", 1.0, ""))
    }

    fn pantry() -> Vec<PantryItem> {
        vec![
            PantryItem::new("Huevos", 12.0, ""),
            PantryItem::new("papa", 2.0, "kg"),
            PantryItem::new("arroz", 1.0, "kg"),
        ]
    }

    #[test]
    fn test_score_recipe() {
        let score = score_recipe(&tortilla(), &pantry());

        assert_eq!(score.matched, 2);
        assert_eq!(score.total, 3);
        assert_eq!(score.percentage, 67);
        assert_eq!(score.missing_names, vec!["cebolla"]);
    }

    #[test]
    fn test_zero_ingredients_scores_zero() {
        let score = score_recipe(&Recipe::new("agua", "Agua", 1), &pantry());

        assert_eq!(score.total, 0);
        assert_eq!(score.percentage, 0);
    }

    #[test]
    fn test_rank_is_stable_and_descending() {
        let recipes = vec![
            Recipe::new("a", "A", 1).with_ingredient(Ingredient::new("sal", 1.0, "g")),
            tortilla(),
            Recipe::new("b", "B", 1).with_ingredient(Ingredient::new("arroz", 100.0, "g")),
            Recipe::new("c", "C", 1).with_ingredient(Ingredient::new("huevo", 1.0, "")),
        ];

        let ids = rank_recipes(&recipes, &pantry())
            .into_iter()
            .map(|s| s.recipe_id)
            .collect::<Vec<_>>();

        assert_eq!(ids, vec!["b", "c", "tortilla", "a"]);
    }

    #[test]
    fn test_can_cook_now_threshold() {
        let recipes = vec![
            tortilla(),
            Recipe::new("b", "B", 1).with_ingredient(Ingredient::new("arroz", 100.0, "g")),
        ];
        let scores = rank_recipes(&recipes, &pantry());

        let ready = can_cook_now(&scores, CAN_COOK_THRESHOLD);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].recipe_id, "b");

        assert_eq!(can_cook_now(&scores, 60).len(), 2);
    }

    #[test]
    fn test_suggest_buckets() {
        let recipes = vec![
            tortilla(),
            Recipe::new("b", "B", 1).with_ingredient(Ingredient::new("arroz", 100.0, "g")),
            Recipe::new("c", "C", 1).with_ingredient(Ingredient::new("pescado", 1.0, "kg")),
        ];

        let suggestions = suggest(&recipes, &pantry(), CAN_COOK_THRESHOLD, 10);

        assert_eq!(suggestions.can_cook_now.len(), 1);
        assert_eq!(suggestions.almost.len(), 1);
        assert_eq!(suggestions.almost[0].recipe_id, "tortilla");

        let capped = suggest(&recipes, &pantry(), 0, 1);
        assert_eq!(capped.can_cook_now.len(), 1);
    }
}
