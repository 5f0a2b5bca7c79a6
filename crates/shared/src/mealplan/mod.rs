use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealType {
    /// Column of this meal type in a day row.
    pub fn position(&self) -> usize {
        match self {
            MealType::Breakfast => 0,
            MealType::Lunch => 1,
            MealType::Snack => 2,
            MealType::Dinner => 3,
        }
    }
}

/// Recipe bound to a slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecipe {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Servings actually cooked; `None` means the recipe's base servings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u16>,
}

impl SlotRecipe {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            servings: None,
        }
    }

    pub fn servings(mut self, servings: u16) -> Self {
        self.servings = Some(servings);
        self
    }
}

/// One day/meal-type coordinate of a plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    pub date: String,
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<SlotRecipe>,
}

impl MealSlot {
    pub fn empty(date: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            date: date.into(),
            meal_type,
            recipe: None,
        }
    }

    pub fn with_recipe(mut self, recipe: SlotRecipe) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.recipe.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parse_and_order() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!("snack".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("brunch".parse::<MealType>().is_err());

        let positions = MealType::VARIANTS
            .iter()
            .map(MealType::position)
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_slot_serde() {
        let slot: MealSlot = serde_json::from_str(
            r#"{ "date": "2024-12-31", "mealType": "dinner", "recipe": { "id": "r1", "servings": 2 } }"#,
        )
        .unwrap();

        assert_eq!(slot.meal_type, MealType::Dinner);
        assert_eq!(slot.recipe.as_ref().and_then(|r| r.servings), Some(2));

        let empty: MealSlot =
            serde_json::from_str(r#"{ "date": "2024-12-31", "mealType": "lunch" }"#).unwrap();
        assert!(empty.is_empty());
    }
}
