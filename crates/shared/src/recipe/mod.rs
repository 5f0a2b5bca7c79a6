use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::Unit;

/// Store aisle an ingredient is bought from.
///
/// Variant order is the order aisles are listed on a shopping list.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Fresh fruits, vegetables and herbs
    FruitsAndVegetables,
    /// Red meat, poultry, cold cuts
    Butcher,
    /// Fish and seafood
    Seafood,
    /// Milk, butter, cream, cheese, yogurt, eggs
    DairyAndEggs,
    /// Bread, tortillas, pastry
    Bakery,
    /// Dry goods: pasta, rice, flour, oils, canned food, spices
    Grocery,
    /// Frozen products
    Frozen,
    /// Cookies, chocolate, chips
    SnacksAndConfectionery,
    /// Water, juice, soda, wine
    Beverages,
    #[default]
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "crate::quantity_or_zero")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<Unit>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Quantity as a finite, non-negative number; anything else counts as 0.
    pub fn effective_quantity(&self) -> f64 {
        if self.quantity.is_finite() && self.quantity > 0.0 {
            self.quantity
        } else {
            0.0
        }
    }
}

fn default_base_servings() -> u16 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default = "default_base_servings", alias = "servings")]
    pub base_servings: u16,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Nutrition summary, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<serde_json::Value>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_servings: u16) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_servings,
            ingredients: vec![],
            nutrition: None,
        }
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Ratio between the servings actually cooked and the recipe's base.
    ///
    /// `None` cooks the recipe as written. A recipe declaring zero base
    /// servings cannot be scaled and is used as written.
    pub fn scale_factor(&self, servings: Option<u16>) -> f64 {
        if self.base_servings == 0 {
            return 1.0;
        }

        let servings = servings.unwrap_or(self.base_servings);

        f64::from(servings) / f64::from(self.base_servings)
    }
}
