use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{Unit, parse_date};

/// Snapshot of one item held in the household inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub name: String,
    #[serde(default, deserialize_with = "crate::quantity_or_zero")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

impl PantryItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<Unit>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            expiration_date: None,
        }
    }

    pub fn expiring_on(mut self, date: impl Into<String>) -> Self {
        self.expiration_date = Some(date.into());
        self
    }

    pub fn expiration(&self) -> Option<Date> {
        self.expiration_date.as_deref().and_then(parse_date)
    }

    /// An item without a readable expiration date never expires.
    pub fn is_expired(&self, today: Date) -> bool {
        self.expiration().is_some_and(|date| date < today)
    }
}

/// Items that are still good today but expire within `days` days,
/// soonest first.
pub fn expiring_within(pantry: &[PantryItem], today: Date, days: u16) -> Vec<&PantryItem> {
    let limit = today + Duration::days(i64::from(days));

    let mut items = pantry
        .iter()
        .filter_map(|item| item.expiration().map(|date| (date, item)))
        .filter(|(date, _)| *date >= today && *date <= limit)
        .collect::<Vec<_>>();

    items.sort_by_key(|(date, _)| *date);

    items.into_iter().map(|(_, item)| item).collect()
}
