use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum MassUnit {
    #[strum(to_string = "mg", serialize = "milligram", serialize = "milligrams", serialize = "miligramo", serialize = "miligramos")]
    Milligram,
    #[strum(to_string = "g", serialize = "gr", serialize = "gram", serialize = "grams", serialize = "gramo", serialize = "gramos")]
    Gram,
    #[strum(to_string = "kg", serialize = "kilo", serialize = "kilos", serialize = "kilogram", serialize = "kilograms", serialize = "kilogramo", serialize = "kilogramos")]
    Kilogram,
    #[strum(to_string = "oz", serialize = "ounce", serialize = "ounces", serialize = "onza", serialize = "onzas")]
    Ounce,
    #[strum(to_string = "lb", serialize = "lbs", serialize = "pound", serialize = "pounds", serialize = "libra", serialize = "libras")]
    Pound,
}

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum VolumeUnit {
    #[strum(to_string = "ml", serialize = "milliliter", serialize = "milliliters", serialize = "mililitro", serialize = "mililitros", serialize = "cc")]
    Milliliter,
    #[strum(to_string = "l", serialize = "lt", serialize = "liter", serialize = "liters", serialize = "litre", serialize = "litres", serialize = "litro", serialize = "litros")]
    Liter,
    #[strum(to_string = "tsp", serialize = "teaspoon", serialize = "teaspoons", serialize = "cucharadita", serialize = "cucharaditas")]
    Teaspoon,
    #[strum(to_string = "tbsp", serialize = "tablespoon", serialize = "tablespoons", serialize = "cucharada", serialize = "cucharadas")]
    Tablespoon,
    #[strum(to_string = "cup", serialize = "cups", serialize = "taza", serialize = "tazas")]
    Cup,
}

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum CountUnit {
    #[strum(to_string = "unit", serialize = "units", serialize = "u", serialize = "un", serialize = "unidad", serialize = "unidades", serialize = "piece", serialize = "pieces", serialize = "whole", serialize = "item", serialize = "items")]
    Piece,
    #[strum(to_string = "clove", serialize = "cloves", serialize = "diente", serialize = "dientes")]
    Clove,
    #[strum(to_string = "slice", serialize = "slices", serialize = "rebanada", serialize = "rebanadas")]
    Slice,
    #[strum(to_string = "can", serialize = "cans", serialize = "lata", serialize = "latas")]
    Can,
    #[strum(to_string = "dozen", serialize = "docena", serialize = "docenas")]
    Dozen,
    #[strum(to_string = "bunch", serialize = "bunches", serialize = "atado", serialize = "manojo")]
    Bunch,
}

/// Family a unit belongs to.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    Mass,
    Volume,
    Count,
    Other,
}

/// Measurement unit of an ingredient or pantry quantity.
///
/// Aliases collapse onto one variant ("g", "grams" and "gramos" are the same
/// unit) but distinct units are never converted into each other: 1 kg and
/// 1000 g stay two different quantities. Anything unrecognised is kept
/// verbatim (lowercased) in [`Unit::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Unit {
    Mass(MassUnit),
    Volume(VolumeUnit),
    Count(CountUnit),
    Other(String),
}

impl Unit {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().trim_end_matches('.').to_lowercase();

        if normalized.is_empty() {
            return Unit::Count(CountUnit::Piece);
        }

        if let Ok(unit) = MassUnit::from_str(&normalized) {
            return Unit::Mass(unit);
        }

        if let Ok(unit) = VolumeUnit::from_str(&normalized) {
            return Unit::Volume(unit);
        }

        if let Ok(unit) = CountUnit::from_str(&normalized) {
            return Unit::Count(unit);
        }

        Unit::Other(normalized)
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Mass(_) => UnitKind::Mass,
            Unit::Volume(_) => UnitKind::Volume,
            Unit::Count(_) => UnitKind::Count,
            Unit::Other(_) => UnitKind::Other,
        }
    }

    /// Both units measure the same physical dimension (e.g. g and kg).
    pub fn same_family(&self, other: &Unit) -> bool {
        match (self, other) {
            (Unit::Other(a), Unit::Other(b)) => a == b,
            _ => self.kind() == other.kind(),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Unit::Mass(unit) => unit.as_ref(),
            Unit::Volume(unit) => unit.as_ref(),
            Unit::Count(unit) => unit.as_ref(),
            Unit::Other(unit) => unit.as_str(),
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Count(CountUnit::Piece)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<&str> for Unit {
    fn from(value: &str) -> Self {
        Unit::parse(value)
    }
}

impl From<Option<String>> for Unit {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Unit::parse).unwrap_or_default()
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        value.symbol().to_owned()
    }
}
