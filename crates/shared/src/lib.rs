mod date;
mod error;
pub mod mealplan;
pub mod pantry;
pub mod recipe;
pub mod unit;

pub use date::*;
pub use error::*;
pub use unit::Unit;

/// Lowercased, trimmed form used as the identity of an ingredient name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Missing or `null` quantities read as 0.
pub(crate) fn quantity_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
