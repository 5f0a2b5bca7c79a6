use std::collections::BTreeMap;

use pantryplan_shared::recipe::Category;
use pantryplan_shared::{Unit, normalize_name};
use serde::Serialize;

use crate::aggregation::{Group, UnitGroups, isolated_label};
use crate::{RequiredIngredient, format_quantity};

/// One line of the shopping list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingEntry {
    pub name: String,
    pub display_name: String,
    pub unit: Unit,
    pub quantity: f64,
    pub category: Category,
}

impl ShoppingEntry {
    /// Quantity and unit as shown on a printed list, e.g. "1.5 kg".
    pub fn display_quantity(&self) -> String {
        format_quantity(self.quantity, &self.unit)
    }
}

impl From<&ShoppingEntry> for RequiredIngredient {
    fn from(entry: &ShoppingEntry) -> Self {
        let suffix = format!(" ({})", entry.unit);
        let display_name = entry
            .display_name
            .strip_suffix(suffix.as_str())
            .unwrap_or(entry.display_name.as_str());

        RequiredIngredient {
            name: entry.name.to_owned(),
            display_name: display_name.to_owned(),
            label: entry.name.to_owned(),
            quantity: entry.quantity,
            unit: entry.unit.clone(),
            category: entry.category,
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Merge missing ingredients into shopping entries.
///
/// Entries with the same name and unit are summed; the same name in a
/// different unit gets its own entry labelled with the unit. The display
/// name keeps the casing of the first insertion with its first letter
/// uppercased. Output keeps first-seen order.
pub fn consolidate(missing: &[RequiredIngredient]) -> Vec<ShoppingEntry> {
    let mut groups = UnitGroups::default();
    let mut entries: Vec<ShoppingEntry> = vec![];

    for ingredient in missing {
        let name = normalize_name(&ingredient.name);

        if name.is_empty() {
            continue;
        }

        match groups.locate(&name, &ingredient.unit, entries.len()) {
            Group::Existing(position) => entries[position].quantity += ingredient.quantity,
            Group::New { isolated } => {
                let written = match ingredient.display_name.trim() {
                    "" => capitalize(ingredient.name.trim()),
                    written => capitalize(written),
                };

                let display_name = if isolated {
                    isolated_label(&written, &ingredient.unit)
                } else {
                    written
                };

                entries.push(ShoppingEntry {
                    display_name,
                    unit: ingredient.unit.clone(),
                    quantity: ingredient.quantity,
                    category: ingredient.category,
                    name,
                });
            }
        }
    }

    entries
}

fn fold_accents(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

/// Accents fold onto their base letter; "ñ" sorts after every "n".
fn collation_key(name: &str) -> (String, String) {
    let lower = name.to_lowercase();
    let mut base = String::with_capacity(lower.len());

    for c in lower.chars() {
        if c == 'ñ' {
            base.push('n');
            base.push(char::MAX);
        } else {
            base.push(fold_accents(c));
        }
    }

    (base, lower)
}

/// Entries in shopping-list order: by display name, ignoring case and accents.
pub fn sorted_for_display(entries: &[ShoppingEntry]) -> Vec<ShoppingEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_cached_key(|entry| collation_key(&entry.display_name));
    sorted
}

/// Entries grouped by aisle, in aisle order, each group sorted for display.
pub fn group_by_category(entries: &[ShoppingEntry]) -> BTreeMap<Category, Vec<ShoppingEntry>> {
    let mut groups: BTreeMap<Category, Vec<ShoppingEntry>> = BTreeMap::new();

    for entry in sorted_for_display(entries) {
        groups.entry(entry.category).or_default().push(entry);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consolidate_sums_same_name_and_unit() {
        let missing = vec![
            RequiredIngredient::new("carne", 300.0, "g"),
            RequiredIngredient::new("Carne ", 200.0, "gramos"),
            RequiredIngredient::new("cebolla", 2.0, ""),
        ];

        let entries = consolidate(&missing);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "Carne");
        assert_eq!(entries[0].quantity, 500.0);
        assert_eq!(entries[0].category, Category::Butcher);
        assert_eq!(entries[1].display_name, "Cebolla");
    }

    #[test]
    fn test_consolidate_keeps_written_casing() {
        let missing = vec![
            RequiredIngredient::new("pan Rallado", 100.0, "g"),
            RequiredIngredient::new("PAN RALLADO", 50.0, "g"),
            RequiredIngredient::new("queso de Cabra", 1.0, "kg"),
            RequiredIngredient::new("Queso de cabra", 200.0, "g"),
        ];

        let entries = consolidate(&missing);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "pan rallado");
        assert_eq!(entries[0].display_name, "Pan Rallado");
        assert_eq!(entries[0].quantity, 150.0);
        assert_eq!(entries[1].display_name, "Queso de Cabra");
        assert_eq!(entries[2].display_name, "Queso de cabra (g)");
    }

    #[test]
    fn test_consolidate_isolates_other_units() {
        let missing = vec![
            RequiredIngredient::new("leche", 500.0, "ml"),
            RequiredIngredient::new("leche", 1.0, "cup"),
            RequiredIngredient::new("leche", 250.0, "ml"),
        ];

        let entries = consolidate(&missing);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "Leche");
        assert_eq!(entries[0].quantity, 750.0);
        assert_eq!(entries[1].display_name, "Leche (cup)");
    }

    #[test]
    fn test_consolidate_is_idempotent() {
        let missing = vec![
            RequiredIngredient::new("carne", 300.0, "g"),
            RequiredIngredient::new("leche", 1.0, "l"),
            RequiredIngredient::new("carne", 2.0, "unit"),
            RequiredIngredient::new("carne", 100.0, "g"),
            RequiredIngredient::new("pan Rallado", 1.0, "cup"),
            RequiredIngredient::new("pan rallado", 80.0, "g"),
        ];

        let once = consolidate(&missing);
        let again = consolidate(&once.iter().map(RequiredIngredient::from).collect::<Vec<_>>());

        assert_eq!(once, again);
    }

    #[test]
    fn test_sorted_for_display_ignores_case_and_accents() {
        let entries = consolidate(&[
            RequiredIngredient::new("zanahoria", 1.0, ""),
            RequiredIngredient::new("Ñoquis", 500.0, "g"),
            RequiredIngredient::new("ázucar", 1.0, "kg"),
            RequiredIngredient::new("nueces", 100.0, "g"),
            RequiredIngredient::new("ajo", 1.0, ""),
        ]);

        let names = sorted_for_display(&entries)
            .into_iter()
            .map(|e| e.display_name)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Ajo", "Ázucar", "Nueces", "Ñoquis", "Zanahoria"]);
    }

    #[test]
    fn test_group_by_category_in_aisle_order() {
        let entries = consolidate(&[
            RequiredIngredient::new("queso", 200.0, "g"),
            RequiredIngredient::new("tomate", 3.0, ""),
            RequiredIngredient::new("arroz", 1.0, "kg"),
            RequiredIngredient::new("cebolla", 1.0, ""),
        ]);

        let groups = group_by_category(&entries);
        let aisles = groups.keys().copied().collect::<Vec<_>>();

        assert_eq!(
            aisles,
            vec![Category::FruitsAndVegetables, Category::DairyAndEggs, Category::Grocery]
        );
        assert_eq!(groups[&Category::FruitsAndVegetables][0].name, "cebolla");
    }
}
