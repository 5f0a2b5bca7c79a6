use pantryplan_shared::mealplan::{MealSlot, MealType, SlotRecipe};
use pantryplan_shared::{Error, Result, format_date, parse_date};
use serde::{Deserialize, Serialize};
use strum::VariantArray;
use time::Date;

use crate::{PlanRange, date_for_day_index, day_index_for_date, week_start};

const MEALS_PER_DAY: usize = MealType::VARIANTS.len();

/// Calendar of meal slots anchored on a Monday.
///
/// Holds exactly one slot per (day, meal type) coordinate of its range, in
/// day order then meal order. Mutations return a new plan and leave `self`
/// untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct WeekPlan {
    anchor: Date,
    range: PlanRange,
    slots: Vec<MealSlot>,
}

/// Serialized form of a [`WeekPlan`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    pub anchor: String,
    #[serde(default)]
    pub range: PlanRange,
    #[serde(default)]
    pub slots: Vec<MealSlot>,
}

/// One day of the grid: its index, date and one slot per meal type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayRow<'a> {
    pub index: usize,
    pub date: &'a str,
    pub slots: &'a [MealSlot],
}

impl DayRow<'_> {
    pub fn slot(&self, meal_type: MealType) -> &MealSlot {
        &self.slots[meal_type.position()]
    }
}

impl WeekPlan {
    /// Empty plan covering `range` days from the Monday of `anchor`'s week.
    pub fn new(anchor: Date, range: PlanRange) -> Self {
        let anchor = week_start(anchor);
        let slots = (0..range.days())
            .flat_map(|index| {
                let date = date_for_day_index(anchor, index);
                MealType::VARIANTS
                    .iter()
                    .map(move |meal_type| MealSlot::empty(date.to_owned(), *meal_type))
            })
            .collect();

        Self {
            anchor,
            range,
            slots,
        }
    }

    /// Plan built from externally supplied slots.
    ///
    /// Slots whose date is unreadable or outside the range are left out;
    /// coordinates nobody supplied stay empty; a later duplicate wins.
    pub fn from_slots(
        anchor: Date,
        range: PlanRange,
        slots: impl IntoIterator<Item = MealSlot>,
    ) -> Self {
        let mut plan = Self::new(anchor, range);

        for slot in slots {
            let Some(index) = day_index_for_date(plan.anchor, &slot.date, range) else {
                tracing::debug!(date = %slot.date, meal_type = %slot.meal_type, "slot outside plan, excluded");
                continue;
            };

            plan.slots[index * MEALS_PER_DAY + slot.meal_type.position()].recipe = slot.recipe;
        }

        plan
    }

    pub fn from_snapshot(snapshot: PlanSnapshot) -> Result<Self> {
        let Some(anchor) = parse_date(&snapshot.anchor) else {
            return Err(Error::InvalidDate(snapshot.anchor));
        };

        Ok(Self::from_slots(anchor, snapshot.range, snapshot.slots))
    }

    pub fn to_snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            anchor: format_date(self.anchor),
            range: self.range,
            slots: self.slots.to_vec(),
        }
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    pub fn range(&self) -> PlanRange {
        self.range
    }

    pub fn slots(&self) -> &[MealSlot] {
        &self.slots
    }

    /// Slots that have a recipe bound.
    pub fn assigned(&self) -> impl Iterator<Item = &MealSlot> {
        self.slots.iter().filter(|slot| !slot.is_empty())
    }

    pub fn slot(&self, date: &str, meal_type: MealType) -> Option<&MealSlot> {
        self.position(date, meal_type)
            .ok()
            .map(|position| &self.slots[position])
    }

    pub fn grid(&self) -> Vec<DayRow<'_>> {
        self.slots
            .chunks(MEALS_PER_DAY)
            .enumerate()
            .map(|(index, slots)| DayRow {
                index,
                date: &slots[0].date,
                slots,
            })
            .collect()
    }

    pub fn assign(&self, date: &str, meal_type: MealType, recipe: SlotRecipe) -> Result<Self> {
        let position = self.position(date, meal_type)?;
        let mut plan = self.clone();
        plan.slots[position].recipe = Some(recipe);

        Ok(plan)
    }

    pub fn clear(&self, date: &str, meal_type: MealType) -> Result<Self> {
        let position = self.position(date, meal_type)?;
        let mut plan = self.clone();
        plan.slots[position].recipe = None;

        Ok(plan)
    }

    pub fn clear_day(&self, date: &str) -> Result<Self> {
        let Some(index) = day_index_for_date(self.anchor, date, self.range) else {
            return Err(Error::InvalidDate(format!("{date} is outside the plan")));
        };

        let mut plan = self.clone();
        for slot in &mut plan.slots[index * MEALS_PER_DAY..(index + 1) * MEALS_PER_DAY] {
            slot.recipe = None;
        }

        Ok(plan)
    }

    /// Move the recipe of one slot to another. When the target already holds
    /// a recipe the two slots swap.
    pub fn move_slot(
        &self,
        from: (&str, MealType),
        to: (&str, MealType),
    ) -> Result<Self> {
        let source = self.position(from.0, from.1)?;
        let target = self.position(to.0, to.1)?;

        let mut plan = self.clone();
        if source != target {
            let recipe = plan.slots[source].recipe.take();
            plan.slots[source].recipe = plan.slots[target].recipe.take();
            plan.slots[target].recipe = recipe;
        }

        Ok(plan)
    }

    fn position(&self, date: &str, meal_type: MealType) -> Result<usize> {
        match day_index_for_date(self.anchor, date, self.range) {
            Some(index) => Ok(index * MEALS_PER_DAY + meal_type.position()),
            None => Err(Error::SlotNotFound {
                date: date.to_owned(),
                meal_type,
            }),
        }
    }
}
