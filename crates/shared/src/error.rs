use crate::mealplan::MealType;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("no slot for {meal_type} on {date}")]
    SlotNotFound { date: String, meal_type: MealType },

    #[error("plan generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
