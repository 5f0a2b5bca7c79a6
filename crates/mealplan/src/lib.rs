mod calendar;
mod generate;
mod week;

pub use calendar::*;
pub use generate::*;
pub use week::*;
