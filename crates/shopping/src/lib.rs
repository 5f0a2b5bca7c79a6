mod aggregation;
mod categorization;
mod consolidation;
mod format;
mod matching;
mod scoring;

pub use aggregation::*;
pub use categorization::*;
pub use consolidation::*;
pub use format::*;
pub use matching::*;
pub use scoring::*;
