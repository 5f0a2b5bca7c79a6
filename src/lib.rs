pub mod config;
pub mod observability;
pub mod snapshot;

pub use config::Config;
