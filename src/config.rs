use std::env;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use pantryplan_mealplan::{PlanRange, is_known_timezone};
use pantryplan_shopping::CAN_COOK_THRESHOLD;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    #[serde(default)]
    pub range: PlanRange,
    /// IANA timezone used to decide what "today" and "this week" are
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            range: PlanRange::default(),
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestionsConfig {
    /// Minimum availability percentage for "can cook now"
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            limit: default_limit(),
        }
    }
}

fn default_threshold() -> u8 {
    CAN_COOK_THRESHOLD
}

fn default_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PANTRYPLAN__PLANNER__RANGE, etc.)
    /// 2. Config file: `config_path`, then CONFIG_PATH, then config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("planner.range", PlanRange::default().to_string())?
            .set_default("planner.timezone", default_timezone())?
            .set_default("suggestions.threshold", i64::from(default_threshold()))?
            .set_default("suggestions.limit", default_limit() as i64)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Missing file is fine, defaults and environment still apply
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PANTRYPLAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(format!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                self.logging.format
            ));
        }
        if !is_known_timezone(&self.planner.timezone) {
            return Err(format!("Unknown timezone '{}'", self.planner.timezone));
        }
        if self.suggestions.threshold > 100 {
            return Err("Suggestion threshold must be a percentage between 0 and 100".to_string());
        }
        if self.suggestions.limit == 0 {
            return Err("Suggestion limit must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.planner.range, PlanRange::Week);
        assert_eq!(config.planner.timezone, "UTC");
        assert_eq!(config.suggestions.threshold, 80);
        assert_eq!(config.suggestions.limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_unknown_format() {
        let config = Config {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "xml".to_string(),
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_timezone() {
        let config = Config {
            planner: PlannerConfig {
                range: PlanRange::Week,
                timezone: "Atlantis/Capital".to_string(),
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_threshold_over_100() {
        let config = Config {
            suggestions: SuggestionsConfig {
                threshold: 120,
                limit: 10,
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_limit() {
        let config = Config {
            suggestions: SuggestionsConfig {
                threshold: 80,
                limit: 0,
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }
}
