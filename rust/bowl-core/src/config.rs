//! Calculator configuration.
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! gives the stock behavior.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::scoring::{Score, MAX_SCORE};

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How many balls the 10th-frame bonus prompt collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusPolicy {
    /// Always two balls after a 10th-frame strike or spare.
    #[default]
    Legacy,
    /// Two balls after a strike, one after a spare.
    Rules,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub bonus_policy: BonusPolicy,

    /// End-of-game report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Score the player is compared against ("national average").
    #[serde(default = "default_reference_average")]
    pub reference_average: Score,
    /// Handicap is `handicap_base - score` (may go negative).
    #[serde(default = "default_handicap_base")]
    pub handicap_base: Score,
    #[serde(default)]
    pub advice: AdviceThresholds,
}

fn default_reference_average() -> Score {
    150
}

fn default_handicap_base() -> Score {
    200
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reference_average: default_reference_average(),
            handicap_base: default_handicap_base(),
            advice: AdviceThresholds::default(),
        }
    }
}

/// Scores below `low` get aim advice, below `high` strike/spare advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdviceThresholds {
    #[serde(default = "default_advice_low")]
    pub low: Score,
    #[serde(default = "default_advice_high")]
    pub high: Score,
}

fn default_advice_low() -> Score {
    100
}

fn default_advice_high() -> Score {
    200
}

impl Default for AdviceThresholds {
    fn default() -> Self {
        Self {
            low: default_advice_low(),
            high: default_advice_high(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document for a struct; treat it as defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        validate_config(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

pub fn validate_config(cfg: &Config) -> Result<(), String> {
    let r = &cfg.report;
    if r.reference_average > MAX_SCORE {
        return Err(format!("report.reference_average must be <= {MAX_SCORE}"));
    }
    if r.handicap_base > MAX_SCORE {
        return Err(format!("report.handicap_base must be <= {MAX_SCORE}"));
    }
    if r.advice.low > r.advice.high {
        return Err("report.advice.low must be <= report.advice.high".to_string());
    }
    if r.advice.high > MAX_SCORE {
        return Err(format!("report.advice.high must be <= {MAX_SCORE}"));
    }
    Ok(())
}
