// RuleChef Configuration
//
// Thresholds for the learning coordinator, evaluation settings and
// learning-cycle limits. Every section falls back to its defaults when it is
// missing from the TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::evaluation::{DEFAULT_IOU_THRESHOLD, DEFAULT_REPORT_SAMPLES};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleChefConfig {
    #[serde(default)]
    pub coordinator: CoordinatorConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub cycle: CycleConfig,
}

/// Which coordinator implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorKind {
    /// Deterministic thresholds (fast, free, predictable)
    #[default]
    Heuristic,

    /// LLM-driven decisions; not available yet
    Agentic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub kind: CoordinatorKind,

    /// New examples needed to trigger learning
    pub trigger_threshold: usize,

    /// New corrections needed to trigger early refinement
    pub correction_threshold: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            kind: CoordinatorKind::Heuristic,
            trigger_threshold: 50,
            correction_threshold: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Only identical text and offsets count as a match
    pub exact_match_only: bool,

    /// Minimum IoU for a partial match
    pub iou_threshold: f64,

    /// Boundary errors listed in reports
    pub report_samples: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            exact_match_only: false,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            report_samples: DEFAULT_REPORT_SAMPLES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Upper bound on one rule-synthesis call (in seconds)
    #[serde(with = "serde_duration")]
    pub synthesis_timeout: Duration,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            synthesis_timeout: Duration::from_secs(600), // 10 minutes
        }
    }
}

// Custom serde module for Duration (serialize/deserialize as seconds)
mod serde_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl RuleChefConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: RuleChefConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.coordinator.validate()?;

        let iou = self.evaluation.iou_threshold;
        if !(iou > 0.0 && iou <= 1.0) {
            return Err(ConfigError::ValidationError(
                "evaluation: iou_threshold must be in (0, 1]".to_string(),
            ));
        }

        let timeout = self.cycle.synthesis_timeout;
        if timeout < Duration::from_secs(1) || timeout > Duration::from_secs(3600) {
            return Err(ConfigError::ValidationError(
                "cycle: synthesis_timeout must be between 1 second and 1 hour".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

impl CoordinatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "coordinator: trigger_threshold must be at least 1".to_string(),
            ));
        }

        if self.correction_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "coordinator: correction_threshold must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
