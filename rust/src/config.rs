//! Configuration types for the analysis engine.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::logging::VERBOSITY_SILENT;
use crate::models::TimeUnit;

/// Errors raised while building a configuration from loose values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown pass strategy: {0}")]
    UnknownStrategy(String),
    #[error("Unknown time unit: {0}")]
    UnknownTimeUnit(String),
    #[error("Critical epsilon must be a positive finite number, got {0}")]
    InvalidEpsilon(f64),
}

/// How the forward and backward passes visit tasks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PassStrategy {
    /// Single sweep in topological order (backward pass in reverse).
    #[default]
    Topological,
    /// Bounded work-list relaxation; only tasks whose inputs changed are revisited.
    Relaxation,
}

impl FromStr for PassStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topological" => Ok(PassStrategy::Topological),
            "relaxation" => Ok(PassStrategy::Relaxation),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for PassStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassStrategy::Topological => write!(f, "topological"),
            PassStrategy::Relaxation => write!(f, "relaxation"),
        }
    }
}

/// Tolerance under which a total slack counts as zero.
pub const DEFAULT_CRITICAL_EPSILON: f64 = 1e-5;

/// Configuration for a single `analyze` call.
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// Pass implementation for forward and backward propagation.
    pub strategy: PassStrategy,
    /// `|total_slack| < critical_epsilon` marks a task critical.
    pub critical_epsilon: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
    /// Label echoed on the result; never affects computed values.
    pub time_unit: TimeUnit,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: PassStrategy::default(),
            critical_epsilon: DEFAULT_CRITICAL_EPSILON,
            verbosity: VERBOSITY_SILENT,
            time_unit: TimeUnit::default(),
        }
    }
}

impl AnalysisConfig {
    /// Build a config from string options, falling back to defaults for `None`.
    pub fn from_options(
        strategy: Option<&str>,
        critical_epsilon: Option<f64>,
        verbosity: Option<u8>,
        time_unit: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            strategy: strategy
                .map(str::parse::<PassStrategy>)
                .transpose()?
                .unwrap_or(defaults.strategy),
            critical_epsilon: critical_epsilon.unwrap_or(defaults.critical_epsilon),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            time_unit: time_unit
                .map(str::parse::<TimeUnit>)
                .transpose()?
                .unwrap_or(defaults.time_unit),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings under which no task could ever be critical.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let epsilon = self.critical_epsilon;
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        Ok(())
    }
}
