use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_PASSING_RATIO: f64 = 0.7;
pub const DEFAULT_SOURCE_URL: &str = "https://opentdb.com/api.php";

pub const ENV_BATCH_SIZE: &str = "QUIZ_BATCH_SIZE";
pub const ENV_PASSING_RATIO: &str = "QUIZ_PASSING_RATIO";
pub const ENV_SOURCE_URL: &str = "QUIZ_SOURCE_URL";

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("passing ratio must be within 0.0..=1.0, got {0}")]
    PassingRatioOutOfRange(f64),

    #[error("question source url cannot be empty")]
    EmptySourceUrl,

    #[error("invalid value for {key}: {raw:?}")]
    InvalidValue { key: &'static str, raw: String },
}

/// Tunables for one quiz run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    batch_size: usize,
    passing_ratio: f64,
    source_url: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            passing_ratio: DEFAULT_PASSING_RATIO,
            source_url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

impl QuizConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range.
    pub fn new(
        batch_size: usize,
        passing_ratio: f64,
        source_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            batch_size,
            passing_ratio,
            source_url: source_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `QUIZ_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unparsable or out-of-range values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unparsable or out-of-range values.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(raw) = get(ENV_BATCH_SIZE) {
            config.batch_size = parse_batch_size(ENV_BATCH_SIZE, &raw)?;
        }
        if let Some(raw) = get(ENV_PASSING_RATIO) {
            config.passing_ratio = parse_passing_ratio(ENV_PASSING_RATIO, &raw)?;
        }
        if let Some(raw) = get(ENV_SOURCE_URL) {
            config.source_url = raw.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ZeroBatchSize` for `0`.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self, ConfigError> {
        self.batch_size = batch_size;
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::PassingRatioOutOfRange` outside `0.0..=1.0`.
    pub fn with_passing_ratio(mut self, passing_ratio: f64) -> Result<Self, ConfigError> {
        self.passing_ratio = passing_ratio;
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::EmptySourceUrl` for a blank url.
    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.source_url = source_url.into();
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[must_use]
    pub fn passing_ratio(&self) -> f64 {
        self.passing_ratio
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if !(0.0..=1.0).contains(&self.passing_ratio) {
            return Err(ConfigError::PassingRatioOutOfRange(self.passing_ratio));
        }
        if self.source_url.trim().is_empty() {
            return Err(ConfigError::EmptySourceUrl);
        }
        Ok(())
    }
}

/// # Errors
///
/// Returns `ConfigError::InvalidValue` when `raw` is not an unsigned integer.
pub fn parse_batch_size(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        raw: raw.to_string(),
    })
}

/// # Errors
///
/// Returns `ConfigError::InvalidValue` when `raw` is not a finite number.
pub fn parse_passing_ratio(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ConfigError::InvalidValue {
            key,
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_classic_quiz() {
        let config = QuizConfig::default();
        assert_eq!(config.batch_size(), 5);
        assert!((config.passing_ratio() - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.source_url(), DEFAULT_SOURCE_URL);
    }

    #[test]
    fn env_overrides_defaults() {
        let config = QuizConfig::from_vars(vars(&[
            (ENV_BATCH_SIZE, "10"),
            (ENV_PASSING_RATIO, "0.5"),
            (ENV_SOURCE_URL, " http://localhost:9000/api.php "),
        ]))
        .unwrap();

        assert_eq!(config.batch_size(), 10);
        assert!((config.passing_ratio() - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.source_url(), "http://localhost:9000/api.php");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = QuizConfig::from_vars(vars(&[(ENV_BATCH_SIZE, "  ")])).unwrap();
        assert_eq!(config, QuizConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            QuizConfig::from_vars(vars(&[(ENV_BATCH_SIZE, "five")])).unwrap_err(),
            ConfigError::InvalidValue {
                key: ENV_BATCH_SIZE,
                raw: "five".into()
            }
        );
        assert_eq!(
            QuizConfig::from_vars(vars(&[(ENV_BATCH_SIZE, "0")])).unwrap_err(),
            ConfigError::ZeroBatchSize
        );
        assert_eq!(
            QuizConfig::default().with_passing_ratio(1.5).unwrap_err(),
            ConfigError::PassingRatioOutOfRange(1.5)
        );
        assert!(matches!(
            QuizConfig::from_vars(vars(&[(ENV_PASSING_RATIO, "NaN")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            QuizConfig::new(5, 0.7, "").unwrap_err(),
            ConfigError::EmptySourceUrl
        );
    }
}
