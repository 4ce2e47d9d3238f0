//! Match settings.
//!
//! Loading pipeline: read file → YAML parse → validate → frozen value.
//! Defaults model a regulation match (45-minute halves, 3-count kickoff
//! countdown, one-second ticks); tests and training matches can shorten
//! everything via a settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Severity, ValidationIssue};

/// Tunable clock parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchSettings {
    /// Regulation length of one half, in seconds.
    pub half_duration_secs: u32,
    /// Length of the pre-kickoff countdown, in ticks.
    pub countdown_seconds: u32,
    /// Interval between logical clock ticks, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            half_duration_secs: 2700,
            countdown_seconds: 3,
            tick_interval_ms: 1000,
        }
    }
}

impl MatchSettings {
    /// Regulation length of the full match, in seconds.
    #[must_use]
    pub const fn full_duration_secs(&self) -> u32 {
        self.half_duration_secs * 2
    }

    /// Loads settings from a YAML file and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file cannot be read,
    /// [`ConfigError::ParseError`] on malformed YAML, and
    /// [`ConfigError::ValidationError`] on out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let settings: Self = serde_yaml::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validates field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] listing every issue found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        if self.half_duration_secs == 0 {
            issues.push(issue("half_duration_secs", "must be greater than zero"));
        }
        if self.countdown_seconds == 0 {
            issues.push(issue("countdown_seconds", "must be greater than zero"));
        }
        if self.tick_interval_ms == 0 {
            issues.push(issue("tick_interval_ms", "must be greater than zero"));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError { issues })
        }
    }
}

fn issue(path: &str, message: &str) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        message: message.to_string(),
        severity: Severity::Error,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_are_regulation() {
        let settings = MatchSettings::default();
        assert_eq!(settings.half_duration_secs, 2700);
        assert_eq!(settings.full_duration_secs(), 5400);
        assert_eq!(settings.countdown_seconds, 3);
        assert_eq!(settings.tick_interval_ms, 1000);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(MatchSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_half_duration_rejected() {
        let settings = MatchSettings {
            half_duration_secs: 0,
            ..MatchSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("half_duration_secs"));
    }

    #[test]
    fn test_load_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "half_duration_secs: 60\ncountdown_seconds: 1").unwrap();

        let settings = MatchSettings::load(file.path()).unwrap();
        assert_eq!(settings.half_duration_secs, 60);
        assert_eq!(settings.countdown_seconds, 1);
        // Unspecified fields fall back to defaults
        assert_eq!(settings.tick_interval_ms, 1000);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MatchSettings::load(Path::new("/nonexistent/settings.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "half_duration_secs: 60\nextra_time: 300").unwrap();

        let err = MatchSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
