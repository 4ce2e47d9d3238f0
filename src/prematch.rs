//! Pre-match information.
//!
//! The record a referee fills in before kickoff. Validated once on
//! submission; immutable after the match starts.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Severity, ValidationIssue};

/// Pre-match metadata: officials, fixture details, and team names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreMatchData {
    /// Referee name.
    pub referee_name: String,
    /// First assistant referee.
    pub assistant_referee_1: String,
    /// Second assistant referee.
    pub assistant_referee_2: String,
    /// Fourth official, when appointed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fourth_official: Option<String>,

    /// Match date (ISO `YYYY-MM-DD`).
    pub match_date: String,
    /// Scheduled kickoff time.
    pub kickoff_time: String,
    /// Venue name.
    pub venue: String,
    /// Competition name.
    pub competition: String,
    /// Competition-assigned match number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_number: Option<String>,

    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,

    /// Free-form notes recorded before kickoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_match_notes: Option<String>,
}

impl PreMatchData {
    /// Validates the record, collecting every issue found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] listing all problems;
    /// the clock must never start on invalid pre-match data.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        require(&mut issues, "referee_name", &self.referee_name, 50);
        require(
            &mut issues,
            "assistant_referee_1",
            &self.assistant_referee_1,
            50,
        );
        require(
            &mut issues,
            "assistant_referee_2",
            &self.assistant_referee_2,
            50,
        );
        optional(&mut issues, "fourth_official", self.fourth_official.as_deref(), 50);

        require(&mut issues, "match_date", &self.match_date, 50);
        require(&mut issues, "kickoff_time", &self.kickoff_time, 50);
        require(&mut issues, "venue", &self.venue, 100);
        require(&mut issues, "competition", &self.competition, 100);
        optional(&mut issues, "match_number", self.match_number.as_deref(), 50);

        require(&mut issues, "home_team", &self.home_team, 50);
        require(&mut issues, "away_team", &self.away_team, 50);
        optional(
            &mut issues,
            "pre_match_notes",
            self.pre_match_notes.as_deref(),
            500,
        );

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError { issues })
        }
    }
}

fn require(issues: &mut Vec<ValidationIssue>, path: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        issues.push(issue(path, format!("{} is required", path.replace('_', " "))));
    } else if value.chars().count() > max_len {
        issues.push(issue(path, format!("must be at most {max_len} characters")));
    }
}

fn optional(issues: &mut Vec<ValidationIssue>, path: &str, value: Option<&str>, max_len: usize) {
    if let Some(value) = value {
        if value.chars().count() > max_len {
            issues.push(issue(path, format!("must be at most {max_len} characters")));
        }
    }
}

fn issue(path: &str, message: String) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        message,
        severity: Severity::Error,
    }
}

#[cfg(test)]
pub(crate) fn sample() -> PreMatchData {
    PreMatchData {
        referee_name: "A. Taylor".to_string(),
        assistant_referee_1: "G. Beswick".to_string(),
        assistant_referee_2: "A. Nunn".to_string(),
        fourth_official: Some("S. Attwell".to_string()),
        match_date: "2025-05-17".to_string(),
        kickoff_time: "15:00".to_string(),
        venue: "City Ground".to_string(),
        competition: "County Cup".to_string(),
        match_number: Some("CC-114".to_string()),
        home_team: "Riverside FC".to_string(),
        away_team: "Harbour Town".to_string(),
        pre_match_notes: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields_collected() {
        let record = PreMatchData {
            referee_name: String::new(),
            venue: "  ".to_string(),
            ..sample()
        };
        let err = record.validate().unwrap_err();
        let ConfigError::ValidationError { issues } = err else {
            panic!("expected validation error");
        };
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["referee_name", "venue"]);
    }

    #[test]
    fn test_over_long_field_rejected() {
        let record = PreMatchData {
            home_team: "x".repeat(51),
            ..sample()
        };
        let err = record.validate().unwrap_err();
        assert!(err.to_string().contains("at most 50 characters"));
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let record = PreMatchData {
            fourth_official: None,
            match_number: None,
            pre_match_notes: None,
            ..sample()
        };
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_over_long_notes_rejected() {
        let record = PreMatchData {
            pre_match_notes: Some("n".repeat(501)),
            ..sample()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip_omits_empty_optionals() {
        let record = PreMatchData {
            fourth_official: None,
            ..sample()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("fourth_official").is_none());

        let back: PreMatchData = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
