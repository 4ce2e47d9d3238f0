//! Shared integration-test fixtures.

#![allow(dead_code)]

use refwatch::config::MatchSettings;
use refwatch::prematch::PreMatchData;

/// Settings with 10-second halves so a full match fits in a test.
pub fn short_settings() -> MatchSettings {
    MatchSettings {
        half_duration_secs: 10,
        countdown_seconds: 3,
        tick_interval_ms: 1000,
    }
}

/// A complete, valid pre-match record.
pub fn sample_pre_match() -> PreMatchData {
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
