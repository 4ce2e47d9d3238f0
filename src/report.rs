//! Match report rendering.
//!
//! Turns a completed session into two CSV documents: a summary report
//! (match information, final score, officials, timeline, stoppage
//! summary, notes) and a detailed chronological event log. File names
//! are deterministic, derived from the teams and the match date.

use chrono::{DateTime, Utc};

use crate::clock::{TimerEventType, format_match_duration, format_match_time};
use crate::config::MatchSettings;
use crate::error::ReportError;
use crate::session::MatchSession;

/// Report generator over one completed match session.
#[derive(Debug)]
pub struct MatchReport<'a> {
    session: &'a MatchSession,
    settings: &'a MatchSettings,
}

impl<'a> MatchReport<'a> {
    /// Binds a report to a session.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MatchNotComplete`] unless the session has
    /// reached full time.
    pub fn new(
        session: &'a MatchSession,
        settings: &'a MatchSettings,
    ) -> Result<Self, ReportError> {
        if session.current_phase.is_complete() {
            Ok(Self { session, settings })
        } else {
            Err(ReportError::MatchNotComplete {
                phase: session.current_phase.to_string(),
            })
        }
    }

    /// Renders the summary report CSV.
    #[must_use]
    pub fn summary_csv(&self, generated_at: DateTime<Utc>) -> String {
        let pre = &self.session.pre_match;
        let half = format_match_time(self.settings.half_duration_secs);
        let first_stoppage = self.session.stoppage.first_half_seconds;
        let second_stoppage = self.session.stoppage.second_half_seconds;
        let total = self.session.elapsed_seconds + first_stoppage + second_stoppage;

        let lines = [
            "MATCH REPORT".to_string(),
            row("Report Generated", &generated_at.to_rfc3339()),
            String::new(),
            "MATCH INFORMATION".to_string(),
            row("Match Date", &pre.match_date),
            row("Kickoff Time", &pre.kickoff_time),
            row("Venue", &pre.venue),
            row("Competition", &pre.competition),
            row("Match Number", pre.match_number.as_deref().unwrap_or("N/A")),
            String::new(),
            "TEAMS".to_string(),
            row("Home Team", &pre.home_team),
            row("Away Team", &pre.away_team),
            row(
                "Final Score",
                &format!("{}-{}", self.session.home_score, self.session.away_score),
            ),
            String::new(),
            "MATCH OFFICIALS".to_string(),
            row("Referee", &pre.referee_name),
            row("Assistant Referee 1", &pre.assistant_referee_1),
            row("Assistant Referee 2", &pre.assistant_referee_2),
            row(
                "Fourth Official",
                pre.fourth_official.as_deref().unwrap_or("N/A"),
            ),
            String::new(),
            "MATCH TIMELINE".to_string(),
            row("Scheduled Kickoff Time", &pre.kickoff_time),
            row(
                "First Half Duration",
                &format!("{half} + {} stoppage", format_match_time(first_stoppage)),
            ),
            row(
                "Second Half Duration",
                &format!("{half} + {} stoppage", format_match_time(second_stoppage)),
            ),
            row("Total Match Duration", &format_match_duration(total)),
            String::new(),
            "STOPPAGE TIME SUMMARY".to_string(),
            row("First Half Stoppage", &format_match_time(first_stoppage)),
            row("Second Half Stoppage", &format_match_time(second_stoppage)),
            row(
                "Total Stoppage",
                &format_match_time(first_stoppage + second_stoppage),
            ),
            String::new(),
            "ADDITIONAL NOTES".to_string(),
            row(
                "Pre-Match Notes",
                pre.pre_match_notes.as_deref().unwrap_or("None"),
            ),
            row(
                "Post-Match Notes",
                self.session.post_match_notes.as_deref().unwrap_or("None"),
            ),
        ];
        lines.join("\n")
    }

    /// Renders the detailed event log CSV: timer and score events merged
    /// chronologically.
    #[must_use]
    pub fn event_log_csv(&self) -> String {
        let pre = &self.session.pre_match;
        let mut lines = vec![
            "DETAILED MATCH EVENT LOG".to_string(),
            row("Match", &format!("{} vs {}", pre.home_team, pre.away_team)),
            row("Date", &pre.match_date),
            String::new(),
            "Event,Match Time,Timestamp,Duration,Notes".to_string(),
        ];

        for entry in self.chronological_entries() {
            lines.push(entry);
        }
        lines.join("\n")
    }

    /// Summary report file name, `Match_Report_<Home>_vs_<Away>_<date>.csv`.
    #[must_use]
    pub fn summary_filename(&self) -> String {
        self.filename("Match_Report")
    }

    /// Event log file name, `Match_Log_<Home>_vs_<Away>_<date>.csv`.
    #[must_use]
    pub fn event_log_filename(&self) -> String {
        self.filename("Match_Log")
    }

    fn filename(&self, prefix: &str) -> String {
        let pre = &self.session.pre_match;
        format!(
            "{prefix}_{}_vs_{}_{}.csv",
            slug(&pre.home_team),
            slug(&pre.away_team),
            pre.match_date.replace('-', ""),
        )
    }

    fn chronological_entries(&self) -> Vec<String> {
        // (timestamp, rendered row); merged and sorted once
        let mut entries: Vec<(DateTime<Utc>, String)> = Vec::new();

        for event in &self.session.timer_events {
            let match_time = match event.event_type {
                TimerEventType::StoppageTimeEnd => {
                    format!("+{}", format_match_time(event.match_time_seconds))
                }
                _ => format_match_time(event.match_time_seconds),
            };
            let duration = event
                .duration_seconds
                .map_or_else(|| "--".to_string(), format_match_time);
            let notes = event.notes.as_deref().unwrap_or("--");
            entries.push((
                event.timestamp,
                format!(
                    "{},{},{},{},{}",
                    field(event.event_type.label()),
                    field(&match_time),
                    field(&event.timestamp.to_rfc3339()),
                    field(&duration),
                    field(notes),
                ),
            ));
        }

        for event in &self.session.score_events {
            let team = match event.team {
                crate::score::Team::Home => &self.session.pre_match.home_team,
                crate::score::Team::Away => &self.session.pre_match.away_team,
            };
            entries.push((
                event.timestamp,
                format!(
                    "{},{},{},--,{}",
                    field("Score Change"),
                    field(&format_match_time(event.match_time_seconds)),
                    field(&event.timestamp.to_rfc3339()),
                    field(&format!(
                        "{} ({}-{})",
                        team, event.home_score, event.away_score
                    )),
                ),
            ));
        }

        entries.sort_by_key(|(timestamp, _)| *timestamp);
        entries.into_iter().map(|(_, line)| line).collect()
    }
}

/// One `label,value` CSV row with the value escaped.
fn row(label: &str, value: &str) -> String {
    format!("{label},{}", field(value))
}

/// Escapes a CSV field: quoted when it carries a comma, quote, or
/// newline, with embedded quotes doubled.
fn field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Whitespace runs collapse to a single underscore.
fn slug(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{MatchPhase, StoppageRecord, TimerEvent, TimerState};
    use crate::prematch;
    use crate::score::{ScoreEvent, Team};
    use uuid::Uuid;

    fn completed_session() -> MatchSession {
        let mut session = MatchSession::new(prematch::sample(), Utc::now());
        session.current_phase = MatchPhase::Complete;
        session.timer_state = TimerState::Complete;
        session.elapsed_seconds = 5400;
        session.stoppage = StoppageRecord {
            first_half_seconds: 60,
            second_half_seconds: 154,
        };
        session.home_score = 2;
        session.away_score = 1;
        session.timer_events = vec![
            TimerEvent::new(TimerEventType::MatchStart, 0, Utc::now()),
            TimerEvent::new(TimerEventType::FirstHalfEnd, 2700, Utc::now()),
            TimerEvent::new(TimerEventType::MatchComplete, 5400, Utc::now()),
        ];
        session
    }

    #[test]
    fn test_incomplete_match_rejected() {
        let mut session = completed_session();
        session.current_phase = MatchPhase::SecondHalf;
        let err = MatchReport::new(&session, &MatchSettings::default()).unwrap_err();
        assert!(matches!(err, ReportError::MatchNotComplete { .. }));
    }

    #[test]
    fn test_summary_sections_present() {
        let session = completed_session();
        let settings = MatchSettings::default();
        let report = MatchReport::new(&session, &settings).unwrap();
        let csv = report.summary_csv(Utc::now());

        for section in [
            "MATCH REPORT",
            "MATCH INFORMATION",
            "TEAMS",
            "MATCH OFFICIALS",
            "MATCH TIMELINE",
            "STOPPAGE TIME SUMMARY",
            "ADDITIONAL NOTES",
        ] {
            assert!(csv.contains(section), "missing section {section}");
        }
        assert!(csv.contains("Final Score,2-1"));
        assert!(csv.contains("First Half Duration,45:00 + 01:00 stoppage"));
        assert!(csv.contains("Second Half Duration,45:00 + 02:34 stoppage"));
        // 5400 + 60 + 154 = 5614s = 01:33:34
        assert!(csv.contains("Total Match Duration,01:33:34"));
        assert!(csv.contains("Total Stoppage,03:34"));
        assert!(csv.contains("Post-Match Notes,None"));
    }

    #[test]
    fn test_summary_defaults_for_absent_optionals() {
        let mut session = completed_session();
        session.pre_match.fourth_official = None;
        session.pre_match.match_number = None;
        let settings = MatchSettings::default();
        let report = MatchReport::new(&session, &settings).unwrap();
        let csv = report.summary_csv(Utc::now());

        assert!(csv.contains("Fourth Official,N/A"));
        assert!(csv.contains("Match Number,N/A"));
    }

    #[test]
    fn test_event_log_chronological_merge() {
        let mut session = completed_session();
        let base = Utc::now();
        session.timer_events = vec![
            TimerEvent::new(TimerEventType::MatchStart, 0, base),
            TimerEvent::new(
                TimerEventType::FirstHalfEnd,
                2700,
                base + chrono::Duration::seconds(2700),
            ),
        ];
        session.score_events = vec![ScoreEvent {
            id: Uuid::new_v4(),
            team: Team::Home,
            match_time_seconds: 754,
            timestamp: base + chrono::Duration::seconds(754),
            home_score: 1,
            away_score: 0,
        }];

        let settings = MatchSettings::default();
        let report = MatchReport::new(&session, &settings).unwrap();
        let csv = report.event_log_csv();

        let start = csv.find("Match Start").unwrap();
        let score = csv.find("Score Change").unwrap();
        let half_end = csv.find("First Half End").unwrap();
        assert!(start < score && score < half_end);
        assert!(csv.contains("Score Change,12:34"));
        assert!(csv.contains("Riverside FC (1-0)"));
    }

    #[test]
    fn test_stoppage_end_rendered_with_plus_prefix() {
        let mut session = completed_session();
        session.timer_events = vec![
            TimerEvent::new(TimerEventType::StoppageTimeEnd, 2760, Utc::now()).with_duration(60),
        ];
        let settings = MatchSettings::default();
        let report = MatchReport::new(&session, &settings).unwrap();
        let csv = report.event_log_csv();
        assert!(csv.contains("Stoppage Time End,+46:00"));
    }

    #[test]
    fn test_filenames_deterministic() {
        let session = completed_session();
        let settings = MatchSettings::default();
        let report = MatchReport::new(&session, &settings).unwrap();

        assert_eq!(
            report.summary_filename(),
            "Match_Report_Riverside_FC_vs_Harbour_Town_20250517.csv"
        );
        assert_eq!(
            report.event_log_filename(),
            "Match_Log_Riverside_FC_vs_Harbour_Town_20250517.csv"
        );
    }

    #[test]
    fn test_comma_fields_escaped() {
        let mut session = completed_session();
        session.pre_match.venue = "City Ground, North Stand".to_string();
        let settings = MatchSettings::default();
        let report = MatchReport::new(&session, &settings).unwrap();
        let csv = report.summary_csv(Utc::now());
        assert!(csv.contains("Venue,\"City Ground, North Stand\""));
    }
}
