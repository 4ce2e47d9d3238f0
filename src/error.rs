//! Error types for `refwatch`.
//!
//! Domain errors are split by concern (settings, pre-match validation,
//! session store, clock actions, report rendering) and aggregated into a
//! single top-level error that maps onto CLI exit codes.

use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `refwatch` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Settings or pre-match validation error
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied, bind failure)
    pub const IO_ERROR: i32 = 3;

    /// Session store error (unknown session identifier)
    pub const STORE_ERROR: i32 = 4;

    /// Clock engine error (invalid transition, rejected action)
    pub const CLOCK_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `refwatch` operations.
///
/// Aggregates all domain-specific errors and provides a unified
/// interface for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum RefwatchError {
    /// Settings loading or pre-match validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Session store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Clock engine or confirmation gate error
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Report rendering error
    #[error(transparent)]
    Report(#[from] ReportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RefwatchError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Store(_) => ExitCode::STORE_ERROR,
            Self::Action(_) => ExitCode::CLOCK_ERROR,
            Self::Report(_) => ExitCode::ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration / Validation Errors
// ============================================================================

/// Settings loading and pre-match validation errors.
///
/// Validation failures carry the full list of issues found so callers
/// can surface every problem at once rather than one per submission.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("settings file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: std::path::PathBuf,
    },

    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the settings file
        path: std::path::PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Settings or pre-match validation failed
    #[error("validation failed: {}", format_issues(.issues))]
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
    },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation issue found while checking settings or
/// pre-match input.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g. `"home_team"`)
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Validation failure that blocks progression
    Error,
    /// Potential issue that does not block progression
    Warning,
}

// ============================================================================
// Session Store Errors
// ============================================================================

/// Session store errors.
///
/// An unknown identifier is an explicit negative result, never a
/// silent no-op.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No session exists with the given identifier
    #[error("match session not found: {0}")]
    NotFound(Uuid),
}

// ============================================================================
// Clock / Action Errors
// ============================================================================

/// Clock engine and confirmation gate errors.
///
/// Invalid requests are rejected without touching existing state; the
/// engine never partially applies a transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// An action was requested in a phase/state where it has no
    /// defined effect (e.g. pausing while idle)
    #[error("invalid transition: cannot {action} during {phase}/{state}")]
    InvalidTransition {
        /// Human-readable action name
        action: String,
        /// Match phase at the time of the request
        phase: String,
        /// Timer state at the time of the request
        state: String,
    },

    /// A score decrement was requested at zero
    #[error("cannot decrease {team} score below zero")]
    ScoreAtZero {
        /// Team whose score is at the boundary
        team: String,
    },

    /// Confirm or cancel was called with no action pending
    #[error("no action pending confirmation")]
    NoPendingAction,
}

// ============================================================================
// Report Errors
// ============================================================================

/// Match report rendering errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The session has not reached the complete phase
    #[error("match is not complete: current phase is {phase}")]
    MatchNotComplete {
        /// Current phase of the session
        phase: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `refwatch` operations.
pub type Result<T> = std::result::Result<T, RefwatchError>;

// ============================================================================
// Tests
// ============================================================================
