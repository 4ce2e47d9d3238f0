//! Match officiating timer for soccer referees.
//!
//! A regulation match clock with per-half stoppage accounting, a
//! confirmation gate in front of every mutating action, score tracking,
//! append-only event logs, a persisted session mirror behind an HTTP
//! API, and post-match CSV reports.
//!
//! The clock engine ([`clock::ClockEngine`]) is a pure state machine
//! driven by a one-second tick source ([`clock::TickSource`]); the
//! [`controller::MatchController`] wires it to the confirmation gate,
//! the score tracker, and the session mirror.

pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod error;
pub mod observability;
pub mod prematch;
pub mod report;
pub mod score;
pub mod session;
