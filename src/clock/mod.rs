//! Match clock: state machine, state types, and the periodic tick source.

pub mod engine;
pub mod runner;
pub mod state;

pub use engine::ClockEngine;
pub use runner::TickSource;
pub use state::{
    ClockSnapshot, MatchPhase, StoppageRecord, TimerEvent, TimerEventType, TimerState,
    format_match_duration, format_match_time,
};
