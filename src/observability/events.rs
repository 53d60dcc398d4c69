//! Observable events
//!
//! Every log line names one of these. Events are explicit and typed.

use std::fmt;

/// Observable events in profrate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Listening for requests
    Serving,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,
    /// Startup failed
    BootFailed,

    // Reviews
    /// Review written to both the user and the professor
    ReviewAdded,
    /// Review removed from the professor
    ReviewRemoved,
    /// Review input rejected before any store access
    ReviewRejected,
    /// Review written to the user but not to the professor
    ReviewDualWriteIncomplete,
    /// Cached aggregate rating rewritten
    AggregateRecomputed,

    // Professors
    ProfessorCreated,
    ProfessorUpdated,
    ProfessorRemoved,

    // Users
    UserRegistered,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "PROFRATE_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "PROFRATE_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "PROFRATE_STARTUP_FAILED",

            Event::ReviewAdded => "REVIEW_ADDED",
            Event::ReviewRemoved => "REVIEW_REMOVED",
            Event::ReviewRejected => "REVIEW_REJECTED",
            Event::ReviewDualWriteIncomplete => "REVIEW_DUAL_WRITE_INCOMPLETE",
            Event::AggregateRecomputed => "AGGREGATE_RECOMPUTED",

            Event::ProfessorCreated => "PROFESSOR_CREATED",
            Event::ProfessorUpdated => "PROFESSOR_UPDATED",
            Event::ProfessorRemoved => "PROFESSOR_REMOVED",

            Event::UserRegistered => "USER_REGISTERED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
