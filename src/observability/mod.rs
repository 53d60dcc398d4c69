//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Monotonic counters
//! - Typed lifecycle events
//!
//! Observability is read-only: nothing here affects the outcome of an
//! operation, and a failed log write is ignored.
//!
//! # Usage
//!
//! ```ignore
//! use profrate::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::ReviewAdded, &[("review_id", "...")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_reviews_added();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    if event.is_fatal() {
        Logger::fatal(event.as_str(), fields);
    } else {
        Logger::info(event.as_str(), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::BootStart);
        log_event(Event::Serving);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("port", "54321")]);
    }
}
