//! Structural classification of inbound notifications.
//!
//! Radarr and Sonarr post to the same kind of endpoint without saying who they
//! are. Each known envelope shape is tried in order and the first one that
//! deserializes wins.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::{MovieWebhook, SeriesWebhook};

/// A classified notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Movie(MovieWebhook),
    Series(SeriesWebhook),
    Unrecognized,
}

impl Classification {
    pub fn event_type(&self) -> Option<&str> {
        match self {
            Classification::Movie(m) => Some(&m.event_type),
            Classification::Series(s) => Some(&s.event_type),
            Classification::Unrecognized => None,
        }
    }

    pub fn instance_name(&self) -> Option<&str> {
        match self {
            Classification::Movie(m) => Some(&m.instance_name),
            Classification::Series(s) => Some(&s.instance_name),
            Classification::Unrecognized => None,
        }
    }

    /// A test notification: acknowledged, never acted on.
    pub fn is_test(&self) -> bool {
        self.event_type().is_some_and(is_test_event)
    }
}

type Matcher = fn(&Value) -> Option<Classification>;

/// Candidate shapes, in the order they are tried.
const MATCHERS: &[(&str, Matcher)] = &[("movie", match_movie), ("series", match_series)];

/// Classify a raw JSON body.
pub fn classify(raw: &Value) -> Classification {
    for (name, matcher) in MATCHERS {
        if let Some(classification) = matcher(raw) {
            debug!(shape = name, "Payload matched");
            return classification;
        }
    }
    Classification::Unrecognized
}

/// Case-insensitive check for "test" anywhere in the event type.
pub fn is_test_event(event_type: &str) -> bool {
    event_type.to_lowercase().contains("test")
}

fn match_movie(raw: &Value) -> Option<Classification> {
    MovieWebhook::deserialize(raw)
        .map(Classification::Movie)
        .map_err(|e| debug!(error = %e, "Payload is not a movie notification"))
        .ok()
}

fn match_series(raw: &Value) -> Option<Classification> {
    SeriesWebhook::deserialize(raw)
        .map(Classification::Series)
        .map_err(|e| debug!(error = %e, "Payload is not a series notification"))
        .ok()
}
