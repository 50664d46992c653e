//! Webhook decision core: classify a notification, then apply the movie or
//! series policy to it.

mod classify;
mod engine;

pub use classify::{Classification, classify, is_test_event};
pub use engine::{Outcome, SeriesOutcome, handle_movie, handle_series, series_eligible};
