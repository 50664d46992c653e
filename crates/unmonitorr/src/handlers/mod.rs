//! HTTP request handlers.

mod admin;
mod health;
mod version;
mod webhook;

pub use admin::{get_settings, put_settings, test_arr};
pub use health::{livez, readyz};
pub use version::version;
pub use webhook::webhook;
