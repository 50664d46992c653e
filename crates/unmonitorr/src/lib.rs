//! Unmonitorr - unmonitor or remove finished downloads in Radarr and Sonarr,
//! driven by their webhook notifications.

pub mod arr;
pub mod config;
pub mod handlers;
pub mod models;
pub mod response;
pub mod server;
pub mod settings;
pub mod webhook;
