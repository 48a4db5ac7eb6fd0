pub mod api;
pub mod config;
pub mod controllers;
pub mod database;
pub mod entities;
pub mod error;
pub mod helpers;
pub mod logging;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod requests;
pub mod responses;
pub mod router;
pub mod security;
pub mod services;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use error::{Error, Validation};
pub use metrics::AppMetrics;
