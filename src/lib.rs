//! Dish Form
//!
//! Server-rendered data-entry form for dishes. Submissions are validated
//! locally, shaped into the dishes API wire format and forwarded to the
//! remote backend in a single request.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
