//! Cortext Server
//!
//! HTTP surface of the Cortext pipeline service: writes the input text,
//! serves the generated HTML artifact, and triggers the external pipeline
//! through `cortext_runner`.

pub mod api;
pub mod config;
pub mod service;
pub mod state;

pub use api::create_router;
