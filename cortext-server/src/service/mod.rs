//! Service Module
//!
//! File access behind the HTTP handlers. Pipeline execution lives in
//! `cortext_runner`.

pub mod file;

// Re-export for convenience
pub use file as file_service;
