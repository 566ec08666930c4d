//! Core domain types
//!
//! Shared between the runner (which produces them) and the server and
//! client (which move them over HTTP). Nothing here is persisted; every
//! value lives for one request.

pub mod outcome;
pub mod run;
pub mod step;
