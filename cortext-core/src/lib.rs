//! Cortext Core
//!
//! Core types for the Cortext pipeline service.
//!
//! This crate contains:
//! - Domain types: run identifiers, step commands, step results, outcomes
//! - DTOs: request and reply bodies of the HTTP API

pub mod domain;
pub mod dto;
