//! Shared utilities
//!
//! Error type, JWT helpers and custom validators.

pub mod errors;
pub mod jwt;
pub mod validation;
