//! Utilities: logging and input validation

pub mod logger;
pub mod validation;
