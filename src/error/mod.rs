// src/error/mod.rs
//
// Error layer
//
// A single application-level error type. Domain rule violations are carried
// as a nested DomainError so callers can distinguish "you sent bad input"
// from infrastructure failures.

mod types;

pub use types::{AppError, AppResult};
