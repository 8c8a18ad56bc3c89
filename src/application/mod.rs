//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! registration, login and prediction.

mod auth;
mod prediction;

pub use auth::{AuthError, AuthService};
pub use prediction::{PredictionError, PredictionService};
