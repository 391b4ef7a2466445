//! API handlers for typoreporter.
//!
//! `signup` owns the signup pages and their helpers (validation, CSRF,
//! message bundles, rendering); `health` reports build info and store reachability.

pub mod health;
pub mod signup;
