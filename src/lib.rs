//! Tuning registry for the Starfall asteroid shooter.
//!
//! Every number, colour and catalog entry the game reads at runtime lives in
//! one immutable [`registry::ConfigRegistry`], built once at startup from the
//! compiled [`constants`] plus optional `assets/tuning.toml` overrides.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod milestone;
pub mod palette;
pub mod registry;
