//! Helpers for testing the Torrust tracker monitor.
pub mod configuration;
pub mod random;
