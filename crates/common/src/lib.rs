//! Hardsub Studio Common Utilities
//!
//! Shared infrastructure for all Hardsub Studio crates:
//! - Error types and result aliases
//! - Step pacing (delay and jitter sources for the simulated pipeline)
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod pacing;

pub use config::*;
pub use error::*;
pub use pacing::*;
