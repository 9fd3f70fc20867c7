//! Builder API for ergonomic engine construction.
//!
//! This module provides a fluent builder, serializable settings and a
//! table macro for creating transition engines with minimal boilerplate.

pub mod engine;
pub mod error;
pub mod macros;
pub mod settings;

pub use engine::EngineBuilder;
pub use error::BuildError;
pub use settings::EngineSettings;
