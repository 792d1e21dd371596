//! # GCodeView Core
//!
//! Core types and constants shared by the GCodeView crates.
//! Provides the error taxonomy and the numeric defaults for the camera,
//! the placeholder view and the file picker.

pub mod constants;
pub mod error;

pub use error::{ConfigError, Error, LoadError, Result};
