//! Core domain models
//!
//! This module defines the data structures that describe steps, the
//! records produced by running them, and the errors raised along the way.

pub mod config;
pub mod error;
pub mod language;
pub mod state;
pub mod step;

pub use error::{Error, Result};
pub use language::{LanguageRegistry, SUPPORTED_LANGUAGES};
pub use state::*;
pub use step::*;
