//! Pipeline execution engine

pub mod engine;
pub mod executor;

pub use engine::{EventHandler, ExecutionEngine, ExecutionEvent};
pub use executor::{StepExecutor, DEFAULT_STYLE, DEFAULT_TARGET_LANGUAGE};
