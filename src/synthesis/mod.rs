//! Pipeline synthesis from natural-language instructions

pub mod synthesizer;

pub use synthesizer::{parse_steps, PipelineSynthesizer};
