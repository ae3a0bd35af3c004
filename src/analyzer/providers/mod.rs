//! Attribute analysis providers.

mod gemini;

pub use gemini::{GeminiAnalyzer, GeminiAnalyzerBuilder, GeminiModel};
