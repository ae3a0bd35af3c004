#![warn(missing_docs)]
//! attriscan - human attribute analysis for photos.
//!
//! This crate sends an uploaded photo, together with a fixed instruction
//! template, to a hosted multimodal inference API (Google Gemini) and
//! returns the model's free-text description of the person in the photo.
//!
//! # Quick Start
//!
//! ```no_run
//! use attriscan::{AttributeProvider, GeminiAnalyzer, UploadedImage};
//!
//! #[tokio::main]
//! async fn main() -> attriscan::Result<()> {
//!     let analyzer = GeminiAnalyzer::builder().build()?;
//!     let image = UploadedImage::open("portrait.jpg")?;
//!     let result = analyzer.describe(&image).await?;
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! # Driving the surface
//!
//! The [`surface::Session`] type models the interactive flow: it validates
//! each uploaded payload, invokes the analyzer exactly once per accepted
//! upload, and holds the single live image/result pair for a renderer to
//! display side by side.
//!
//! ```no_run
//! use attriscan::surface::{Session, SurfaceState};
//! use attriscan::GeminiAnalyzer;
//!
//! #[tokio::main]
//! async fn main() -> attriscan::Result<()> {
//!     let mut session = Session::new(GeminiAnalyzer::builder().build()?);
//!     let state = session.handle_upload(std::fs::read("portrait.jpg")?).await?;
//!     if let SurfaceState::Analyzed { outcome, .. } = state {
//!         match outcome {
//!             Ok(result) => println!("{}", result.text),
//!             Err(e) => eprintln!("analysis failed: {e}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod config;
mod error;
pub mod surface;

// Re-export error types at crate root
pub use error::{AttriscanError, Result};

// Re-export commonly used analyzer types
pub use analyzer::{
    AnalysisMetadata, AnalysisResult, AttributeProvider, ImageKind, UploadedImage,
    ATTRIBUTE_PROMPT,
};

pub use analyzer::providers::{GeminiAnalyzer, GeminiAnalyzerBuilder, GeminiModel};

pub use config::Config;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::analyzer::{AnalysisResult, AttributeProvider, UploadedImage};
    pub use crate::analyzer::providers::GeminiAnalyzer;
    pub use crate::config::Config;
    pub use crate::error::{AttriscanError, Result};
    pub use crate::surface::{Session, SurfaceState};
}
