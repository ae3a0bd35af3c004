//! Drives the upload/analyze surface without touching the network.
//!
//! Run with: `cargo run --example offline_surface -- <photo.png|jpg>`
//!
//! A canned provider stands in for the remote service, so this demo shows
//! the session flow (validate, analyze, display) with no API key.

use async_trait::async_trait;
use attriscan::surface::{page, Session, SurfaceState};
use attriscan::{AnalysisMetadata, AnalysisResult, AttributeProvider, Result, UploadedImage};

struct CannedAnalyzer;

#[async_trait]
impl AttributeProvider for CannedAnalyzer {
    async fn describe(&self, _image: &UploadedImage) -> Result<AnalysisResult> {
        Ok(AnalysisResult::new(
            "Gender: Female\nAge Estimate: ~30 years\nMood: Happy\nGlasses: No",
            AnalysisMetadata::default(),
        ))
    }

    fn name(&self) -> &str {
        "canned"
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: offline_surface <photo.png|jpg>");

    let mut session = Session::new(CannedAnalyzer);
    let state = session.handle_upload(std::fs::read(&input_path)?).await?;

    println!("{}", page::PAGE_TITLE);
    println!();
    if let SurfaceState::Analyzed { image, outcome } = state {
        println!(
            "{}: {}x{} {}",
            page::IMAGE_CAPTION,
            image.width,
            image.height,
            image.kind
        );
        match outcome {
            Ok(result) => println!("{}", result.text),
            Err(e) => println!("Analysis failed: {e}"),
        }
    }
    Ok(())
}
