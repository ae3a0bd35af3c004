//! End-to-end attribute analysis example.
//!
//! Run with: `cargo run --example analyze_photo -- <photo.png|jpg>`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use attriscan::{AttributeProvider, GeminiAnalyzer, UploadedImage};

#[tokio::main]
async fn main() -> attriscan::Result<()> {
    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: analyze_photo <photo.png|jpg>");

    let image = UploadedImage::open(&input_path)?;

    let analyzer = GeminiAnalyzer::builder().build()?;
    let result = analyzer.describe(&image).await?;

    println!("{}", result.text);
    Ok(())
}
