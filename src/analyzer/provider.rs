//! Attribute provider trait.

use crate::analyzer::types::{AnalysisResult, UploadedImage};
use crate::error::Result;
use async_trait::async_trait;

/// Trait for services that describe human attributes in an image.
///
/// Implementations are stateless across invocations: each call sends exactly
/// one request and keeps no memory of prior images or results. Tests and
/// offline demos substitute a canned implementation at this seam.
#[async_trait]
pub trait AttributeProvider: Send + Sync {
    /// Produces a natural-language description of the human attributes
    /// visible in the given image.
    async fn describe(&self, image: &UploadedImage) -> Result<AnalysisResult>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}
