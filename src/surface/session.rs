//! The two-state upload/analyze session.

use crate::analyzer::{AnalysisResult, AttributeProvider, UploadedImage};
use crate::error::Result;

/// Display state of the presentation surface.
///
/// Rebuilt from scratch on each upload rather than mutated in place, so a
/// re-upload can never leave a stale image next to a fresh result.
#[derive(Debug)]
pub enum SurfaceState {
    /// No image uploaded yet; only the static content is shown.
    Idle,
    /// An image was uploaded and the analyzer has run.
    Analyzed {
        /// The uploaded image, shown in its own panel.
        image: UploadedImage,
        /// The description, or the failure displayed in its place.
        outcome: Result<AnalysisResult>,
    },
}

impl SurfaceState {
    /// Returns true if nothing has been uploaded yet.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// One user's interaction with the surface.
///
/// The session mediates between upload events and the analyzer: it validates
/// the payload, invokes the analyzer exactly once per accepted upload, and
/// holds the single live image/result pair.
pub struct Session<P> {
    analyzer: P,
    state: SurfaceState,
}

impl<P: AttributeProvider> Session<P> {
    /// Creates an idle session backed by the given analyzer.
    pub fn new(analyzer: P) -> Self {
        Self {
            analyzer,
            state: SurfaceState::Idle,
        }
    }

    /// Current display state.
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Handles one file-upload event.
    ///
    /// A payload that is not a decodable PNG/JPEG is rejected: the error is
    /// returned, no remote call is made, and the previous state (including a
    /// prior analyzed pair) stays on display. An accepted payload triggers
    /// exactly one analyzer call and replaces the state with a fresh
    /// `Analyzed` entry - a remote failure is part of that state, shown in
    /// place of the result text.
    pub async fn handle_upload(&mut self, bytes: Vec<u8>) -> Result<&SurfaceState> {
        let image = match UploadedImage::from_bytes(bytes) {
            Ok(image) => image,
            Err(e) => {
                tracing::debug!("upload rejected: {e}");
                return Err(e);
            }
        };

        tracing::debug!(
            kind = %image.kind,
            width = image.width,
            height = image.height,
            "upload accepted"
        );

        let outcome = self.analyzer.describe(&image).await;
        self.state = SurfaceState::Analyzed { image, outcome };
        Ok(&self.state)
    }
}
