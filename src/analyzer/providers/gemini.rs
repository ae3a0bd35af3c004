//! Gemini (Google) attribute analysis provider.

use crate::analyzer::prompt::ATTRIBUTE_PROMPT;
use crate::analyzer::provider::AttributeProvider;
use crate::analyzer::types::{AnalysisMetadata, AnalysisResult, UploadedImage};
use crate::error::{sanitize_error_message, AttriscanError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 1.5 Flash (fast, economical).
    #[default]
    Flash15,
    /// Gemini 1.5 Pro (highest quality).
    Pro15,
}

impl GeminiModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flash15 => "gemini-1.5-flash-latest",
            Self::Pro15 => "gemini-1.5-pro-latest",
        }
    }
}

/// Builder for GeminiAnalyzer.
#[derive(Debug, Clone, Default)]
pub struct GeminiAnalyzerBuilder {
    api_key: Option<String>,
    model: GeminiModel,
}

impl GeminiAnalyzerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the Gemini model variant.
    pub fn model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    /// Builds the analyzer, resolving the API key.
    pub fn build(self) -> Result<GeminiAnalyzer> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                AttriscanError::Config("GOOGLE_API_KEY not set and no API key provided".into())
            })?;

        Ok(GeminiAnalyzer {
            client: reqwest::Client::new(),
            api_key,
            model: self.model,
        })
    }
}

/// Gemini attribute analysis provider.
///
/// Sends one `generateContent` request per image, carrying the fixed
/// [`ATTRIBUTE_PROMPT`] and the upload's original bytes. The client and key
/// are built once and reused for the lifetime of the process.
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: GeminiModel,
}

impl GeminiAnalyzer {
    /// Creates a new `GeminiAnalyzerBuilder`.
    pub fn builder() -> GeminiAnalyzerBuilder {
        GeminiAnalyzerBuilder::new()
    }

    async fn describe_impl(&self, image: &UploadedImage) -> Result<AnalysisResult> {
        let start = Instant::now();

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model.as_str(),
        );

        let body = GeminiRequest::from_upload(image);

        tracing::debug!(
            model = self.model.as_str(),
            payload_bytes = image.size(),
            "submitting attribute analysis request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        let text = extract_text(gemini_response)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(duration_ms, chars = text.len(), "attribute analysis complete");

        Ok(AnalysisResult::new(
            text,
            AnalysisMetadata {
                model: Some(self.model.as_str().to_string()),
                duration_ms: Some(duration_ms),
            },
        ))
    }
}

#[async_trait]
impl AttributeProvider for GeminiAnalyzer {
    async fn describe(&self, image: &UploadedImage) -> Result<AnalysisResult> {
        self.describe_impl(image).await
    }

    fn name(&self) -> &str {
        "Gemini (Google)"
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}",
            self.model.as_str(),
        );

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(AttriscanError::Auth("Invalid API key".into())),
            404 => Err(AttriscanError::Api {
                status: 404,
                message: "Model not found. Verify the model name is correct.".into(),
            }),
            s if !(200..300).contains(&s) => Err(AttriscanError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

/// Maps a non-2xx response to an error.
fn parse_error(status: u16, text: &str) -> AttriscanError {
    let text = sanitize_error_message(text);
    if status == 429 {
        return AttriscanError::RateLimited;
    }
    if status == 401 || status == 403 {
        return AttriscanError::Auth(text);
    }
    let lower = text.to_lowercase();
    if lower.contains("safety")
        || lower.contains("blocked")
        || lower.contains("content_policy")
        || lower.contains("prohibited")
    {
        return AttriscanError::ContentBlocked(text);
    }
    AttriscanError::Api {
        status,
        message: text,
    }
}

/// Pulls the description text out of a `generateContent` response.
///
/// Safety blocks arrive as HTTP 200 with either `promptFeedback.blockReason`
/// or a safety `finishReason`; those become errors. Anything delivered as
/// ordinary candidate text (including refusals the prompt asked the model
/// not to produce) is a successful response.
fn extract_text(response: GeminiResponse) -> Result<String> {
    if let Some(ref feedback) = response.prompt_feedback {
        if let Some(ref reason) = feedback.block_reason {
            let msg = feedback
                .block_reason_message
                .clone()
                .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
            return Err(AttriscanError::ContentBlocked(msg));
        }
    }

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        AttriscanError::UnexpectedResponse("No candidates in Gemini response".into())
    })?;

    if let Some(ref finish_reason) = candidate.finish_reason {
        match finish_reason.as_str() {
            "SAFETY" | "RECITATION" | "PROHIBITED_CONTENT" | "BLOCKLIST" => {
                return Err(AttriscanError::ContentBlocked(format!(
                    "Content blocked by Gemini safety filter: {}",
                    finish_reason
                )));
            }
            _ => {} // STOP, MAX_TOKENS, etc. are normal
        }
    }

    let content = candidate.content.ok_or_else(|| {
        AttriscanError::UnexpectedResponse("No content in Gemini candidate".into())
    })?;

    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();

    if text.trim().is_empty() {
        return Err(AttriscanError::UnexpectedResponse(
            "No text in Gemini response".into(),
        ));
    }

    Ok(text)
}

// Request/Response types
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

/// A part in a Gemini request - can be text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    Text { text: String },
    InlineData { inline_data: GeminiInlineData },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

impl GeminiRequest {
    fn from_upload(image: &UploadedImage) -> Self {
        let parts = vec![
            GeminiRequestPart::Text {
                text: ATTRIBUTE_PROMPT.to_string(),
            },
            GeminiRequestPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: image.mime_type().to_string(),
                    data: image.to_base64(),
                },
            },
        ];

        Self {
            contents: vec![GeminiContent { parts }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::types::ImageKind;

    fn png_upload() -> UploadedImage {
        UploadedImage {
            data: vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4],
            kind: ImageKind::Png,
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_gemini_model_as_str() {
        assert_eq!(GeminiModel::Flash15.as_str(), "gemini-1.5-flash-latest");
        assert_eq!(GeminiModel::Pro15.as_str(), "gemini-1.5-pro-latest");
    }

    #[test]
    fn test_gemini_model_default() {
        assert_eq!(GeminiModel::default(), GeminiModel::Flash15);
    }

    #[test]
    fn test_builder_with_explicit_key() {
        let analyzer = GeminiAnalyzerBuilder::new()
            .api_key("test-key")
            .model(GeminiModel::Pro15)
            .build();
        assert!(analyzer.is_ok());
    }

    #[test]
    fn test_request_construction() {
        let req = GeminiRequest::from_upload(&png_upload());

        assert_eq!(req.contents.len(), 1);
        // Instruction text first, then the image, as one combined request.
        assert_eq!(req.contents[0].parts.len(), 2);
        match &req.contents[0].parts[0] {
            GeminiRequestPart::Text { text } => assert_eq!(text, ATTRIBUTE_PROMPT),
            _ => panic!("first part should be the instruction text"),
        }
    }

    #[test]
    fn test_request_payload_round_trips_image_bytes() {
        use base64::Engine;
        let upload = png_upload();
        let req = GeminiRequest::from_upload(&upload);

        match &req.contents[0].parts[1] {
            GeminiRequestPart::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/png");
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(&inline_data.data)
                    .unwrap();
                assert_eq!(decoded, upload.data);
            }
            _ => panic!("second part should be the image payload"),
        }
    }

    #[test]
    fn test_request_serialization_field_names() {
        let req = GeminiRequest::from_upload(&png_upload());
        let json = serde_json::to_value(&req).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert!(parts[0].get("text").is_some());
        assert!(parts[1]["inline_data"].get("mimeType").is_some());
    }

    #[test]
    fn test_prompt_is_invariant_across_uploads() {
        let jpeg = UploadedImage {
            data: vec![0xFF, 0xD8, 0xFF, 0xE0, 9, 9, 9],
            kind: ImageKind::Jpeg,
            width: 640,
            height: 480,
        };

        for upload in [png_upload(), jpeg] {
            let req = GeminiRequest::from_upload(&upload);
            match &req.contents[0].parts[0] {
                GeminiRequestPart::Text { text } => assert_eq!(text, ATTRIBUTE_PROMPT),
                _ => panic!("first part should be the instruction text"),
            }
        }
    }

    #[test]
    fn test_extract_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "  Gender: Female, Age Estimate: ~30 years  "}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        let text = extract_text(resp).unwrap();
        assert_eq!(text, "  Gender: Female, Age Estimate: ~30 years  ");
    }

    #[test]
    fn test_extract_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "Gender: Male"}, {"text": ", Beard: Yes"}]
                }
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(resp).unwrap(), "Gender: Male, Beard: Yes");
    }

    #[test]
    fn test_refusal_text_is_success() {
        // The prompt asks the model not to apologize, but nothing enforces
        // it. A refusal in candidate text is still a successful response.
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "I'm sorry, I cannot determine these attributes."}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(extract_text(resp).is_ok());
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let resp: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let err = extract_text(resp).unwrap_err();
        assert!(matches!(err, AttriscanError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_extract_text_no_text_parts() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [{}] }
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        let err = extract_text(resp).unwrap_err();
        assert!(matches!(err, AttriscanError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_extract_text_prompt_feedback_block() {
        let json = r#"{
            "candidates": [],
            "promptFeedback": {
                "blockReason": "SAFETY",
                "blockReasonMessage": "Prompt was blocked due to safety"
            }
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        let err = extract_text(resp).unwrap_err();
        assert!(matches!(err, AttriscanError::ContentBlocked(_)));
        assert_eq!(
            err.to_string(),
            "content blocked: Prompt was blocked due to safety"
        );
    }

    #[test]
    fn test_extract_text_safety_finish_reason() {
        let json = r#"{
            "candidates": [{ "finishReason": "SAFETY" }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        let err = extract_text(resp).unwrap_err();
        assert!(matches!(err, AttriscanError::ContentBlocked(_)));
    }

    #[test]
    fn test_parse_error_status_mapping() {
        assert!(matches!(
            parse_error(401, "bad key"),
            AttriscanError::Auth(_)
        ));
        assert!(matches!(
            parse_error(403, "forbidden"),
            AttriscanError::Auth(_)
        ));
        assert!(matches!(parse_error(429, ""), AttriscanError::RateLimited));
        assert!(matches!(
            parse_error(400, "image too large for safety screening"),
            AttriscanError::ContentBlocked(_)
        ));
        assert!(matches!(
            parse_error(500, "internal"),
            AttriscanError::Api { status: 500, .. }
        ));
    }
}
