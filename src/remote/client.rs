// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Blocking client for the hosted multimodal model.
//!
//! One analysis is one POST to the generateContent endpoint: the image as
//! inline base64 data, the fixed instruction text, and the declared
//! response schema. The call runs on a background thread; the UI never
//! blocks on it. No retries here; the caller owns retry policy.

use super::normalize::normalize;
use super::schema::{response_schema, RawResponse, INSTRUCTIONS};
use crate::error::AnalysisError;
use crate::models::analysis::AnalysisResult;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use std::time::Duration;

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable optionally overriding the model name.
pub const MODEL_VAR: &str = "LAYERLENS_MODEL";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the remote analysis model. Cheap to clone; holds the
/// credential and a reusable HTTP client.
#[derive(Clone)]
pub struct AnalysisClient {
    api_key: String,
    model: String,
    http: reqwest::blocking::Client,
}

impl AnalysisClient {
    /// Build a client from the process environment. Fails with
    /// [`AnalysisError::MissingCredential`] when the key is absent.
    /// Call this at startup, before any UI appears.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AnalysisError::MissingCredential(API_KEY_VAR))?;
        let model = std::env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("layerlens/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            api_key,
            model,
            http,
        })
    }

    /// Analyze one image: a single round trip, then normalization.
    pub fn analyze(&self, image_bytes: &[u8], mime_type: &str) -> Result<AnalysisResult, AnalysisError> {
        let body = build_request_body(image_bytes, mime_type);
        let url = format!("{}/{}:generateContent", ENDPOINT_BASE, self.model);

        log::info!(
            "Sending analysis request ({} byte {} image) to {}",
            image_bytes.len(),
            mime_type,
            self.model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AnalysisError::RemoteStatus(
                status,
                detail.chars().take(200).collect(),
            ));
        }

        let envelope: Value = response
            .json()
            .map_err(|e| AnalysisError::shape(format!("reply is not JSON: {}", e)))?;
        let raw = parse_reply(&envelope)?;

        log::info!("Model returned {} layers", raw.layers.len());
        Ok(normalize(raw))
    }
}

/// Build the generateContent request body: inline image, instructions,
/// and the declared response schema.
pub fn build_request_body(image_bytes: &[u8], mime_type: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inline_data": {
                        "mime_type": mime_type,
                        "data": BASE64.encode(image_bytes)
                    }
                },
                { "text": INSTRUCTIONS }
            ]
        }],
        "generationConfig": {
            "response_mime_type": "application/json",
            "response_schema": response_schema()
        }
    })
}

/// Dig the structured payload out of the generateContent envelope.
fn parse_reply(envelope: &Value) -> Result<RawResponse, AnalysisError> {
    let text = envelope["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| AnalysisError::shape("reply has no candidate text part"))?;
    serde_json::from_str(text)
        .map_err(|e| AnalysisError::shape(format!("candidate payload failed schema: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_carries_inline_image_and_schema() {
        let body = build_request_body(&[1, 2, 3, 4], "image/png");
        let part = &body["contents"][0]["parts"][0]["inline_data"];
        assert_eq!(part["mime_type"], "image/png");
        assert_eq!(part["data"], BASE64.encode([1, 2, 3, 4]));
        assert_eq!(body["contents"][0]["parts"][1]["text"], INSTRUCTIONS);
        assert_eq!(
            body["generationConfig"]["response_mime_type"],
            "application/json"
        );
        assert!(body["generationConfig"]["response_schema"].is_object());
    }

    #[test]
    fn test_parse_reply_unwraps_candidate_text() {
        let inner = r#"{
            "layers": [],
            "analysis": { "ruleOfThirds": 50, "visualBalance": 50, "eyeContact": false }
        }"#;
        let envelope = json!({
            "candidates": [{ "content": { "parts": [{ "text": inner }] } }]
        });
        let raw = parse_reply(&envelope).unwrap();
        assert!(raw.layers.is_empty());
        assert_eq!(raw.analysis.rule_of_thirds, 50.0);
    }

    #[test]
    fn test_parse_reply_rejects_missing_candidates() {
        let err = parse_reply(&json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, AnalysisError::ResponseShape(_)));
    }

    #[test]
    fn test_http_failure_is_not_a_shape_error() {
        let err = AnalysisError::RemoteStatus(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "quota exceeded".to_string(),
        );
        assert!(err.to_string().contains("429"));
        assert!(!err.to_string().contains("malformed"));
        assert!(!matches!(err, AnalysisError::ResponseShape(_)));
    }

    #[test]
    fn test_parse_reply_rejects_free_text() {
        let envelope = json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry, I cannot" }] } }]
        });
        let err = parse_reply(&envelope).unwrap_err();
        assert!(matches!(err, AnalysisError::ResponseShape(_)));
    }
}
