//! `generateContent` response envelope.
//!
//! The useful payload sits at `candidates[0].content.parts[0].text` and is
//! itself JSON, so a response is decoded twice.

use serde::Deserialize;

use super::error::InferenceError;
use super::output::ParsedOutput;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

/// Extract the inner text field from a raw response body.
pub fn extract_text(body: &str) -> Result<String, InferenceError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        InferenceError::ResponseShape(format!("response body is not valid JSON: {}", e))
    })?;

    if let Some(text) = envelope.first_text() {
        return Ok(text.to_string());
    }

    let message = match envelope.block_reason() {
        Some(reason) => format!("no candidate text, prompt blocked: {}", reason),
        None => "missing candidates[0].content.parts[0].text".to_string(),
    };
    Err(InferenceError::ResponseShape(message))
}

/// Decode a raw response body into a [`ParsedOutput`].
pub fn parse_response(body: &str) -> Result<ParsedOutput, InferenceError> {
    let text = extract_text(body)?;
    serde_json::from_str(&text).map_err(|e| {
        InferenceError::ResponseShape(format!("candidate text is not a recognised result: {}", e))
    })
}
