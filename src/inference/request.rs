//! `generateContent` request body.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use super::error::InferenceError;

/// MIME type declared for the inline image part.
pub const INLINE_MIME_TYPE: &str = "image/png";

/// MIME type requested for the model's reply.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Request body for a single-image analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

impl GenerateContentRequest {
    /// Build the request for one base64 image payload.
    ///
    /// The payload must be bare base64 (no data-URI prefix). Payloads that
    /// cannot be decoded are rejected here, before any network attempt.
    pub fn for_image(prompt: &str, base64_payload: String) -> Result<Self, InferenceError> {
        if base64_payload.is_empty() {
            return Err(InferenceError::InvalidRequest(
                "image payload is empty".to_string(),
            ));
        }

        STANDARD.decode(&base64_payload).map_err(|e| {
            InferenceError::InvalidRequest(format!("image payload is not valid base64: {}", e))
        })?;

        Ok(Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: INLINE_MIME_TYPE.to_string(),
                            data: base64_payload,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE.to_string(),
            },
        })
    }
}
