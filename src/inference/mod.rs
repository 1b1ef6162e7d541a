//! Inference call: wire contract, transport, retry and result typing.
//!
//! # Flow
//!
//! ```text
//! base64 payload ─→ GenerateContentRequest ─→ invoke (retry loop)
//!                                              │
//!                                   InferenceTransport::send
//!                                              │
//!                  ParsedOutput ←─ parse_response ←─ raw body
//! ```

mod client;
mod error;
mod output;
mod request;
mod response;
mod retry;

pub use client::{GeminiClient, InferenceTransport};
pub use error::{AnalysisFailure, FailureKind, InferenceError};
pub use output::{MenuItem, MenuResult, MenuSection, ParsedOutput, ProductResult, UserFeedback};
pub use request::{GenerateContentRequest, INLINE_MIME_TYPE, RESPONSE_MIME_TYPE};
pub use response::{extract_text, parse_response};
pub use retry::{invoke, RetryPolicy};
