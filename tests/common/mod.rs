//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Notify;
use tokio::time::Instant;
use travel_pilot::inference::{GenerateContentRequest, InferenceError, InferenceTransport};

pub const MENU_JSON: &str = r#"{"kind":"menu","title":"T","sections":[{"category":"C","items":[{"name":"N","price":"$5"}]}]}"#;

pub const PRODUCT_JSON: &str = r#"{"kind":"product","brand":"Acme","name":"Kettle","priceRange":"$20-$30","marketReview":"Reliable","userFeedback":{"pros":["Fast"],"cons":["Loud"]}}"#;

/// Small valid base64 payload.
pub const PAYLOAD: &str = "aGVsbG8gd29ybGQ=";

/// Wrap model text in the two-level `generateContent` envelope.
pub fn envelope(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    })
    .to_string()
}

pub fn transient() -> InferenceError {
    InferenceError::Transport {
        message: "connection reset".to_string(),
    }
}

pub fn unavailable() -> InferenceError {
    InferenceError::UpstreamStatus {
        status: 503,
        message: "unavailable".to_string(),
    }
}

pub fn test_request() -> GenerateContentRequest {
    GenerateContentRequest::for_image("Analyze", PAYLOAD.to_string()).expect("valid payload")
}

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write a config file into a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// One scripted reply.
pub enum Step {
    Reply(Result<String, InferenceError>),
    /// Reply once the gate is notified.
    Gated(Arc<Notify>, Result<String, InferenceError>),
}

impl Step {
    pub fn ok(body: String) -> Self {
        Step::Reply(Ok(body))
    }

    pub fn err(err: InferenceError) -> Self {
        Step::Reply(Err(err))
    }
}

struct ScriptState {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<Instant>>,
}

/// Transport that replays a script and records when it was called.
///
/// Once the script runs out every call fails with a transport error.
#[derive(Clone)]
pub struct ScriptedTransport {
    state: Arc<ScriptState>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            state: Arc::new(ScriptState {
                steps: Mutex::new(steps.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// `failures` transient errors followed by one successful reply.
    pub fn failing_then(failures: usize, body: String) -> Self {
        let mut steps: Vec<Step> = (0..failures).map(|_| Step::err(transient())).collect();
        steps.push(Step::ok(body));
        Self::new(steps)
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().len()
    }

    /// Gaps between consecutive calls.
    pub fn gaps(&self) -> Vec<Duration> {
        let calls = self.state.calls.lock();
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

impl InferenceTransport for ScriptedTransport {
    async fn send(&self, _request: &GenerateContentRequest) -> Result<String, InferenceError> {
        self.state.calls.lock().push(Instant::now());
        let step = self.state.steps.lock().pop_front();

        match step {
            Some(Step::Reply(reply)) => reply,
            Some(Step::Gated(gate, reply)) => {
                gate.notified().await;
                reply
            }
            None => Err(transient()),
        }
    }
}

/// Assert `actual` is within a few milliseconds of `expected`.
pub fn assert_close(actual: Duration, expected: Duration) {
    let tolerance = Duration::from_millis(5);
    let diff = if actual > expected {
        actual - expected
    } else {
        expected - actual
    };
    assert!(
        diff <= tolerance,
        "expected ~{:?}, got {:?}",
        expected,
        actual
    );
}
