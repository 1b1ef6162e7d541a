//! Analysis orchestration.
//!
//! Owns the [`AnalysisState`], runs the inference call in the background and
//! folds its outcome back into the state through [`AnalysisReducer`].
//!
//! Every submission gets a fresh generation number. Outcomes are applied
//! only while their generation is the one in flight, so a response that
//! arrives after `reset()` (or after a newer submission) is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::inference::{
    invoke, parse_response, AnalysisFailure, GenerateContentRequest, InferenceError,
    InferenceTransport, ParsedOutput, RetryPolicy,
};
use crate::ui::analysis::{AnalysisIntent, AnalysisReducer, AnalysisState};
use crate::ui::mvi::Reducer;

/// Errors returned synchronously by [`AnalysisOrchestrator::submit`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// A submission is already being processed.
    #[error("An analysis is already in progress")]
    ConcurrentSubmit,
}

/// Drives image analysis and exposes the resulting view state.
pub struct AnalysisOrchestrator<T> {
    transport: Arc<T>,
    policy: RetryPolicy,
    prompt: Arc<str>,
    state: Arc<watch::Sender<AnalysisState>>,
    generation: AtomicU64,
}

impl<T: InferenceTransport> AnalysisOrchestrator<T> {
    pub fn new(transport: T, policy: RetryPolicy, prompt: impl Into<Arc<str>>) -> Self {
        let (state, _) = watch::channel(AnalysisState::Idle);
        Self {
            transport: Arc::new(transport),
            policy,
            prompt: prompt.into(),
            state: Arc::new(state),
            generation: AtomicU64::new(0),
        }
    }

    /// Start analysing a base64 image payload.
    ///
    /// Moves to `Processing` and spawns the inference call on the current
    /// tokio runtime. A second submission while one is in flight is rejected
    /// and leaves the state untouched.
    ///
    /// The returned handle resolves once the outcome has been applied (or
    /// discarded as stale).
    pub fn submit(&self, base64_payload: String) -> Result<JoinHandle<()>, SubmitError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !dispatch(&self.state, AnalysisIntent::Submit { generation }) {
            tracing::warn!(generation, "Rejected submit while an analysis is in progress");
            return Err(SubmitError::ConcurrentSubmit);
        }

        tracing::info!(
            generation,
            payload_len = base64_payload.len(),
            "Analysis submitted"
        );

        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        let prompt = Arc::clone(&self.prompt);
        let policy = self.policy;

        Ok(tokio::spawn(async move {
            let outcome = analyze(transport.as_ref(), &policy, &prompt, base64_payload).await;

            let intent = match outcome {
                Ok(output) => {
                    tracing::info!(generation, kind = output.kind(), "Analysis completed");
                    AnalysisIntent::Completed { generation, output }
                }
                Err(err) => {
                    tracing::error!(
                        generation,
                        error_type = err.error_type(),
                        error = %err,
                        "Analysis failed"
                    );
                    AnalysisIntent::Failed {
                        generation,
                        failure: AnalysisFailure::from(&err),
                    }
                }
            };

            if !dispatch(&state, intent) {
                tracing::debug!(generation, "Discarded outcome of a superseded analysis");
            }
        }))
    }

    /// Return to `Idle`.
    ///
    /// In-flight work keeps running; its outcome will be discarded.
    pub fn reset(&self) {
        dispatch(&self.state, AnalysisIntent::Reset);
        tracing::info!("Analysis reset");
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AnalysisState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state.subscribe()
    }

    /// Wait until the state is no longer `Processing`.
    pub async fn wait_settled(&self) -> AnalysisState {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(|state| !state.is_processing()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

/// Apply an intent. Returns whether the state changed.
fn dispatch(state: &watch::Sender<AnalysisState>, intent: AnalysisIntent) -> bool {
    state.send_if_modified(|current| {
        let next = AnalysisReducer::reduce(current.clone(), intent);
        if next == *current {
            return false;
        }
        tracing::debug!(from = current.label(), to = next.label(), "Analysis state changed");
        *current = next;
        true
    })
}

async fn analyze<T: InferenceTransport>(
    transport: &T,
    policy: &RetryPolicy,
    prompt: &str,
    base64_payload: String,
) -> Result<ParsedOutput, InferenceError> {
    let request = GenerateContentRequest::for_image(prompt, base64_payload)?;
    let body = invoke(transport, &request, policy).await?;
    parse_response(&body)
}
