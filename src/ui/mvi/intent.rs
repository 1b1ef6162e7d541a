//! Marker trait for intents.

/// An event that may change view state.
///
/// Covers user actions (submit, reset) as well as completions reported by
/// background work. Intents cross task boundaries, hence `Send + 'static`.
pub trait Intent: Send + 'static {}
