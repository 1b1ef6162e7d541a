//! Marker trait for view state.

/// View state snapshot.
///
/// `PartialEq` lets owners skip notifying observers when a reduction is a
/// no-op. `Default` is the initial state.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
