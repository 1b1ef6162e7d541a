//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The single place where state transitions are decided.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Compute the next state. Must not perform side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
