//! Analysis view state machine.
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - `Idle` / `Processing` / `Result` / `Error`
//! - `intent.rs` - submit, completion and reset events
//! - `reducer.rs` - transitions, including stale-generation filtering

mod intent;
mod reducer;
mod state;

pub use intent::AnalysisIntent;
pub use reducer::AnalysisReducer;
pub use state::AnalysisState;
