//! Intents for the analysis view.

use crate::inference::{AnalysisFailure, ParsedOutput};
use crate::ui::mvi::Intent;

/// Intents that can be dispatched to the analysis view.
///
/// Completion intents carry the generation of the submission that produced
/// them so late arrivals can be told apart from the current request.
#[derive(Debug, Clone)]
pub enum AnalysisIntent {
    /// A new image was submitted.
    Submit { generation: u64 },

    /// The inference call produced a result.
    Completed {
        generation: u64,
        output: ParsedOutput,
    },

    /// The inference call failed.
    Failed {
        generation: u64,
        failure: AnalysisFailure,
    },

    /// User dismissed the current view.
    Reset,
}

impl Intent for AnalysisIntent {}
