//! State for the analysis view.

use crate::inference::{AnalysisFailure, ParsedOutput};
use crate::ui::mvi::UiState;

/// State of the analysis view.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    /// Waiting for an image.
    #[default]
    Idle,

    /// An inference call is in flight.
    Processing {
        /// Generation of the submission being processed.
        generation: u64,
    },

    /// The last submission succeeded.
    Result(ParsedOutput),

    /// The last submission failed.
    Error(AnalysisFailure),
}

impl UiState for AnalysisState {}

impl AnalysisState {
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    /// True once a submission has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Result(_) | Self::Error(_))
    }

    /// Generation of the in-flight submission, if any.
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Processing { generation } => Some(*generation),
            _ => None,
        }
    }

    pub fn output(&self) -> Option<&ParsedOutput> {
        match self {
            Self::Result(output) => Some(output),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&AnalysisFailure> {
        match self {
            Self::Error(failure) => Some(failure),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing { .. } => "processing",
            Self::Result(_) => "result",
            Self::Error(_) => "error",
        }
    }
}
