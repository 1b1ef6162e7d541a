//! Reducer for the analysis view.

use crate::ui::mvi::Reducer;

use super::intent::AnalysisIntent;
use super::state::AnalysisState;

/// Reducer for analysis state transitions.
///
/// | from                  | intent            | to              |
/// |-----------------------|-------------------|-----------------|
/// | Idle / Result / Error | Submit{g}         | Processing{g}   |
/// | Processing            | Submit            | unchanged       |
/// | Processing{g}         | Completed{g, out} | Result(out)     |
/// | Processing{g}         | Failed{g, f}      | Error(f)        |
/// | any                   | Reset             | Idle            |
///
/// Completions whose generation does not match the in-flight one are
/// dropped.
pub struct AnalysisReducer;

impl Reducer for AnalysisReducer {
    type State = AnalysisState;
    type Intent = AnalysisIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AnalysisIntent::Submit { generation } => match state {
                AnalysisState::Processing { .. } => state,
                _ => AnalysisState::Processing { generation },
            },

            AnalysisIntent::Completed { generation, output } => {
                if state.generation() == Some(generation) {
                    AnalysisState::Result(output)
                } else {
                    state
                }
            }

            AnalysisIntent::Failed {
                generation,
                failure,
            } => {
                if state.generation() == Some(generation) {
                    AnalysisState::Error(failure)
                } else {
                    state
                }
            }

            AnalysisIntent::Reset => AnalysisState::Idle,
        }
    }
}
