use checker_logging::{checker_debug, checker_info};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SymptomsChanged(text) => {
            state.set_symptoms(text);
            Vec::new()
        }
        Msg::AgeChanged(text) => {
            state.set_age(text);
            Vec::new()
        }
        Msg::SexChanged(text) => {
            state.set_sex(text);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some((seq, query)) => {
                checker_info!(
                    "Submitting seq={} symptoms_len={}",
                    seq,
                    query.symptoms.len()
                );
                vec![Effect::SubmitQuery { seq, query }]
            }
            None => {
                checker_debug!("Submit ignored: symptoms empty or request in flight");
                Vec::new()
            }
        },
        Msg::AssessmentReceived { seq, result } => {
            if !state.apply_success(seq, result) {
                checker_debug!(
                    "Dropping stale success seq={} latest={}",
                    seq,
                    state.last_issued_seq()
                );
            }
            Vec::new()
        }
        Msg::AssessmentFailed { seq, message } => {
            if !state.apply_failure(seq, message) {
                checker_debug!(
                    "Dropping stale failure seq={} latest={}",
                    seq,
                    state.last_issued_seq()
                );
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
