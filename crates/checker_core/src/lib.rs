//! Symptom checker core: pure submission state machine and view-model helpers.
mod assessment;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use assessment::{AssessmentResult, PatientInfo, ProbableCondition, SymptomQuery};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Phase, RequestSeq, FALLBACK_FAILURE_MESSAGE};
pub use update::update;
pub use view_model::{
    AppViewModel, ConditionRowView, PhaseKind, ResultView, SUBMIT_LABEL_IDLE,
    SUBMIT_LABEL_PENDING,
};
