use crate::view_model::{AppViewModel, ConditionRowView, PhaseKind, ResultView};
use crate::{AssessmentResult, SymptomQuery};

/// Sequence number of a submission. Zero means nothing was issued yet.
pub type RequestSeq = u64;

/// Shown when a rejection carries no description of its own.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Success(AssessmentResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    symptoms: String,
    age: String,
    sex: String,
    phase: Phase,
    last_issued_seq: RequestSeq,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn last_issued_seq(&self) -> RequestSeq {
        self.last_issued_seq
    }

    /// Submission requires non-empty symptoms and no request in flight.
    pub fn can_submit(&self) -> bool {
        !self.symptoms.is_empty() && self.phase != Phase::Pending
    }

    pub fn view(&self) -> AppViewModel {
        let (phase, error, result) = match &self.phase {
            Phase::Idle => (PhaseKind::Idle, None, None),
            Phase::Pending => (PhaseKind::Pending, None, None),
            Phase::Success(result) => (PhaseKind::Success, None, Some(result_view(result))),
            Phase::Failed(message) => (PhaseKind::Failed, Some(message.clone()), None),
        };
        AppViewModel {
            phase,
            symptoms: self.symptoms.clone(),
            age: self.age.clone(),
            sex: self.sex.clone(),
            submit_enabled: self.can_submit(),
            error,
            result,
        }
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_symptoms(&mut self, symptoms: String) {
        if self.symptoms != symptoms {
            self.symptoms = symptoms;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_age(&mut self, age: String) {
        if self.age != age {
            self.age = age;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_sex(&mut self, sex: String) {
        if self.sex != sex {
            self.sex = sex;
            self.mark_dirty();
        }
    }

    /// Moves to `Pending` and snapshots the form into a query.
    ///
    /// Returns `None` when submission is currently disabled.
    pub(crate) fn begin_submission(&mut self) -> Option<(RequestSeq, SymptomQuery)> {
        if !self.can_submit() {
            return None;
        }
        self.last_issued_seq += 1;
        self.phase = Phase::Pending;
        self.mark_dirty();
        let query = SymptomQuery::new(self.symptoms.clone(), self.age.clone(), self.sex.clone());
        Some((self.last_issued_seq, query))
    }

    /// Applies a resolution for `seq`; stale or unexpected ones are dropped.
    pub(crate) fn apply_success(&mut self, seq: RequestSeq, result: AssessmentResult) -> bool {
        if !self.accepts_resolution(seq) {
            return false;
        }
        self.phase = Phase::Success(result);
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_failure(&mut self, seq: RequestSeq, message: String) -> bool {
        if !self.accepts_resolution(seq) {
            return false;
        }
        let message = if message.trim().is_empty() {
            FALLBACK_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        self.phase = Phase::Failed(message);
        self.mark_dirty();
        true
    }

    fn accepts_resolution(&self, seq: RequestSeq) -> bool {
        seq == self.last_issued_seq && self.phase == Phase::Pending
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

fn result_view(result: &AssessmentResult) -> ResultView {
    ResultView {
        conditions: result
            .probable_conditions
            .iter()
            .map(|c| ConditionRowView {
                condition: c.condition.clone(),
                likelihood: c.likelihood.clone(),
                reasons: c.reasons.clone(),
            })
            .collect(),
        next_steps: result.recommended_next_steps.clone(),
        red_flags: result.red_flags.clone(),
        disclaimer: result.disclaimer.clone().unwrap_or_default(),
        raw_model_text: result.raw_model_text.clone(),
    }
}
