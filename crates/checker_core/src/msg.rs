#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the symptoms text.
    SymptomsChanged(String),
    /// User edited the optional age field.
    AgeChanged(String),
    /// User edited the optional sex field.
    SexChanged(String),
    /// User asked to check the current symptoms.
    SubmitClicked,
    /// Transport resolved a submission.
    AssessmentReceived {
        seq: crate::RequestSeq,
        result: crate::AssessmentResult,
    },
    /// Transport rejected a submission.
    AssessmentFailed {
        seq: crate::RequestSeq,
        message: String,
    },
    /// Carries no change; `update` hands the state back untouched.
    NoOp,
}
