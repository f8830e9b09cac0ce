use crate::{RequestSeq, SymptomQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one query to the assessment service; the reply must echo `seq`.
    SubmitQuery { seq: RequestSeq, query: SymptomQuery },
}
