pub const SUBMIT_LABEL_IDLE: &str = "Check Symptoms";
pub const SUBMIT_LABEL_PENDING: &str = "Checking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseKind {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: PhaseKind,
    pub symptoms: String,
    pub age: String,
    pub sex: String,
    pub submit_enabled: bool,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

impl AppViewModel {
    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            PhaseKind::Pending => SUBMIT_LABEL_PENDING,
            _ => SUBMIT_LABEL_IDLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultView {
    pub conditions: Vec<ConditionRowView>,
    pub next_steps: Vec<String>,
    pub red_flags: Vec<String>,
    pub disclaimer: String,
    pub raw_model_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRowView {
    pub condition: String,
    pub likelihood: String,
    pub reasons: String,
}
