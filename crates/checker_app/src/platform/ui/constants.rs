pub const TITLE: &str = "Healthcare Symptom Checker";
pub const HEADING_CONDITIONS: &str = "Probable Conditions";
pub const HEADING_NEXT_STEPS: &str = "Recommended Next Steps";
pub const HEADING_RED_FLAGS: &str = "Red Flags";
pub const HEADING_RAW: &str = "Raw Model Output";
pub const EMPTY_SECTION: &str = "(none)";
pub const HINT_SYMPTOMS_REQUIRED: &str = "Enter symptoms first, e.g. `symptoms fever, cough`.";
pub const HINT_ALREADY_PENDING: &str = "A check is already in progress.";
