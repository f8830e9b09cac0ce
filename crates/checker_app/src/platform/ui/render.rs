use checker_core::{AppViewModel, ConditionRowView, PhaseKind, ResultView};

use super::constants::*;

/// Options that change what the result section shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_raw: bool,
}

/// Renders the whole view: form summary, status, then result or error.
pub fn render(view: &AppViewModel, options: RenderOptions) -> Vec<String> {
    let mut lines = vec![TITLE.to_string()];
    lines.extend(render_form(view));

    match view.phase {
        PhaseKind::Idle => {}
        PhaseKind::Pending => lines.push(format!("[{}]", view.submit_label())),
        PhaseKind::Failed => {
            if let Some(error) = &view.error {
                lines.push(format!("Error: {error}"));
            }
        }
        PhaseKind::Success => {
            if let Some(result) = &view.result {
                lines.extend(render_result(result, options));
            }
        }
    }

    lines
}

/// One-line summary of the form fields and the submit control.
pub fn render_form(view: &AppViewModel) -> Vec<String> {
    let submit = if view.submit_enabled {
        format!("[{}]", view.submit_label())
    } else {
        format!("[{}] (disabled)", view.submit_label())
    };
    vec![format!(
        "Symptoms: {} | Age: {} | Sex: {} | {}",
        display_field(&view.symptoms),
        display_field(&view.age),
        display_field(&view.sex),
        submit
    )]
}

fn render_result(result: &ResultView, options: RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push(HEADING_CONDITIONS.to_string());
    if result.conditions.is_empty() {
        lines.push(format!("  {EMPTY_SECTION}"));
    }
    for condition in &result.conditions {
        lines.extend(format_condition(condition));
    }

    lines.push(String::new());
    lines.push(HEADING_NEXT_STEPS.to_string());
    if result.next_steps.is_empty() {
        lines.push(format!("  {EMPTY_SECTION}"));
    }
    for (idx, step) in result.next_steps.iter().enumerate() {
        lines.push(format!("  {}. {step}", idx + 1));
    }

    lines.push(String::new());
    lines.push(HEADING_RED_FLAGS.to_string());
    if result.red_flags.is_empty() {
        lines.push(format!("  {EMPTY_SECTION}"));
    }
    for flag in &result.red_flags {
        lines.push(format!("  - {flag}"));
    }

    if !result.disclaimer.is_empty() {
        lines.push(String::new());
        lines.push(result.disclaimer.clone());
    }

    if options.show_raw {
        if let Some(raw) = &result.raw_model_text {
            lines.push(String::new());
            lines.push(HEADING_RAW.to_string());
            lines.extend(raw.lines().map(|line| format!("  {line}")));
        }
    }

    lines
}

fn format_condition(condition: &ConditionRowView) -> Vec<String> {
    let mut lines = if condition.likelihood.is_empty() {
        vec![format!("  - {}", condition.condition)]
    } else {
        vec![format!(
            "  - {} ({})",
            condition.condition, condition.likelihood
        )]
    };
    if !condition.reasons.is_empty() {
        lines.push(format!("      {}", condition.reasons));
    }
    lines
}

fn display_field(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
