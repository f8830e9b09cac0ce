use serde::{Deserialize, Deserializer, Serialize};

/// Optional demographics sent with a query. Blank fields are sent as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatientInfo {
    pub age: String,
    pub sex: String,
}

/// One symptom-check request, snapshotted from the form at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomQuery {
    pub symptoms: String,
    pub patient_info: PatientInfo,
}

impl SymptomQuery {
    pub fn new(
        symptoms: impl Into<String>,
        age: impl Into<String>,
        sex: impl Into<String>,
    ) -> Self {
        Self {
            symptoms: symptoms.into(),
            patient_info: PatientInfo {
                age: age.into(),
                sex: sex.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProbableCondition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likelihood: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasons: String,
}

/// Structured answer from the assessment service.
///
/// Every field tolerates being missing or `null`; lists then read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub probable_conditions: Vec<ProbableCondition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_next_steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub red_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
    /// Unstructured model output, when the service echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_model_text: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_read_as_empty() {
        let parsed: AssessmentResult = serde_json::from_str(
            r#"{"probable_conditions":null,"red_flags":["sudden weakness"],"probable_extra":1}"#,
        )
        .unwrap();

        assert!(parsed.probable_conditions.is_empty());
        assert!(parsed.recommended_next_steps.is_empty());
        assert_eq!(parsed.red_flags, vec!["sudden weakness".to_string()]);
        assert_eq!(parsed.disclaimer, None);
        assert_eq!(parsed.raw_model_text, None);
    }

    #[test]
    fn partial_condition_entries_are_tolerated() {
        let parsed: AssessmentResult =
            serde_json::from_str(r#"{"probable_conditions":[{"condition":"Migraine"}]}"#).unwrap();

        assert_eq!(
            parsed.probable_conditions,
            vec![ProbableCondition {
                condition: "Migraine".to_string(),
                likelihood: String::new(),
                reasons: String::new(),
            }]
        );
    }

    #[test]
    fn empty_object_is_an_empty_result() {
        let parsed: AssessmentResult = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AssessmentResult::default());
    }
}
