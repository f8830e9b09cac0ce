use std::time::Duration;

use checker_core::{
    update, AppState, AssessmentResult, Effect, Msg, Phase, PhaseKind, ProbableCondition,
};
use checker_engine::{ClientSettings, EngineEvent, EngineHandle};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn engine_for(server: &MockServer) -> EngineHandle {
    let settings = ClientSettings {
        backend_origin: server.uri(),
        ..ClientSettings::default()
    };
    EngineHandle::new(&settings).expect("engine")
}

fn dispatch(engine: &EngineHandle, state: AppState, msg: Msg) -> AppState {
    let (state, effects) = update(state, msg);
    for effect in effects {
        match effect {
            Effect::SubmitQuery { seq, query } => engine.submit(seq, query).expect("submit"),
        }
    }
    state
}

/// Submits `symptoms` and feeds the engine's completion back into the state.
fn submit_and_settle(engine: &EngineHandle, state: AppState, symptoms: &str) -> AppState {
    let state = dispatch(engine, state, Msg::SymptomsChanged(symptoms.to_string()));
    let state = dispatch(engine, state, Msg::SubmitClicked);
    assert_eq!(state.phase(), &Phase::Pending);

    let msg = match engine.recv_timeout(WAIT).expect("completion") {
        EngineEvent::Completed { seq, result: Ok(result) } => {
            Msg::AssessmentReceived { seq, result }
        }
        EngineEvent::Completed { seq, result: Err(err) } => Msg::AssessmentFailed {
            seq,
            message: err.to_string(),
        },
    };
    dispatch(engine, state, msg)
}

#[tokio::test(flavor = "multi_thread")]
async fn headache_scenario_reaches_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/symptom-check"))
        .and(body_json(json!({
            "symptoms": "headache",
            "patient_info": { "age": "", "sex": "" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "probable_conditions": [
                { "condition": "Tension headache", "likelihood": "high", "reasons": "stress-related" }
            ],
            "recommended_next_steps": ["rest", "hydrate"],
            "red_flags": [],
            "disclaimer": "Not medical advice."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let state = submit_and_settle(&engine, AppState::new(), "headache");

    assert_eq!(
        state.phase(),
        &Phase::Success(AssessmentResult {
            probable_conditions: vec![ProbableCondition {
                condition: "Tension headache".to_string(),
                likelihood: "high".to_string(),
                reasons: "stress-related".to_string(),
            }],
            recommended_next_steps: vec!["rest".to_string(), "hydrate".to_string()],
            red_flags: Vec::new(),
            disclaimer: Some("Not medical advice.".to_string()),
            raw_model_text: None,
        })
    );
    let view = state.view();
    assert_eq!(view.error, None);
    assert!(view.result.expect("result").red_flags.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn chest_pain_503_discards_previous_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/symptom-check"))
        .and(body_json(json!({
            "symptoms": "headache",
            "patient_info": { "age": "", "sex": "" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "probable_conditions": [],
            "recommended_next_steps": ["rest"],
            "red_flags": [],
            "disclaimer": "Not medical advice."
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/symptom-check"))
        .and(body_json(json!({
            "symptoms": "chest pain",
            "patient_info": { "age": "", "sex": "" }
        })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let state = submit_and_settle(&engine, AppState::new(), "headache");
    assert_eq!(state.view().phase, PhaseKind::Success);

    let state = submit_and_settle(&engine, state, "chest pain");

    let view = state.view();
    assert_eq!(view.phase, PhaseKind::Failed);
    assert!(view.error.expect("error").contains("503"));
    assert_eq!(view.result, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn retry_after_failure_can_succeed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/symptom-check"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/symptom-check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "disclaimer": "Educational only."
        })))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let state = submit_and_settle(&engine, AppState::new(), "dizzy");
    assert!(state.view().error.expect("error").contains("500"));

    let state = submit_and_settle(&engine, state, "dizzy");

    let view = state.view();
    assert_eq!(view.phase, PhaseKind::Success);
    assert_eq!(view.error, None);
    assert_eq!(view.result.expect("result").disclaimer, "Educational only.");
}
