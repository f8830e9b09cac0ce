use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use checker_core::{Effect, Msg};
use checker_engine::{ClientSettings, EngineEvent, EngineHandle, TransportError};
use checker_logging::{checker_info, checker_warn};

use super::app::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(
        settings: &ClientSettings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, TransportError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?, event_tx))
    }

    /// Drives an already built engine; completions are forwarded to `event_tx`.
    pub fn with_engine(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
        };
        runner.spawn_event_loop(event_tx);
        runner
    }

    /// Hands effects to the engine. Returns failures for submissions it refused.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut refused = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitQuery { seq, query } => {
                    checker_info!(
                        "SubmitQuery seq={} symptoms_len={} age_set={} sex_set={}",
                        seq,
                        query.symptoms.len(),
                        !query.patient_info.age.is_empty(),
                        !query.patient_info.sex.is_empty()
                    );
                    if let Err(err) = self.engine.submit(seq, query) {
                        checker_warn!("Submission seq={} not queued: {}", seq, err);
                        refused.push(Msg::AssessmentFailed {
                            seq,
                            message: err.to_string(),
                        });
                    }
                }
            }
        }
        refused
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(POLL_INTERVAL) {
                if event_tx.send(AppEvent::Core(completion_to_msg(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn completion_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed {
            seq,
            result: Ok(result),
        } => Msg::AssessmentReceived { seq, result },
        EngineEvent::Completed {
            seq,
            result: Err(err),
        } => {
            checker_warn!("Submission seq={} failed: {}", seq, err);
            Msg::AssessmentFailed {
                seq,
                message: err.to_string(),
            }
        }
    }
}
