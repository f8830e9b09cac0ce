use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use checker_core::{AssessmentResult, RequestSeq, SymptomQuery};
use checker_logging::{checker_error, checker_info};

use crate::client::{ClientSettings, ReqwestSymptomClient, SymptomClient};
use crate::{EngineEvent, FailureKind, TransportError};

enum EngineCommand {
    Submit { seq: RequestSeq, query: SymptomQuery },
}

/// Runs submissions on a background runtime and reports completions.
///
/// Every accepted submission yields exactly one `Completed` event, even when
/// the request task panics. Requests are never cancelled.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
        let client = ReqwestSymptomClient::new(settings)?;
        checker_info!("Engine targeting {}", client.endpoint());
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn SymptomClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    checker_error!("Failed to start engine runtime: {}", err);
                    reject_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit { seq, query } => {
                        let client = client.clone();
                        let request =
                            runtime.spawn(async move { client.send(&query).await });
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = match request.await {
                                Ok(result) => result,
                                Err(err) => {
                                    checker_error!("Request task seq={} aborted: {}", seq, err);
                                    Err(TransportError::new(
                                        FailureKind::Internal,
                                        format!("request task failed: {err}"),
                                    ))
                                }
                            };
                            report(seq, result, &event_tx);
                        });
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    /// Queues one submission. Fails only when the engine thread is gone.
    pub fn submit(&self, seq: RequestSeq, query: SymptomQuery) -> Result<(), TransportError> {
        self.cmd_tx
            .send(EngineCommand::Submit { seq, query })
            .map_err(|_| TransportError::new(FailureKind::Internal, "engine stopped"))
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

fn report(
    seq: RequestSeq,
    result: Result<AssessmentResult, TransportError>,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    if let Err(err) = &result {
        checker_info!("Submission seq={} failed ({}): {}", seq, err.kind, err);
    }
    let _ = event_tx.send(EngineEvent::Completed { seq, result });
}

fn reject_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Submit { seq, .. }) = cmd_rx.recv() {
        let err = TransportError::new(
            FailureKind::Internal,
            format!("engine unavailable: {reason}"),
        );
        report(seq, Err(err), &event_tx);
    }
}
