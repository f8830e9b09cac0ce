//! Symptom checker engine: transport client and effect execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, ReqwestSymptomClient, SymptomClient, SYMPTOM_CHECK_PATH};
pub use engine::EngineHandle;
pub use types::{EngineEvent, FailureKind, TransportError};
