use std::path::PathBuf;
use std::time::Duration;

use checker_engine::ClientSettings;
use checker_logging::{LogDestination, LogSettings, DEFAULT_LOG_FILE};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

const DEFAULT_BACKEND: &str = "http://localhost:8000";

/// Command-line surface of the symptom checker.
#[derive(Parser, Debug)]
#[command(
    name = "symptom-checker",
    version,
    about = "Describe symptoms and get an educational assessment from the symptom-check service"
)]
pub struct Cli {
    /// Origin of the assessment service; `/api/symptom-check` is appended.
    #[arg(long, env = "SYMPTOM_CHECKER_BACKEND", default_value = DEFAULT_BACKEND)]
    backend: String,
    /// Check these symptoms once and exit. Starts an interactive session when omitted.
    #[arg(long)]
    symptoms: Option<String>,
    #[arg(long, default_value = "")]
    age: String,
    #[arg(long, default_value = "")]
    sex: String,
    /// Abort a request after this many seconds. Unbounded by default.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
    /// Give up connecting after this many seconds. Unbounded by default.
    #[arg(long, value_name = "SECS")]
    connect_timeout: Option<u64>,
    /// Also print the unstructured model text when the service returns it.
    #[arg(long)]
    show_raw: bool,
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    OneShot { symptoms: String },
    Interactive,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub mode: RunMode,
    pub age: String,
    pub sex: String,
    pub show_raw: bool,
    pub log: LogSettings,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--symptoms must not be empty")]
    EmptySymptoms,
    #[error("--{0} must be at least 1 second")]
    ZeroTimeout(&'static str),
    #[error("--backend must not be empty")]
    EmptyBackend,
}

impl Cli {
    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        let mode = match self.symptoms {
            Some(symptoms) if symptoms.is_empty() => return Err(ConfigError::EmptySymptoms),
            Some(symptoms) => RunMode::OneShot { symptoms },
            None => RunMode::Interactive,
        };
        let request_timeout = seconds("timeout", self.timeout)?;
        let connect_timeout = seconds("connect-timeout", self.connect_timeout)?;
        let backend_origin = self.backend.trim().to_string();
        if backend_origin.is_empty() {
            return Err(ConfigError::EmptyBackend);
        }

        Ok(AppConfig {
            client: ClientSettings {
                backend_origin,
                connect_timeout,
                request_timeout,
            },
            mode,
            age: self.age,
            sex: self.sex,
            show_raw: self.show_raw,
            log: LogSettings {
                destination: self.log.into(),
                level: level_for(self.verbose),
                file_path: self.log_file,
            },
        })
    }
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}

fn seconds(flag: &'static str, value: Option<u64>) -> Result<Option<Duration>, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::ZeroTimeout(flag)),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<AppConfig, ConfigError> {
        let argv = std::iter::once("symptom-checker").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("cli parses").into_config()
    }

    #[test]
    fn defaults_to_interactive_local_backend() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.mode, RunMode::Interactive);
        assert_eq!(config.age, "");
        assert_eq!(config.sex, "");
        assert_eq!(config.client.request_timeout, None);
        assert_eq!(config.client.connect_timeout, None);
        assert!(!config.show_raw);
        assert_eq!(config.log.destination, LogDestination::File);
        assert_eq!(config.log.level, LevelFilter::Info);
    }

    #[test]
    fn symptoms_flag_selects_one_shot() {
        let config = parse(&[
            "--symptoms",
            "fever, cough",
            "--age",
            "34",
            "--sex",
            "male",
            "--backend",
            "http://127.0.0.1:9999",
            "--timeout",
            "20",
            "--connect-timeout",
            "3",
            "-vv",
        ])
        .unwrap();

        assert_eq!(
            config.mode,
            RunMode::OneShot {
                symptoms: "fever, cough".to_string()
            }
        );
        assert_eq!(config.age, "34");
        assert_eq!(config.sex, "male");
        assert_eq!(config.client.backend_origin, "http://127.0.0.1:9999");
        assert_eq!(config.client.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(config.client.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.log.level, LevelFilter::Trace);
    }

    #[test]
    fn empty_symptoms_flag_is_rejected() {
        assert_eq!(
            parse(&["--symptoms", ""]).unwrap_err(),
            ConfigError::EmptySymptoms
        );
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        assert_eq!(
            parse(&["--timeout", "0"]).unwrap_err(),
            ConfigError::ZeroTimeout("timeout")
        );
        assert_eq!(
            parse(&["--connect-timeout", "0"]).unwrap_err(),
            ConfigError::ZeroTimeout("connect-timeout")
        );
    }

    #[test]
    fn log_target_maps_to_destination() {
        let config = parse(&["--log", "off"]).unwrap();
        assert_eq!(config.log.destination, LogDestination::Off);
    }
}
