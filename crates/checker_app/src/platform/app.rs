use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use checker_core::{update, AppState, Msg, Phase, PhaseKind};
use checker_logging::{checker_info, checker_warn};

use super::config::{AppConfig, RunMode};
use super::effects::EffectRunner;
use super::input::{parse_line, HELP_TEXT};
use super::ui::constants::{HINT_ALREADY_PENDING, HINT_SYMPTOMS_REQUIRED, TITLE};
use super::ui::render::{render, render_form, RenderOptions};

/// Everything the main loop reacts to. Only the main loop touches `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Core(Msg),
    Show,
    Help,
    InputRejected(String),
    InputClosed,
    Quit,
}

/// How a one-shot check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Assessed,
    Failed,
    NothingToSubmit,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Assessed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
            Outcome::NothingToSubmit => ExitCode::from(2),
        }
    }
}

pub fn run_app(config: AppConfig) -> anyhow::Result<ExitCode> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&config.client, event_tx.clone())
        .context("failed to start the symptom-check engine")?;
    checker_info!("Symptom checker started in {:?} mode", config.mode);

    let mut session = Session::new(
        runner,
        RenderOptions {
            show_raw: config.show_raw,
        },
        io::stdout(),
    );
    session.dispatch(Msg::AgeChanged(config.age));
    session.dispatch(Msg::SexChanged(config.sex));

    match config.mode {
        RunMode::OneShot { symptoms } => {
            // The engine bridge is now the only sender; if it dies the wait ends.
            drop(event_tx);
            Ok(session.run_one_shot(symptoms, &event_rx)?.into())
        }
        RunMode::Interactive => {
            spawn_input_reader(event_tx);
            session.run_interactive(&event_rx)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    options: RenderOptions,
    out: W,
}

impl<W: Write> Session<W> {
    fn new(runner: EffectRunner, options: RenderOptions, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            options,
            out,
        }
    }

    /// Applies `msg`, hands effects to the engine, and reports whether state changed.
    ///
    /// Submissions the engine refuses are fed back as failures right away.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let mut queue = vec![msg];
        let mut changed = false;
        while let Some(msg) = queue.pop() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.enqueue(effects));
            changed |= self.state.consume_dirty();
        }
        changed
    }

    fn run_one_shot(
        &mut self,
        symptoms: String,
        events: &mpsc::Receiver<AppEvent>,
    ) -> anyhow::Result<Outcome> {
        self.dispatch(Msg::SymptomsChanged(symptoms));
        if !self.state.can_submit() {
            writeln!(self.out, "{HINT_SYMPTOMS_REQUIRED}")?;
            return Ok(Outcome::NothingToSubmit);
        }
        self.dispatch(Msg::SubmitClicked);

        while let Ok(event) = events.recv() {
            if let AppEvent::Core(msg) = event {
                self.dispatch(msg);
            }
            let outcome = match self.state.phase() {
                Phase::Success(_) => Outcome::Assessed,
                Phase::Failed(_) => Outcome::Failed,
                Phase::Idle | Phase::Pending => continue,
            };
            self.write_view()?;
            return Ok(outcome);
        }
        anyhow::bail!("engine stopped before the symptom check settled")
    }

    fn run_interactive(&mut self, events: &mpsc::Receiver<AppEvent>) -> anyhow::Result<()> {
        writeln!(self.out, "{TITLE}")?;
        writeln!(self.out, "{HELP_TEXT}")?;

        let mut last_phase = self.state.view().phase;
        let mut input_closed = false;

        while let Ok(event) = events.recv() {
            match event {
                AppEvent::Core(Msg::SubmitClicked) if !self.state.can_submit() => {
                    let hint = if self.state.phase() == &Phase::Pending {
                        HINT_ALREADY_PENDING
                    } else {
                        HINT_SYMPTOMS_REQUIRED
                    };
                    writeln!(self.out, "{hint}")?;
                }
                AppEvent::Core(msg) => {
                    if self.dispatch(msg) {
                        let view = self.state.view();
                        let lines = if view.phase != last_phase {
                            render(&view, self.options)
                        } else {
                            render_form(&view)
                        };
                        write_lines(&mut self.out, &lines)?;
                        last_phase = view.phase;
                    }
                }
                AppEvent::Show => self.write_view()?,
                AppEvent::Help => writeln!(self.out, "{HELP_TEXT}")?,
                AppEvent::InputRejected(reason) => eprintln!("{reason}"),
                AppEvent::InputClosed => input_closed = true,
                AppEvent::Quit => break,
            }

            // Piped input may end while a check is still running; wait for it.
            if input_closed && last_phase != PhaseKind::Pending {
                break;
            }
        }

        checker_info!("Interactive session ended");
        Ok(())
    }

    fn write_view(&mut self) -> io::Result<()> {
        let lines = render(&self.state.view(), self.options);
        write_lines(&mut self.out, &lines)
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => match parse_line(&line) {
                    Ok(Some(event)) => event,
                    Ok(None) => continue,
                    Err(err) => AppEvent::InputRejected(err.to_string()),
                },
                Err(err) => {
                    checker_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
