use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use pdfdesk_core::{update, AppState, Msg};
use pdfdesk_engine::ensure_output_dir;
use pdfdesk_logging::{desk_info, desk_warn};

use super::commands::{parse_line, Command, HELP};
use super::config::{AppConfig, CONFIG_FILENAME, SERVICE_URL_ENV};
use super::effects::EffectRunner;
use super::logging;
use super::render::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Input(Command),
    InvalidInput(String),
    InputClosed,
    Engine(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load(Path::new(CONFIG_FILENAME)) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let config = config.with_service_url_override(env::var(SERVICE_URL_ENV).ok());

    logging::initialize(config.log_destination);
    if let Some(err) = config_error {
        desk_warn!("{:#}; using default configuration", err);
    }
    desk_info!(
        "Service {} output dir {:?}",
        config.service_url,
        config.output_dir
    );

    ensure_output_dir(&config.output_dir)
        .with_context(|| format!("cannot use output dir {}", config.output_dir.display()))?;

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.engine_config(), app_tx.clone())
        .context("failed to start engine")?;
    spawn_stdin_reader(app_tx);

    let mut state = AppState::new();
    print_view(&state);
    println!("Type `help` for commands.");

    let mut input_closed = false;
    while !(input_closed && !state.is_busy()) {
        let Ok(event) = app_rx.recv() else {
            break;
        };
        match event {
            AppEvent::Input(Command::Dispatch(msg)) | AppEvent::Engine(msg) => {
                state = dispatch_msg(state, msg, &runner);
            }
            AppEvent::Input(Command::Help) => println!("{HELP}"),
            AppEvent::Input(Command::Quit) => break,
            AppEvent::Input(Command::Empty) => {}
            AppEvent::InvalidInput(reason) => eprintln!("error: {reason}"),
            AppEvent::InputClosed => {
                desk_info!("Input closed; waiting for outstanding work");
                input_closed = true;
            }
        }
    }

    desk_info!("Exiting");
    Ok(())
}

fn dispatch_msg(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let is_tick = matches!(msg, Msg::ProgressTick { .. });
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);

    if state.consume_dirty() {
        if is_tick {
            print_progress(&state);
        } else {
            print_view(&state);
        }
    }
    state
}

fn print_view(state: &AppState) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", render(&state.view()));
    let _ = stdout.flush();
}

// Ticks redraw only the bar.
fn print_progress(state: &AppState) {
    let view = state.view();
    if view.progress_visible {
        println!("progress {}%", view.progress.fill);
    }
}

fn spawn_stdin_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let event = match line {
                Ok(line) => match parse_line(&line) {
                    Ok(command) => AppEvent::Input(command),
                    Err(err) => AppEvent::InvalidInput(format!("{err:#}")),
                },
                Err(err) => {
                    desk_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            if app_tx.send(event).is_err() {
                return;
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}
