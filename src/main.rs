use crossterm::event;
use projtree::app::Workbench;
use projtree::kernel::services::adapters::{resolve_settings, AsyncRuntime, HttpProjectApi};
use projtree::models::ProjectId;
use projtree::tui::terminal_guard::{TerminalGuard, TerminationSignal};
use projtree::tui::view::View;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

mod logging;

const USAGE: &str = "usage: projtree [PROJECT_ID] | projtree --new <NAME> <LANGUAGE>";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Startup {
    Open(ProjectId),
    Create { name: String, language: String },
    Idle,
}

fn resolve_startup(args: &[String], default_project: Option<&str>) -> Result<Startup, String> {
    match args {
        [] => Ok(default_project
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Startup::Open(ProjectId::from(id)))
            .unwrap_or(Startup::Idle)),
        [flag, name, language] if flag == "--new" => Ok(Startup::Create {
            name: name.clone(),
            language: language.clone(),
        }),
        [flag, ..] if flag.starts_with('-') => Err(USAGE.to_string()),
        [id] => Ok(Startup::Open(ProjectId::from(id.as_str()))),
        _ => Err(USAGE.to_string()),
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut logging_guard = logging::init();
    let log_rx = logging_guard.as_mut().and_then(|g| g.take_log_rx());

    let settings = resolve_settings();
    let startup = match resolve_startup(&args, settings.default_project.as_deref()) {
        Ok(startup) => startup,
        Err(usage) => {
            eprintln!("{usage}");
            std::process::exit(2);
        }
    };
    tracing::info!(base_url = %settings.api_base_url, ?startup, "starting");

    let api = HttpProjectApi::from_settings(&settings).map_err(io::Error::other)?;
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(Arc::new(api), tx)?;
    let mut workbench = Workbench::new(runtime, rx, log_rx);
    match startup {
        Startup::Open(project) => {
            workbench.open_project(project);
        }
        Startup::Create { name, language } => {
            workbench.create_project(name, language);
        }
        Startup::Idle => tracing::info!("no project given; pass a PROJECT_ID or set default_project"),
    }

    let result = run(&mut workbench);
    if let Err(err) = &result {
        tracing::error!(error = %err, "event loop failed");
        if let Some(guard) = &logging_guard {
            eprintln!("projtree: {err} (logs: {})", guard.log_dir().display());
        }
    }
    match result {
        Ok(Some(code)) => std::process::exit(code),
        Ok(None) => Ok(()),
        Err(err) => Err(err),
    }
}

/// Runs until quit; returns the exit code when stopped by a signal.
fn run(workbench: &mut Workbench) -> io::Result<Option<i32>> {
    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel::<TerminationSignal>();
    #[cfg(unix)]
    projtree::tui::terminal_guard::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut dirty = true;

    loop {
        if let Ok(signal) = signal_rx.try_recv() {
            return Ok(Some(signal.exit_code()));
        }

        dirty |= workbench.tick();
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
                if let Some(position) = workbench.cursor_position() {
                    frame.set_cursor_position(position);
                }
            })?;
            dirty = false;
        }

        if event::poll(POLL_INTERVAL)? {
            let ev = event::read()?;
            let result = workbench.handle_input(&ev);
            if result.is_quit() {
                break;
            }
            dirty = true;
        }
    }

    drop(terminal);
    drop(guard);
    Ok(None)
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup.rs"]
mod cli_startup_tests;
