use clap::Parser;
use log::{error, info, warn};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::actions::{Action, Outcome};
use crate::analysis::{FormattedReport, Report};
use crate::command::Command;
use crate::graph_view::GraphView;
use crate::settings::{Settings, SettingsError};
use crate::state::State;
use crate::store::Store;

/// Edit an undirected graph line by line and watch its spectrum
#[derive(Parser, Debug, Default)]
#[command(name = "graph-editor")]
#[command(about = "Interactive graph editor with spectral analysis", long_about = None)]
pub struct Args {
    /// Command script to run (stdin when omitted)
    pub script: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prefix for generated vertex names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Decimals shown for eigenvalues
    #[arg(long)]
    pub precision: Option<usize>,

    /// Print exponents as `x^2` instead of superscripts
    #[arg(long)]
    pub plain: bool,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Only print on `p` and `l`
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct JsonReport<'a> {
    graph: &'a GraphView,
    report: &'a Report,
    formatted: FormattedReport,
}

/// Entry point used by the `graph-editor` executable.
pub fn run() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<(), CliError> {
    let settings = load_settings(args)?;
    info!("settings: {:?}", settings);
    let mut state = State::new(Store::new(settings));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.script {
        Some(path) => {
            let input = BufReader::new(File::open(path)?);
            run_session(&mut state, input, &mut out, args)
        }
        None => run_session(&mut state, io::stdin().lock(), &mut out, args),
    }
}

/// Settings file first, then command-line overrides.
pub fn load_settings(args: &Args) -> Result<Settings, SettingsError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };
    if let Some(prefix) = &args.prefix {
        settings.vertex_prefix = prefix.clone();
    }
    if let Some(precision) = args.precision {
        settings.display.precision = precision;
    }
    if args.plain {
        settings.display.superscript_exponents = false;
    }
    Ok(settings.clamped())
}

/// Read commands until `q` or end of input. Bad lines and rejected edits
/// print an error and leave the graph as it was.
pub fn run_session<R: BufRead, W: Write>(
    state: &mut State,
    input: R,
    out: &mut W,
    args: &Args,
) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("bad command {:?}: {}", line, e);
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };
        match command {
            Command::Edit(action) => {
                state.dispatch(Action::ClearErrorMessage);
                state.dispatch(action);
                for result in state.flush_actions() {
                    match result {
                        Ok(Outcome::Nothing) => {}
                        Ok(outcome) => {
                            if !args.quiet {
                                writeln!(out, "{}", outcome)?;
                                print_report(state, out, args.json)?;
                            }
                        }
                        Err(e) => writeln!(out, "error: {}", e)?,
                    }
                }
            }
            Command::Print => print_report(state, out, args.json)?,
            Command::List => print_graph(&state.store.graph_view(), out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}

fn print_report<W: Write>(
    state: &mut State,
    out: &mut W,
    json: bool,
) -> Result<(), CliError> {
    let view = state.store.graph_view();
    let display = state.store.settings.get().display;
    match state.report() {
        Ok(report) => {
            let formatted = report.format(&display);
            if json {
                let doc = JsonReport {
                    graph: &view,
                    report,
                    formatted,
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
            } else {
                writeln!(out, "{}", formatted)?;
            }
        }
        Err(e) => writeln!(out, "analysis unavailable: {}", e)?,
    }
    Ok(())
}

fn print_graph<W: Write>(view: &GraphView, out: &mut W) -> io::Result<()> {
    writeln!(out, "vertices: {}", view.vertices.join(" "))?;
    let edges: Vec<String> = view
        .edges
        .iter()
        .map(|(a, b)| format!("{}-{}", a, b))
        .collect();
    writeln!(out, "edges: {}", edges.join(" "))
}
