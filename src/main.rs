use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{error, info, warn};

use atlas_dataviz::input::events::load_events;
use atlas_dataviz::input::{Atlas, InputError, load_atlas};
use atlas_dataviz::logging::init_logging;
use atlas_dataviz::report::build_totals_report;
use atlas_dataviz::report::json::{render_projection_json, render_totals_json};
use atlas_dataviz::report::text::{render_projection_text, render_totals_text};
use atlas_dataviz::route::cell_from_route;
use atlas_dataviz::session::{self, SessionError};
use atlas_dataviz::viewer::{EngineError, Viewer};

#[derive(Debug, Parser)]
#[command(
    name = "atlas-dataviz",
    version,
    about = "Derive Venn and gene-table views from a multi-site expression atlas."
)]
struct Cli {
    /// Atlas JSON file, optionally gzip-compressed.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Site catalog JSON overriding the one embedded in the dataset.
    #[arg(long, global = true)]
    sites: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List cell types in the dataset.
    Cells,
    /// Per-site totals and the default sort order of one cell type.
    Totals {
        #[arg(long)]
        cell: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Replay interactions against a view and emit the final projection.
    Project(ProjectArgs),
}

#[derive(Debug, Args)]
struct ProjectArgs {
    #[arg(long)]
    cell: Option<String>,
    /// Navigation route such as `/data/Podocyte%20cell`.
    #[arg(long)]
    route: Option<String>,
    /// JSON array of recorded events.
    #[arg(long)]
    events: Option<PathBuf>,
    /// Session file restored before and saved after the replay.
    #[arg(long)]
    session: Option<PathBuf>,
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("missing --dataset")]
    MissingDataset,
    #[error("no cell type given (use --cell, --route or a saved --session)")]
    MissingCell,
    #[error("invalid route {0:?} (expected /data/<cell>)")]
    InvalidRoute(String),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
struct ProjectConfig {
    cell: Option<String>,
    route_cell: Option<String>,
    events: Option<PathBuf>,
    session: Option<PathBuf>,
    out: Option<PathBuf>,
    format: OutputFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let dataset = cli.dataset.as_deref().ok_or(AppError::MissingDataset)?;
    let atlas = load_atlas(dataset, cli.sites.as_deref())?;

    match cli.command {
        Command::Cells => {
            let mut out = String::new();
            for name in atlas.dataset.cell_names() {
                if let Some(cell) = atlas.dataset.cell(name) {
                    out.push_str(&format!(
                        "{}\t{}\t{}\n",
                        name,
                        cell.rows.len(),
                        cell.sets.len()
                    ));
                }
            }
            write_output(None, &out)
        }
        Command::Totals { cell, format } => {
            let viewer = Viewer::mount(&atlas.dataset, &atlas.catalog, &cell);
            viewer.check_scope()?;
            let report =
                build_totals_report(&cell, viewer.totals(), viewer.sort(), &atlas.catalog);
            let text = match format {
                OutputFormat::Json => render_totals_json(&report)?,
                OutputFormat::Text => render_totals_text(&report),
            };
            write_output(None, &text)
        }
        Command::Project(args) => {
            let config = resolve_project_config(args)?;
            run_project(&atlas, &config)
        }
    }
}

fn resolve_project_config(args: ProjectArgs) -> Result<ProjectConfig, AppError> {
    let route_cell = match &args.route {
        Some(route) => {
            Some(cell_from_route(route).ok_or_else(|| AppError::InvalidRoute(route.clone()))?)
        }
        None => None,
    };
    Ok(ProjectConfig {
        cell: args.cell,
        route_cell,
        events: args.events,
        session: args.session,
        out: args.out,
        format: args.format,
    })
}

fn run_project(atlas: &Atlas, config: &ProjectConfig) -> Result<(), AppError> {
    let snapshot = config
        .session
        .as_deref()
        .and_then(|path| session::load(path, &atlas.catalog));

    let start_cell = config
        .cell
        .clone()
        .or_else(|| snapshot.as_ref().map(|s| s.cell.clone()))
        .or_else(|| config.route_cell.clone())
        .ok_or(AppError::MissingCell)?;

    let mut viewer = Viewer::mount(&atlas.dataset, &atlas.catalog, &start_cell);
    if let Some(snapshot) = &snapshot {
        if viewer.restore(snapshot) {
            info!(cell = %snapshot.cell, "restored saved selection");
        }
    }
    if let Some(route_cell) = &config.route_cell {
        if let Err(err) = viewer.sync_route(route_cell) {
            warn!("{err}");
        }
    }

    if let Some(events_path) = &config.events {
        let events = load_events(events_path)?;
        info!(count = events.len(), "replaying events");
        for event in &events {
            if let Err(err) = viewer.apply_script(event) {
                warn!("{err}");
            }
        }
    }

    let projection = viewer.projection();
    let text = match config.format {
        OutputFormat::Json => render_projection_json(&projection)?,
        OutputFormat::Text => render_projection_text(&projection, &atlas.catalog),
    };
    write_output(config.out.as_deref(), &text)?;

    if let Some(path) = &config.session {
        if let Err(err) = session::save(path, &viewer.snapshot()) {
            warn!(path = %path.display(), "cannot save session: {err}");
        }
    }

    viewer.check_scope()?;
    Ok(())
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), AppError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, text)?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
