mod commands;
mod events_file;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use calview_core::config::CalendarConfig;
use calview_core::event::{ResizeEdge, ViewKind};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calview")]
#[command(about = "Render month, week and day calendar views and preview drag-and-drop moves")]
struct Cli {
    /// Use this config file instead of ~/.config/calview/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a view of the events in a file
    Show {
        /// month, week or day (defaults to the configured mode)
        #[arg(long)]
        view: Option<ViewKind>,

        /// Date the view is anchored on (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// JSON file holding an array of events
        #[arg(short, long)]
        events: PathBuf,
    },
    /// Drop an event on a cell and print the proposed event as JSON
    Move {
        #[arg(short, long)]
        events: PathBuf,

        /// Id of the event being dragged
        #[arg(long)]
        id: String,

        /// Date of the cell it is dropped on (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Hour slot of the cell (HH:MM). Omit for a month cell or full-day lane
        #[arg(long)]
        time: Option<String>,

        /// View the drag started in
        #[arg(long, default_value = "month")]
        from: ViewKind,

        /// View the drop lands in (defaults to --from)
        #[arg(long)]
        to: Option<ViewKind>,

        /// Drag a resize handle instead of the event body
        #[arg(long)]
        resize: Option<ResizeEdge>,
    },
    /// Report events that can't be shown or have an invalid time range
    Check {
        #[arg(short, long)]
        events: PathBuf,
    },
    /// Print the config path and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Show { view, date, events } => {
            let config = load_config(cli.config.as_ref())?;
            commands::show::run(config, view, date, &events)
        }
        Commands::Move {
            events,
            id,
            date,
            time,
            from,
            to,
            resize,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let args = commands::move_event::MoveArgs {
                id,
                date,
                time,
                from,
                to: to.unwrap_or(from),
                resize,
            };
            commands::move_event::run(config, &events, args)
        }
        Commands::Check { events } => commands::check::run(&events),
        Commands::Config => commands::config::run(cli.config.as_deref()),
    }
}

/// `RUST_LOG` wins over `--verbose`; without either only warnings are shown.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<CalendarConfig> {
    let config = match path {
        Some(path) => CalendarConfig::load_from(path)?,
        None => CalendarConfig::load()?,
    };
    Ok(config)
}
