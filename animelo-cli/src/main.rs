mod config;
mod import;
mod logging;
mod output;
mod store;
mod tui;

use animelo_core::{OrderPolicy, RatingStore, DEFAULT_ELIGIBLE_STATUS};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::import::DuplicatePolicy;
use crate::store::SqliteStore;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

const DEFAULT_DATABASE: &str = "animes.db";

#[derive(Parser)]
#[command(name = "animelo", version, about = "Rank your anime list by picking the better of two, over and over")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rating database (default: animes.db in the working directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Only items with this list status are compared (default: "Completed")
    #[arg(long, global = true)]
    eligible_status: Option<String>,

    /// Path to config file (default: ~/.config/animelo/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Import a catalog into the rating database
    Import {
        #[command(subcommand)]
        source: ImportSource,
    },
    /// Compare titles two at a time and update their ratings
    #[command(alias = "elo")]
    Rate,
    /// Print titles ordered by rating
    Standings(StandingsArgs),
    /// Create a default config file at ~/.config/animelo/config.toml
    Init,
}

#[derive(clap::Subcommand)]
enum ImportSource {
    /// MyAnimeList XML export (.xml.gz or .xml)
    Mal(MalArgs),
}

#[derive(Parser)]
struct MalArgs {
    /// Path to the export file
    file: PathBuf,

    /// Fail on the first title that is already in the database instead of skipping it
    #[arg(long)]
    strict: bool,
}

#[derive(Parser)]
struct StandingsArgs {
    /// Show at most this many titles
    #[arg(long)]
    limit: Option<usize>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

/// Settings after merging CLI args over the config file over built-in defaults.
struct Settings {
    database: PathBuf,
    eligible_status: String,
}

impl Settings {
    /// Load the config file, merge it with CLI args (CLI wins), and start logging.
    fn load(cli: &Cli, config_path: &Path, interactive: bool) -> Self {
        let cfg = config::load_config(config_path);

        let log_file = cli.log_file.clone().or(cfg.log_file);
        logging::init(cli.verbose, log_file.as_deref(), interactive);

        let settings = Settings {
            database: cli
                .db
                .clone()
                .or(cfg.database)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            eligible_status: cli
                .eligible_status
                .clone()
                .or(cfg.eligible_status)
                .unwrap_or_else(|| DEFAULT_ELIGIBLE_STATUS.to_string()),
        };
        tracing::debug!(
            database = %settings.database.display(),
            eligible_status = %settings.eligible_status,
            config = %config_path.display(),
            "settings resolved"
        );
        settings
    }
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(config::config_path);

    match &cli.command {
        Commands::Init => run_init(&config_path),
        Commands::Import { source: ImportSource::Mal(args) } => {
            run_import(&Settings::load(&cli, &config_path, false), args)
        }
        Commands::Rate => run_rate(&Settings::load(&cli, &config_path, true)),
        Commands::Standings(args) => {
            run_standings(&Settings::load(&cli, &config_path, false), args)
        }
    }
}

fn run_init(config_path: &Path) {
    config::create_default_config(config_path);
    println!("Created config at {}", config_path.display());
    println!("Edit it to set your database path and eligible status.");
}

fn run_import(settings: &Settings, args: &MalArgs) {
    println!("Reading {}...", args.file.display());
    let items = import::read_catalog(&args.file)
        .unwrap_or_else(|e| bail(format!("Failed to import {}: {e:#}", args.file.display())));

    let mut store = SqliteStore::open_or_create(&settings.database, &settings.eligible_status)
        .unwrap_or_else(|e| bail(e));

    println!("Inserting {} titles into {}...", items.len(), settings.database.display());
    let policy = if args.strict { DuplicatePolicy::Reject } else { DuplicatePolicy::Skip };
    let summary = import::import_items(&mut store, items, policy)
        .unwrap_or_else(|e| bail(format!("Failed to insert titles: {e}")));

    output::print_import_summary(&summary);
    match store.counts() {
        Ok((total, eligible)) => {
            println!("Database now holds {total} titles ({eligible} eligible for rating)")
        }
        Err(e) => bail(e),
    }
}

fn run_rate(settings: &Settings) {
    let store = SqliteStore::open_existing(&settings.database, &settings.eligible_status)
        .unwrap_or_else(|e| bail(e));

    match tui::run(store) {
        Ok(decisions) => println!("Recorded {decisions} decisions."),
        Err(e) => bail(format!("{e:#}")),
    }
}

fn run_standings(settings: &Settings, args: &StandingsArgs) {
    let mut store = SqliteStore::open_existing(&settings.database, &settings.eligible_status)
        .unwrap_or_else(|e| bail(e));

    let limit = args.limit.unwrap_or(usize::MAX);
    let items = store
        .sample_eligible(limit, OrderPolicy::HighestRatedFirst)
        .unwrap_or_else(|e| bail(e));

    let total_decisions = store.total_decisions().unwrap_or_else(|e| bail(e));

    if args.json {
        output::print_json(&items, total_decisions);
    } else {
        output::print_table(&items, total_decisions);
    }
}
