//! CLI Adapter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;

use crate::app::api;
use crate::domain::character::ServerIdInput;
use crate::domain::{
    AppConfig, AppError, CharacterRecord, ConversationTurn, Faction, SearchRequest, load_history,
};

#[derive(Parser)]
#[command(name = "aion2-guide")]
#[command(version)]
#[command(
    about = "Look up Aion 2 characters and request combat-power analysis",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./aion2-guide.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a character through the provider chain and print it as JSON
    #[clap(visible_alias = "s")]
    Search {
        /// Character name
        name: String,
        /// Server name or numeric server id
        #[arg(long)]
        server: Option<String>,
        /// Faction filter (elyos or asmodian)
        #[arg(long)]
        faction: Option<Faction>,
    },
    /// Fetch a character by its upstream identifiers
    Detail {
        /// Upstream character id
        character_id: String,
        /// Numeric server id
        server_id: String,
    },
    /// List game servers
    Servers,
    /// Request a combat-power analysis
    #[clap(visible_alias = "a")]
    Analyze {
        /// Character record JSON, as printed by `search`
        #[arg(long, conflicts_with_all = ["name", "server"])]
        record: Option<PathBuf>,
        /// Character name to resolve first
        #[arg(required_unless_present = "record")]
        name: Option<String>,
        /// Server name or numeric server id
        #[arg(long)]
        server: Option<String>,
    },
    /// Ask a follow-up question about a character
    Ask {
        /// Character record JSON, as printed by `search`
        #[arg(long)]
        record: PathBuf,
        /// The question
        #[arg(short, long)]
        question: String,
        /// Prior conversation as a JSON array of {role, content}
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = api::load_config(cli.config.as_deref())
        .and_then(|config| run_command(cli.command, &config));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `--verbose` wins over `RUST_LOG`; without either only warnings are shown.
fn setup_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(LevelFilter::Warn);
    }

    builder.target(env_logger::Target::Stderr).init();
}

fn run_command(command: Commands, config: &AppConfig) -> Result<(), AppError> {
    match command {
        Commands::Search { name, server, faction } => {
            let request = SearchRequest::Keyword {
                keyword: name,
                faction,
                server_id: server.map(ServerIdInput::Text),
            };
            print_json(&api::search(config, request)?)
        }
        Commands::Detail { character_id, server_id } => {
            print_json(&api::fetch_detail(config, &character_id, &server_id)?)
        }
        Commands::Servers => run_servers(config),
        Commands::Analyze { record, name, server } => {
            let record = match (record, name) {
                (Some(path), _) => read_record(&path)?,
                (None, Some(name)) => api::search(config, SearchRequest::Name { name, server })?,
                (None, None) => {
                    return Err(AppError::validation("Provide --record or a character name"));
                }
            };
            println!("{}", api::analyze(config, &record)?);
            Ok(())
        }
        Commands::Ask { record, question, history } => {
            let record = read_record(&record)?;
            let history: Vec<ConversationTurn> = match history {
                Some(path) => load_history(&path)?,
                None => Vec::new(),
            };
            println!("{}", api::answer_question(config, &record, &question, &history)?);
            Ok(())
        }
    }
}

fn run_servers(config: &AppConfig) -> Result<(), AppError> {
    let listing = api::list_servers(config);
    if let Some(error) = &listing.error {
        eprintln!("Server list unavailable: {}", error);
    }
    print_json(&listing)
}

fn read_record(path: &Path) -> Result<CharacterRecord, AppError> {
    let content = std::fs::read_to_string(path)?;
    CharacterRecord::from_json(&content)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::ParseError {
        what: "output".into(),
        details: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}
