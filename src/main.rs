use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_forge::config::AppConfig;
use league_forge::import::{import_bundle, ImportBundle};
use league_forge::models::{ClubId, EntityId, League, Season, StandingRow};
use league_forge::season::{self, SeasonDraft};
use league_forge::simulate::SeasonSimulator;
use league_forge::storage::{EntityStore, StorageConfig};

#[derive(Parser)]
#[command(name = "league-forge")]
#[command(about = "Fictional football universe backend with a season generator")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Simulate a season for a league and print the table
    Simulate {
        /// League ID
        #[arg(long)]
        league: String,

        /// Season year
        #[arg(long)]
        year: i32,

        /// Seed for a reproducible table
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated club IDs (default: the league's clubs)
        #[arg(long, value_delimiter = ',')]
        clubs: Option<Vec<String>>,

        /// Save the generated season
        #[arg(long)]
        save: bool,
    },

    /// Import nations, leagues and clubs from a JSON bundle
    Import {
        /// Path to the bundle
        path: PathBuf,
    },

    /// Print a saved league table
    Table {
        /// League ID
        #[arg(long)]
        league: String,

        /// Season year
        #[arg(long)]
        year: i32,
    },

    /// Write the default configuration file
    InitConfig {
        /// Where to write (default: the --config path)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting league-forge v{}", env!("CARGO_PKG_VERSION"));

    let store = EntityStore::new(StorageConfig::new(config.data_dir.clone()));
    let simulator = SeasonSimulator::new(config.simulation.min_clubs);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state =
                league_forge::api::state::AppState::new(store, simulator, config.simulation.seed);
            let app = league_forge::api::build_router_with_cors(state, &config.server.cors_origin);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Simulate {
            league,
            year,
            seed,
            clubs,
            save,
        } => {
            let league_id = EntityId::from(league);
            let club_ids: Option<Vec<ClubId>> =
                clubs.map(|ids| ids.into_iter().map(EntityId::from).collect());

            let inputs = season::load_inputs(&store, &league_id, year, club_ids.as_deref())?;
            let draft = season::generate(&simulator, &inputs, seed.or(config.simulation.seed))?;

            print_draft(&inputs.league, &draft);

            if save {
                let report = season::save_draft(&store, &simulator, &draft)?;
                println!(
                    "\nSaved season {} ({} of {} rows)",
                    report.season.id,
                    report.rows_written,
                    draft.standings.len()
                );
                if !report.is_complete() {
                    println!("\nFailed rows:");
                    for failure in &report.failures {
                        println!("  - {}", failure);
                    }
                    bail!("{} table rows were not saved", report.failures.len());
                }
            } else {
                println!(
                    "\n(not saved - rerun with --save --seed {} to keep this table)",
                    draft.seed
                );
            }
        }
        Commands::Import { path } => {
            let bundle = ImportBundle::from_file(&path)
                .with_context(|| format!("Failed to read bundle {:?}", path))?;
            let summary = import_bundle(&store, &bundle)?;

            println!("=== Import Results ===");
            println!("Nations:  {}", summary.nations);
            println!("Leagues:  {}", summary.leagues);
            println!("Clubs:    {}", summary.clubs);
        }
        Commands::Table { league, year } => {
            let league_id = EntityId::from(league);
            let league: League = store.require(&league_id)?;
            let season_id = Season::id_for(&league_id, year);

            let Some(season) = store.get::<Season>(&season_id)? else {
                bail!("No saved {} season for {}", year, league.name);
            };
            let rows: Vec<StandingRow> = store
                .table_for_season(&season.id)?
                .into_iter()
                .map(|entry| entry.row)
                .collect();

            println!("=== {} {} ===\n", league.name, year);
            print_table(&rows);
        }
        Commands::InitConfig { path, force } => {
            let path = path.unwrap_or(cli.config);
            write_default_config(&path, force)?;
            println!("Wrote default configuration to {:?}", path);
        }
    }

    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{:?} already exists (use --force to overwrite)", path);
    }
    AppConfig::default().write_to(path)?;
    Ok(())
}

fn print_draft(league: &League, draft: &SeasonDraft) {
    println!(
        "=== {} {} (tier {}, seed {}) ===\n",
        league.name, draft.year, league.tier, draft.seed
    );
    print_table(&draft.standings);
    println!("\nFixtures played: {}", draft.fixture_count);
}

fn print_table(rows: &[StandingRow]) {
    println!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}  {}",
        "#", "Club", "P", "W", "D", "L", "GF", "GA", "GD", "Pts", "Status"
    );
    for row in rows {
        println!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}  {}",
            row.position,
            row.club_name,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_difference,
            row.points,
            row.status
        );
    }
}
