//! Bookloader CLI - load author and work dumps, then query or serve them

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use bookloader::config::{self, LoaderConfig};
use bookloader::loader::StageOutcome;
use bookloader::storage::SqliteStore;
use bookloader::ui::{self, Icons, Spinner};
use bookloader::{Loader, LoadReport, Stage};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bookloader")]
#[command(version)]
#[command(about = "Load Open Library style author and work dumps into SQLite")]
#[command(long_about = r#"
Bookloader reads an author dump and a work dump, one JSON record per line
behind a tab-separated prefix, and stores authors and books in SQLite.
Works get the names of their authors resolved at load time.

Example usage:
  bookloader load --authors ol_dump_authors.txt --works ol_dump_works.txt
  bookloader book OL45883W
  bookloader run --port 8080
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true, default_value = "bookloader.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DatabaseArgs {
    /// Path to the database file
    #[arg(short, long, env = "BOOKLOADER_DATABASE")]
    database: Option<PathBuf>,
}

#[derive(Args)]
struct DumpArgs {
    /// Path to the author dump
    #[arg(short, long, env = "BOOKLOADER_AUTHOR_DUMP")]
    authors: Option<PathBuf>,

    /// Path to the work dump
    #[arg(short, long, env = "BOOKLOADER_WORK_DUMP")]
    works: Option<PathBuf>,

    /// Delete existing authors and books before loading
    #[arg(long)]
    fresh: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load both dumps and exit
    Load {
        #[command(flatten)]
        db: DatabaseArgs,

        #[command(flatten)]
        dumps: DumpArgs,
    },

    /// Load both dumps, then serve the data over HTTP
    Run {
        #[command(flatten)]
        db: DatabaseArgs,

        #[command(flatten)]
        dumps: DumpArgs,

        /// Port to listen on
        #[arg(short, long, env = "BOOKLOADER_PORT")]
        port: Option<u16>,
    },

    /// Serve an already loaded database over HTTP
    Serve {
        #[command(flatten)]
        db: DatabaseArgs,

        /// Port to listen on
        #[arg(short, long, env = "BOOKLOADER_PORT")]
        port: Option<u16>,
    },

    /// Show record counts
    Stats {
        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// Look up an author by id
    Author {
        /// Author id, e.g. OL23919A
        id: String,

        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// Look up a book by work id
    Book {
        /// Work id, e.g. OL45883W
        id: String,

        #[command(flatten)]
        db: DatabaseArgs,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(Some(&cli.config))?.unwrap_or_default();

    match cli.command {
        Commands::Load { db, dumps } => {
            let store = open_store(&config, db)?;
            let report = load(&store, &config, dumps)?;
            let failed: Vec<Stage> = [&report.authors, &report.works]
                .into_iter()
                .filter(|outcome| outcome.is_failed())
                .map(|outcome| outcome.stage())
                .collect();
            if !failed.is_empty() {
                anyhow::bail!("dump stages failed: {:?}", failed);
            }
        }

        Commands::Run { db, dumps, port } => {
            let store = open_store(&config, db)?;
            load(&store, &config, dumps)?;
            serve(store, config.port(port))?;
        }

        Commands::Serve { db, port } => {
            let store = open_store(&config, db)?;
            serve(store, config.port(port))?;
        }

        Commands::Stats { db } => {
            let database = config.database_path(db.database);
            let store = SqliteStore::open(&database)?;
            let stats = store.stats()?;

            println!("{} Bookloader Statistics ({:?})", Icons::STATS, database);
            println!(
                "{}",
                ui::stats_table(&[
                    ("Authors", stats.authors.to_string()),
                    ("Books", stats.books.to_string()),
                ])
            );
        }

        Commands::Author { id, db } => {
            let store = open_store(&config, db)?;
            match store.get_author(&id)? {
                Some(author) => println!("{}", serde_json::to_string_pretty(&author)?),
                None => anyhow::bail!("author not found: {}", id),
            }
        }

        Commands::Book { id, db } => {
            let store = open_store(&config, db)?;
            match store.get_book(&id)? {
                Some(book) => println!("{}", serde_json::to_string_pretty(&book)?),
                None => anyhow::bail!("book not found: {}", id),
            }
        }

        Commands::Init { force } => {
            config::write_config(&cli.config, &LoaderConfig::starter(), force)?;
            ui::success(&format!("Wrote {}", cli.config.display()));
        }
    }

    Ok(())
}

fn open_store(config: &LoaderConfig, db: DatabaseArgs) -> anyhow::Result<SqliteStore> {
    let database = config.database_path(db.database);
    config::ensure_db_dir(&database)?;
    tracing::debug!("Opening database {:?}", database);
    Ok(SqliteStore::open(&database)?)
}

fn load(store: &SqliteStore, config: &LoaderConfig, dumps: DumpArgs) -> anyhow::Result<LoadReport> {
    let author_dump = config.author_dump_path(dumps.authors)?;
    let work_dump = config.work_dump_path(dumps.works)?;

    ui::banner("Loading dumps");
    ui::dump_source(Stage::Authors, &author_dump);
    ui::dump_source(Stage::Works, &work_dump);

    if dumps.fresh {
        store.clear_all()?;
        ui::notice("Cleared existing authors and books");
    }

    let started = Instant::now();
    let loader = Loader::new(store, store);
    let report = LoadReport {
        authors: run_stage(&loader, Stage::Authors, &author_dump)?,
        works: run_stage(&loader, Stage::Works, &work_dump)?,
    };

    ui::section("Summary");
    for outcome in [&report.authors, &report.works] {
        ui::stage_outcome(outcome);
    }
    let stats = store.stats()?;
    println!(
        "{}",
        ui::stats_table(&[
            ("Authors stored", stats.authors.to_string()),
            ("Books stored", stats.books.to_string()),
        ])
    );
    ui::elapsed(started.elapsed());

    Ok(report)
}

fn run_stage(
    loader: &Loader<&SqliteStore, &SqliteStore>,
    stage: Stage,
    path: &Path,
) -> anyhow::Result<StageOutcome> {
    ui::stage_started(stage);
    let spinner = Spinner::new(&format!("Reading {}", path.display()));
    let outcome = loader.run_stage(stage, path);
    spinner.finish_and_clear();
    Ok(outcome?)
}

fn serve(store: SqliteStore, port: u16) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(bookloader::server::start_server(port, store))
}
