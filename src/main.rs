//! Brewgraph CLI - load the brewery graph, run requests, write back mutations

use anyhow::Context;
use brewgraph::config::{self, BrewgraphConfig};
use brewgraph::query::{Executor, Resolvers, Selection};
use brewgraph::storage::{self, DurabilityPolicy, JsonFilePersister};
use brewgraph::ui::{self, Icons};
use brewgraph::{loader, EntityKind, EntityStore};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "brewgraph")]
#[command(version)]
#[command(about = "In-memory brewery graph with resolver-style reads and persisted writes")]
#[command(long_about = r#"
Brewgraph loads breweries, beers, users and reviews from a data directory,
answers nested read requests and writes each mutation back to its table file.

Example usage:
  brewgraph demo --data-dir ./data
  brewgraph query --request '{"field": "beers", "selections": [{"field": "name"}]}'
  brewgraph get beer 1
  brewgraph stats --check
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print only JSON results, no status lines
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file (defaults to brewgraph.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sample queries and mutations
    Demo {
        /// Directory holding breweries.json, beers.json, users.json and reviews.json
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// What to do when a table cannot be written back (best-effort, strict)
        #[arg(long)]
        durability: Option<DurabilityPolicy>,
    },

    /// Execute a selection request given as JSON or as a path to a JSON file
    Query {
        /// Request JSON, or a file containing it
        #[arg(short, long)]
        request: String,

        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        #[arg(long)]
        durability: Option<DurabilityPolicy>,
    },

    /// Show one entity by kind and id
    Get {
        /// Entity kind (brewery, beer, user, review)
        kind: EntityKind,

        id: String,

        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Show table sizes
    Stats {
        /// Also verify relationship integrity
        #[arg(long)]
        check: bool,

        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Write every loaded table to another directory
    Export {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Settings after merging CLI flags over the config file
struct Settings {
    data_dir: PathBuf,
    durability: DurabilityPolicy,
}

impl Settings {
    fn resolve(
        config: &BrewgraphConfig,
        data_dir: Option<PathBuf>,
        durability: Option<DurabilityPolicy>,
    ) -> Self {
        Self {
            data_dir: data_dir.unwrap_or_else(|| config.data_dir_or_default()),
            durability: durability.or(config.durability).unwrap_or_default(),
        }
    }

    /// Load the data directory and wire resolvers that persist back into it
    fn open(&self) -> anyhow::Result<Resolvers> {
        let store = Arc::new(EntityStore::new());
        let report = loader::load_dir(&store, &self.data_dir)
            .with_context(|| format!("failed to load data from {}", self.data_dir.display()))?;
        tracing::debug!("{}", report);
        ui::load_summary(&report);

        let persister = Arc::new(JsonFilePersister::new(&self.data_dir));
        Ok(Resolvers::new(store, persister).with_policy(self.durability))
    }
}

/// The sample run: six reads, then one of each mutation
fn demo_requests() -> Vec<(&'static str, Selection)> {
    vec![
        (
            "All Beers",
            Selection::new("beers")
                .fields(&["id", "name", "style"])
                .with(Selection::new("brewery").fields(&["name", "country"]))
                .with(Selection::new("reviews").fields(&["text", "rating"])),
        ),
        (
            "Beer by ID",
            Selection::new("beer")
                .arg("id", json!("1"))
                .fields(&["id", "name", "style"])
                .with(Selection::new("brewery").fields(&["name", "country"])),
        ),
        (
            "All Breweries",
            Selection::new("breweries")
                .fields(&["id", "name", "country"])
                .with(Selection::new("beers").fields(&["name", "style"])),
        ),
        (
            "Brewery by ID",
            Selection::new("brewery")
                .arg("id", json!("1"))
                .fields(&["id", "name", "country"])
                .with(Selection::new("beers").fields(&["name", "style"])),
        ),
        (
            "All Reviews",
            Selection::new("reviews")
                .fields(&["id", "text", "rating"])
                .with(Selection::new("beer").fields(&["name"]))
                .with(Selection::new("user").fields(&["name"])),
        ),
        (
            "Users and Reviews",
            Selection::new("users")
                .fields(&["id", "name", "email"])
                .with(
                    Selection::new("reviews")
                        .fields(&["text", "rating"])
                        .with(Selection::new("beer").fields(&["name"])),
                ),
        ),
        (
            "Add Beer",
            Selection::new("addBeer")
                .arg("input", json!({ "name": "IPA", "style": "Ale", "breweryId": "1" }))
                .fields(&["id", "name", "style"])
                .with(Selection::new("brewery").fields(&["name", "country"])),
        ),
        (
            "Add Review",
            Selection::new("addReview")
                .arg(
                    "input",
                    json!({ "text": "Great beer!", "rating": 5, "beerId": "1", "userId": "1" }),
                )
                .fields(&["id", "text", "rating"])
                .with(Selection::new("beer").fields(&["name"]))
                .with(Selection::new("user").fields(&["name"])),
        ),
        (
            "Add User",
            Selection::new("addUser")
                .arg("input", json!({ "name": "John Doe", "email": "john@example.com" }))
                .fields(&["id", "name", "email"]),
        ),
    ]
}

fn read_request(request: &str) -> anyhow::Result<Vec<Selection>> {
    let path = PathBuf::from(request);
    let text = if path.is_file() {
        std::fs::read_to_string(&path)?
    } else {
        request.to_string()
    };
    Ok(Selection::parse_request(&text)?)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    brewgraph::output::set_quiet(cli.quiet);

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Demo { data_dir, durability } => {
            let settings = Settings::resolve(&config, data_dir, durability);
            ui::header(&format!("Loading data from {}", settings.data_dir.display()));
            let resolvers = settings.open()?;

            let executor = Executor::new(&resolvers);
            for (description, selection) in demo_requests() {
                ui::request(description, selection.field.starts_with("add"));
                ui::info("Request", &serde_json::to_string(&selection)?);
                let response = executor.execute(std::slice::from_ref(&selection));
                print_json(&serde_json::to_value(&response)?)?;
            }
        }

        Commands::Query { request, data_dir, durability } => {
            let settings = Settings::resolve(&config, data_dir, durability);
            let selections = read_request(&request)?;
            let resolvers = settings.open()?;

            let response = Executor::new(&resolvers).execute(&selections);
            print_json(&serde_json::to_value(&response)?)?;
            if !response.is_ok() {
                ui::warn(&format!("{} field(s) failed", response.errors.len()));
            }
        }

        Commands::Get { kind, id, data_dir } => {
            let settings = Settings::resolve(&config, data_dir, None);
            let resolvers = settings.open()?;

            match resolvers.lookup(kind, &id) {
                Ok(node) => {
                    let request = [Selection::new(kind.as_str()).arg("id", json!(node.id()))];
                    let response = Executor::new(&resolvers).execute(&request);
                    print_json(&Value::Object(response.data))?;
                }
                Err(e) if e.is_not_found() => {
                    ui::error(&e.to_string());
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Stats { check, data_dir } => {
            let settings = Settings::resolve(&config, data_dir, None);
            let resolvers = settings.open()?;
            let stats = resolvers.store().stats();

            println!("{} Brewgraph Statistics ({})", Icons::STATS, settings.data_dir.display());
            println!("{}", ui::stats_table(&stats));

            if check {
                let problems = resolvers.store().check_integrity();
                if problems.is_empty() {
                    ui::success("All relationships are consistent.");
                } else {
                    ui::error(&format!("{} integrity problem(s):", problems.len()));
                    for problem in &problems {
                        ui::problem(problem);
                    }
                    std::process::exit(1);
                }
            }
        }

        Commands::Export { out, data_dir } => {
            let settings = Settings::resolve(&config, data_dir, None);
            let resolvers = settings.open()?;

            let target = JsonFilePersister::new(&out);
            storage::export_all(resolvers.store(), &target)?;
            ui::success(&format!("{} Exported all tables to {}", Icons::DATABASE, out.display()));
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let defaults = BrewgraphConfig {
                data_dir: Some(config::default_data_dir().display().to_string()),
                durability: Some(DurabilityPolicy::default()),
            };
            config::write_config(&path, &defaults, force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}
