mod serve;

use std::path::PathBuf;

use anyhow::Context;
use asearch_config::Settings;
use asearch_query::SearchRequest;
use asearch_shell::SystemShell;
use asearchd::{AppService, WalkDirSource};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asearch", version, about = "Find workspace files by name")]
struct Cli {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct WorkspaceArgs {
    /// Workspace root to index
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Settings file (defaults to <root>/asearch.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Index the workspace and report the file count
    Index,
    /// Print locations whose file name contains QUERY
    Find {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run the search panel channel over stdin/stdout as JSON lines
    Serve {
        /// Quiet period before a typed query is dispatched
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("ASEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(args: &WorkspaceArgs) -> anyhow::Result<Settings> {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| Settings::default_path(&root));

    let mut settings =
        Settings::load(&path).with_context(|| format!("loading {}", path.display()))?;
    if args.root.is_some() {
        settings.root = root;
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.workspace)?;

    match cli.command {
        Command::Index => {
            let source = WalkDirSource::from_settings(&settings);
            let mut app = AppService::new(settings, SystemShell);
            app.reindex(&source).await?;
        }
        Command::Find { query, limit } => {
            let source = WalkDirSource::from_settings(&settings);
            let mut app = AppService::new(settings, SystemShell);
            app.reindex(&source).await?;

            let request = SearchRequest { query, limit };
            for location in app.search(&request) {
                println!("{}", location);
            }
        }
        Command::Serve { debounce_ms } => {
            if let Some(debounce_ms) = debounce_ms {
                settings.debounce_ms = debounce_ms;
            }
            serve::run(settings).await?;
        }
    }

    Ok(())
}
