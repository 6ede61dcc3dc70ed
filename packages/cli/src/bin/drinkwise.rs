use std::collections::HashMap;
use std::env;
use std::process;

use clap::{Parser, Subcommand};

use drinkwise_cli::config::Config;
use drinkwise_cli::{init_tracing, run_migrations, run_server};
use drinkwise_config::constants;

#[derive(Parser)]
#[command(name = "drinkwise")]
#[command(about = "Drinkwise - drinking window tracking server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Address to bind (overrides HOST)")]
        host: Option<String>,
        #[arg(long, help = "SQLite database URL (overrides DATABASE_URL)")]
        database_url: Option<String>,
    },
    /// Apply database migrations and exit
    Migrate {
        #[arg(long, help = "SQLite database URL (overrides DATABASE_URL)")]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut overrides: HashMap<&str, String> = HashMap::new();

    let serve = match command {
        Commands::Serve {
            port,
            host,
            database_url,
        } => {
            if let Some(port) = port {
                overrides.insert(constants::PORT, port.to_string());
            }
            if let Some(host) = host {
                overrides.insert(constants::HOST, host);
            }
            if let Some(url) = database_url {
                overrides.insert(constants::DATABASE_URL, url);
            }
            true
        }
        Commands::Migrate { database_url } => {
            if let Some(url) = database_url {
                overrides.insert(constants::DATABASE_URL, url);
            }
            false
        }
    };

    // Flags take precedence over the environment
    let config =
        Config::from_lookup(|name| overrides.get(name).cloned().or_else(|| env::var(name).ok()))?;

    if serve {
        run_server(config).await
    } else {
        run_migrations(&config).await
    }
}
