use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use craftfolio_lib::server;
use craftfolio_lib::services::auth_service::hash_password;
use craftfolio_lib::services::config_service::{load_config, save_config, StorageBackend};
use craftfolio_lib::services::file_service::{ensure_dir, get_app_data_dir, DATA_DIR_ENV};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// Where content, projects and config.json live
    #[clap(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(long)]
        cors_origin: Option<String>,
        #[clap(long, value_enum)]
        storage: Option<StorageBackend>,
    },
    /// Print a bcrypt hash for `adminPasswordHash` in config.json
    HashPassword { password: String },
    /// Store the admin account in config.json
    SetAdmin { username: String, password: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve {
            port,
            cors_origin,
            storage,
        } => {
            let data_dir = resolve_data_dir(args.data_dir)?;
            let mut config = load_config(&data_dir)?;
            if let Some(port) = port {
                config.port = port;
            }
            if cors_origin.is_some() {
                config.cors_origin = cors_origin;
            }
            if let Some(storage) = storage {
                config.storage = storage;
            }

            info!("Starting server on port {} with data in {}", config.port, data_dir.display());
            server::start_server(&data_dir, &config).await?;
        }
        Commands::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
        }
        Commands::SetAdmin { username, password } => {
            let data_dir = resolve_data_dir(args.data_dir)?;
            let mut config = load_config(&data_dir)?;
            config.admin_username = Some(username);
            config.admin_password_hash = Some(hash_password(&password)?);
            save_config(&data_dir, &config)?;
            info!("Admin account saved to {}", data_dir.join("config.json").display());
        }
    }

    Ok(())
}

fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => {
            ensure_dir(&dir)?;
            Ok(dir)
        }
        None => Ok(get_app_data_dir()?),
    }
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .without_time()
        .init();
}
