//! services/perfect_day/src/bin/cli.rs

use perfect_day_lib::{
    adapters::{FileStore, GooglePlacesAdapter},
    cli::{
        args::USAGE,
        commands::{init, run},
        config::CONFIG_FILE_NAME,
        parse_args, CliConfig, CliContext, CliError, Command, Prompt,
    },
    config::DEFAULT_PLACES_BASE_URL,
};
use std::io::{self, BufReader};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so they never interleave with command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<(), CliError> {
    let command = parse_args(std::env::args().skip(1))?;
    if command == Command::Help {
        print!("{}", USAGE);
        return Ok(());
    }

    let mut io = Prompt::new(BufReader::new(io::stdin()), io::stdout());
    let config_dir = CliConfig::default_dir()?;

    if let Command::Init { api_key, data_dir } = command {
        return init(&config_dir, api_key, data_dir, &mut io).await;
    }

    let config = CliConfig::load(&config_dir.join(CONFIG_FILE_NAME))
        .await?
        .with_env_overrides(|key| std::env::var(key).ok());
    let data_dir = config.data_dir_or(&config_dir);

    let storage = Arc::new(FileStore::new(data_dir.clone()));
    storage.initialize().await?;
    let places = Arc::new(GooglePlacesAdapter::new(
        config.google_places_api_key.clone(),
        DEFAULT_PLACES_BASE_URL,
    )?);

    let mut ctx = CliContext {
        storage,
        places,
        data_dir,
        io,
    };
    run(command, &mut ctx).await
}
