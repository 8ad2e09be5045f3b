//! growrecs - ask Growstuff how a crop is usually grown

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use growing_recs::cli::Cli;
use growing_recs::error::EXIT_OK;
use growing_recs::{AppError, Config, Driver, GrowstuffClient, OutputFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = Config::load()?;
    cli.apply(&mut config);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!("Environment: {}", config.environment);
    tracing::debug!("Growstuff API: {}", config.api.base_url);

    let client = GrowstuffClient::new(&config.api)?;
    let stdin = io::stdin().lock();
    // JSON reports own stdout; the prompt moves to stderr
    let prompts: Box<dyn Write> = match cli.output_format() {
        OutputFormat::Json => Box::new(io::stderr()),
        OutputFormat::Text => Box::new(io::stdout()),
    };
    let mut driver = Driver::new(client, stdin, io::stdout())
        .max_attempts(config.driver.max_attempts)
        .format(cli.output_format())
        .prompts_to(prompts);

    let result = match (cli.crop_name(), &cli.from_file) {
        (Some(crop), Some(path)) => driver.run_offline(&crop, path).map(|_| EXIT_OK),
        (Some(crop), None) => driver.run_once(&crop).await.map(|_| EXIT_OK),
        (None, _) => driver.run().await.map(|outcome| outcome.exit_code()),
    };

    match result {
        Ok(code) => Ok(ExitCode::from(code)),
        Err(err) => {
            match &err {
                AppError::Fetch(fetch) => eprintln!("{}", fetch.user_message()),
                other => eprintln!("{}", other),
            }
            tracing::debug!("Exiting: {:?}", err);
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
