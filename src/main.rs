use devportal::{
    auth::token::TokenSigner,
    config::Config,
    logger,
    model::{AppState, Database},
};
use log::{error, info, warn};
use std::{process::ExitCode, sync::Arc};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logger::init(config.log_level) {
        eprintln!("Failed to initialize logger: {}", err);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Server stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    if config.secret_generated {
        warn!("DEVPORTAL_SECRET is not set; sessions will not survive a restart");
    }

    let database = Database::open(&config.database_path)?;
    let signer = TokenSigner::new(&config.secret, config.session_ttl);
    let state = Arc::new(AppState::new(database, signer)?);

    info!("Starting devportal server at {}", config.addr);

    axum::Server::bind(&config.addr)
        .serve(devportal::router(state).into_make_service())
        .await?;

    Ok(())
}
