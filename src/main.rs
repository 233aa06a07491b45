use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mytrip::{Config, Database, Error, PaymentService, Server, TripClient, app};

#[derive(Debug, Parser)]
#[command(name = "mytrip", version, about = "Order, payment and trip booking API")]
struct Cli {
    /// Main configuration file
    #[arg(long = "conf", value_name = "FILE", default_value = "conf-dev.yml")]
    conf: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Unable to start the server");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    info!(file = %cli.conf.display(), "Loading configuration file");
    let config = Config::load(&cli.conf)?;

    let db = Arc::new(Database::new(config.database.clone()));
    db.open().await?;
    let trips = TripClient::new(&config.trip_service_url)?;
    let service = Arc::new(PaymentService::new(Arc::clone(&db), trips));

    let server = Server::bind(&config.listen_addr()).await?;
    let result = server.serve(app::routes(&config, service)).await;

    db.close().await;
    result
}
