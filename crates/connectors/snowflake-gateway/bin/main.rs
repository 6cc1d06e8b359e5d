use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use snowflake_gateway::{routes, state};
use snowflake_gateway_configuration::{
    load_dotenv, make_runtime_configuration, DatabaseConnectionSettings, ProcessEnvironment,
};

#[derive(Parser)]
#[command(version, about = "Serve read-only SQL endpoints backed by Snowflake")]
struct ServerOptions {
    /// Address to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
    /// Environment file to load before reading the connection settings. Defaults to `.env`
    /// when one exists.
    #[arg(long, value_name = "ENV_FILE")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match serve(ServerOptions::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(body = %error, error = true, "gateway stopped");
            eprintln!("{error:?}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(options: ServerOptions) -> anyhow::Result<()> {
    if let Some(path) = load_dotenv(options.env_file.as_deref())? {
        tracing::info!(path = %path.display(), "loaded environment file");
    }

    let configuration = make_runtime_configuration(
        &DatabaseConnectionSettings::from_default_variables(),
        &ProcessEnvironment,
    )?;
    let state = state::create_state(&configuration)?;
    let router = routes::create_router(state);

    let address = SocketAddr::new(options.host, options.port);
    tracing::info!(%address, "starting server");

    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(body = %err, "unable to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
