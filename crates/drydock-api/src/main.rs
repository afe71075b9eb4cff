use anyhow::Context;
use clap::Parser;
use drydock_api::{AppState, router};
use drydock_config::DrydockConfig;
use drydock_db::RepairService;

/// Fleet repair record service.
#[derive(Debug, Parser)]
#[command(name = "drydock", version, about = "Drydock - fleet vessel repair records")]
struct Cli {
    /// Address to listen on (overrides `server.bind_addr`)
    #[arg(short, long)]
    bind: Option<String>,

    /// Database path (overrides `database.path`)
    #[arg(short, long)]
    database: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("drydock error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = DrydockConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if let Some(database) = cli.database {
        config.database.path = database;
    }

    if config.database.is_in_memory() {
        tracing::warn!("using an in-memory database, records are lost on shutdown");
    }
    let service = RepairService::new_local(config.database.local_path())
        .await
        .with_context(|| format!("failed to open database at {}", config.database.local_path()))?;
    if !config.checklist.items.is_empty() {
        service
            .seed_checklist_items(&config.checklist.items)
            .await
            .context("failed to seed checklist catalog")?;
    }
    if !config.server.requires_api_key() {
        tracing::warn!("no API key configured, requests are not authenticated");
    }

    let app = router(AppState::new(service, &config), &config.server);
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "drydock listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DRYDOCK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::Cli;

    #[test]
    fn clap_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_parse() {
        let cli = Cli::try_parse_from(["drydock", "--bind", "127.0.0.1:9000", "-v"]).unwrap();
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:9000"));
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
