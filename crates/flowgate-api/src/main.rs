//! Flowgate CLI and HTTP gateway entry point.
//!
//! Binary name: `flowgate`
//!
//! Parses CLI arguments, loads configuration, then either starts the
//! gateway server (`serve`) or dispatches a Directus record operation
//! (`records …`).

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use flowgate_infra::config::{self, FlowgateConfig};
use flowgate_types::subscription::EventSelection;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,flowgate=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let data_dir = cli
        .config
        .clone()
        .unwrap_or_else(config::resolve_data_dir);
    let app_config = config::load_config(&data_dir).await;

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_register,
        } => {
            serve(app_config, host, port, no_register).await?;
        }

        Commands::Records { command } => {
            cli::records::run(&app_config, command, cli.json).await?;
        }
    }

    Ok(())
}

/// Start the gateway server.
///
/// Unless `--no-register` is passed, the trigger is activated after the
/// listener binds and deactivated on graceful shutdown. An activation
/// failure aborts startup: the trigger cannot be considered live.
async fn serve(
    config: FlowgateConfig,
    host: Option<String>,
    port: Option<u16>,
    no_register: bool,
) -> anyhow::Result<()> {
    let credentials = config::wazzup_credentials_from_env().with_context(|| {
        format!(
            "{} is not set (the Wazzup bearer token)",
            config::WAZZUP_API_KEY_ENV
        )
    })?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let state = AppState::new(config, credentials);

    if no_register {
        tracing::info!("--no-register: leaving remote subscription untouched");
    } else {
        let selection = EventSelection::parse(&state.config.trigger.categories)?;
        let callback_url = state.config.trigger.callback_url.clone();
        if callback_url.is_empty() {
            anyhow::bail!("trigger.callback_url is not configured");
        }

        let mut lifecycle = state.lifecycle.lock().await;
        lifecycle
            .activate(&state.credentials, &callback_url, &selection)
            .await
            .context("webhook registration failed")?;
    }

    println!(
        "  {} Flowgate listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state.clone());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Clear the remote subscription on the way out. A failure here is
    // logged, not fatal: the local intent to stop is already honored.
    let mut lifecycle = state.lifecycle.lock().await;
    if lifecycle.is_registered() {
        if let Err(err) = lifecycle.deactivate(&state.credentials).await {
            tracing::warn!(error = %err, "failed to clear webhook subscription on shutdown");
        }
    }

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
