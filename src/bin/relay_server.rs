//! browser-relay server
//!
//! Serves the automation HTTP API and cleans up remote resources on
//! SIGTERM or ctrl-c.

use browser_relay::config::Settings;
use browser_relay::server::{self, AppState};
use clap::Parser;

#[derive(Parser)]
#[command(name = "relay-server")]
#[command(version)]
#[command(about = "Remote browser automation relay", long_about = None)]
struct Cli {
    /// HTTP listen port (overrides PORT)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if let Some(port) = cli.port {
        settings.port = port;
    }

    if settings.api_key.is_empty() {
        eprintln!("Warning: BROWSERBASE_API_KEY is not set; remote connections will fail");
    }

    let state = AppState::new(&settings);
    let app = server::router(state.clone());

    let bind_addr = format!("{}:{}", cli.bind, settings.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    eprintln!(
        "browser-relay v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        bind_addr
    );
    eprintln!("AI automation:       POST /automation/ai");
    eprintln!("Advanced automation: POST /automation/advanced");
    eprintln!("Health check:        GET /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    server::shutdown(&state).await;
    eprintln!("Cleanup complete, exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
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
