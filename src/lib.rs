//! # browser-relay
//!
//! An HTTP relay that dispatches browser-automation scripts to remote
//! cloud browser sessions over the Chrome DevTools Protocol (CDP), and
//! AI action requests to a remote automation-agent service.
//!
//! ## Features
//!
//! - **Browser Pool**: one shared remote connection per engine tag,
//!   lazily established, reused across requests
//! - **Session Registry**: per-request page lifetimes with guaranteed
//!   teardown regardless of workflow outcome
//! - **Script Dispatch**: typed automation workflows (navigate/interact,
//!   scrape, form fill, multi-step, load-performance probe, custom code)
//! - **HTTP API**: health, unified tool dispatch, dedicated AI and
//!   advanced automation endpoints, session introspection
//!
//! ## Running the server
//!
//! ```bash
//! BROWSERBASE_API_KEY=... BROWSERBASE_PROJECT_ID=... cargo run --bin relay-server
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use browser_relay::config::Settings;
//! use browser_relay::server::{self, AppState};
//!
//! # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(&Settings::from_env());
//! let app = server::router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: engine tags, driver traits, CDP implementations,
//!   connection pool, session registry
//! - [`script`]: script model and workflow handlers
//! - [`agent`]: remote automation-agent client
//! - [`server`]: HTTP routes and request lifecycle
//! - [`config`]: environment-derived settings
//! - [`error`]: error types and result alias

pub mod agent;
pub mod browser;
pub mod config;
pub mod error;
pub mod script;
pub mod server;

pub use agent::{AutomationAgent, StagehandClient};
pub use browser::pool::BrowserPool;
pub use browser::session::SessionRegistry;
pub use browser::{BrowserHandle, Connector, EngineTag, PageHandle};
pub use config::Settings;
pub use error::{RelayError, Result};
pub use script::{RawScript, Script};
pub use server::AppState;
