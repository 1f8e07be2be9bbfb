//! FluentUSA Love · Learning Backend
//!
//! - Axum HTTP + WebSocket API
//! - CEFR placement scoring and the milestone/badge engine
//! - Optional OpenAI (tutor chat, transcription) and ElevenLabs (speech)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                    : u16 (default 3000)
//!   OPENAI_API_KEY          : enables OpenAI integration if present
//!   OPENAI_BASE_URL         : default "https://api.openai.com/v1"
//!   OPENAI_CHAT_MODEL       : default "gpt-4o-mini"
//!   OPENAI_TRANSCRIBE_MODEL : default "whisper-1"
//!   ELEVENLABS_API_KEY      : enables text-to-speech if present
//!   ELEVENLABS_BASE_URL     : default "https://api.elevenlabs.io/v1"
//!   ELEVENLABS_VOICE_ID     : default voice ("Rachel")
//!   ELEVENLABS_MODEL_ID     : default "eleven_monolingual_v1"
//!   APP_CONFIG_PATH         : path to TOML config (prompts + optional question bank)
//!   LOG_LEVEL               : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT              : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod seeds;
mod placement;
mod badges;
mod milestones;
mod modules;
mod phrases;
mod tasks;
mod store;
mod state;
mod protocol;
mod logic;
mod openai;
mod elevenlabs;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: record store, catalogs, prompts, optional AI clients.
  let state = Arc::new(AppState::new()?);

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "fluentusa", %addr, "HTTP server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  info!(target: "fluentusa", "Server shutdown complete");
  Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      error!(target: "fluentusa", error = %e, "Failed to listen for Ctrl+C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        error!(target: "fluentusa", error = %e, "Failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };
  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => info!(target: "fluentusa", "Received Ctrl+C, shutting down"),
    _ = terminate => info!(target: "fluentusa", "Received terminate signal, shutting down"),
  }
}
