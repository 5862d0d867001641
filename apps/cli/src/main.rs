//! Ludoteca command-line client.
//!
//! Browses and edits a video-game library kept by a REST backend (or in
//! memory when the settings ask for mock data).

mod cli;
mod commands;
mod config;

use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

use clap::Parser;
use ludoteca_settings::{ToastKind, ToastQueue, notifier_for};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::{App, Backends};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting ludoteca");

    let queue = Arc::new(Mutex::new(ToastQueue::new()));
    let result = start(cli, queue.clone()).await;

    let toasts = queue.lock().unwrap_or_else(PoisonError::into_inner).drain();
    for toast in &toasts {
        let label = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        };
        eprintln!("{label}: {}", toast.message);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Failures from the store and the review board were already shown as toasts.
            let message = e.to_string();
            if !toasts.iter().any(|t| t.message == message) {
                eprintln!("error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: Cli, queue: Arc<Mutex<ToastQueue>>) -> anyhow::Result<()> {
    let settings = config::load_settings(cli.config.as_deref())?;
    let backends = Backends::from_settings(&settings, cli.origin.as_deref())?;
    let notifier = notifier_for(&settings.ui, queue);
    let app = App {
        settings,
        backends,
        notifier,
    };
    commands::run(cli.command, app).await
}
