//! OS signal handling.
//!
//! # Responsibilities
//! - Register the Ctrl+C / SIGINT handler
//! - Translate the signal into a shutdown trigger
//!
//! # Design Decisions
//! - A failed handler registration is logged, not fatal; the relay then
//!   only stops when the process is killed

use tracing::{error, info};

use crate::lifecycle::shutdown::Shutdown;

/// Spawn a task that triggers `shutdown` on Ctrl+C.
pub fn spawn_signal_listener(shutdown: &Shutdown) {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                shutdown.trigger();
            }
            Err(err) => {
                error!(error = %err, "failed to install shutdown signal handler");
            }
        }
    });
}
