// Server loop module
// Accepts connections until shutdown is requested, then lets in-flight
// connections finish

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::{accept_connection, connection_timeout};
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` is notified
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                logger::log_info("Shutdown requested, no longer accepting connections");
                break;
            }
        }
    }

    drop(listener);

    let deadline = connection_timeout(&state.config.performance);
    if wait_for_drain(&active_connections, deadline).await {
        logger::log_info("All connections closed");
    } else {
        logger::log_warning(&format!(
            "{} connection(s) still open after {}s, exiting anyway",
            active_connections.load(Ordering::SeqCst),
            deadline.as_secs()
        ));
    }
    Ok(())
}

/// Wait until the connection counter reaches zero or `deadline` passes.
///
/// Returns whether the counter drained.
async fn wait_for_drain(active_connections: &AtomicUsize, deadline: Duration) -> bool {
    let give_up = tokio::time::Instant::now() + deadline;
    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= give_up {
            return false;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
    true
}
