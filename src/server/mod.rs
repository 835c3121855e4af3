// Server module entry point
// Provides listener creation and the sequential accept loop

pub mod listener;

pub use listener::create_reusable_listener;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept loop. Connections are served one at a time, to completion, before
/// the next accept; there is no shared mutable in-memory state to protect,
/// the store itself is the only consistency boundary.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                if state.config.logging.access_log {
                    logger::log_connection_accepted(&peer_addr);
                }
                serve_connection(stream, &state).await;
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Serve a single connection. Keep-alive is off, so one connection carries
/// exactly one request and closes after the response is written.
async fn serve_connection(stream: TcpStream, state: &Arc<AppState>) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let service_state = Arc::clone(state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let state = Arc::clone(&service_state);
            async move { handler::handle_request(req, state).await }
        }),
    );

    if let Err(err) = conn.await {
        logger::log_connection_error(&err);
    }
}
