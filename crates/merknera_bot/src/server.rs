//! HTTP transport for the RPC dispatcher.

use crate::dispatch::Dispatcher;
use crate::rpc::{RpcRequest, RpcResponse};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Builds the router: a single `POST /` endpoint taking an RPC envelope.
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .with_state(dispatcher)
        .layer(ServiceBuilder::new().map_request(log_request))
}

fn log_request(req: Request) -> Request {
    info!(
        method = %req.method(),
        uri = %req.uri(),
        "Incoming HTTP request"
    );
    req
}

/// Decodes the envelope and writes the dispatcher's reply.
///
/// Malformed JSON gets a 400 with an error envelope; an ignored method gets
/// a 200 with an empty body.
async fn handle_rpc(State(dispatcher): State<Arc<Dispatcher>>, body: Bytes) -> Response {
    let request: RpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Malformed RPC request");
            let reply: RpcResponse = RpcResponse::failure(format!("malformed request: {}", e), 0);
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };

    match dispatcher.handle(request).await.into_response() {
        Some(reply) => {
            debug!(id = reply.id, error = %reply.error, "Response sent");
            Json(reply).into_response()
        }
        None => StatusCode::OK.into_response(),
    }
}

/// Serves the router on `listener` until Ctrl+C.
#[instrument(skip_all)]
pub async fn serve(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Bot ready at http://{}/", addr);
    }
    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
