//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single fallback handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Hand every request to the dispatcher and write back its response
//! - Graceful shutdown once the caller's shutdown future resolves

use std::future::Future;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DispatchConfig;
use crate::dispatch::{DispatchError, Dispatcher};
use crate::http::{request, response};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub max_body_size: usize,
}

/// HTTP front end for a [`Dispatcher`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &DispatchConfig, dispatcher: Dispatcher) -> Self {
        let state = AppState {
            dispatcher,
            max_body_size: config.listener.max_body_size,
        };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DispatchConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point: extract, dispatch, write.
async fn dispatch_handler(State(state): State<AppState>, req: Request<Body>) -> axum::response::Response {
    let request = match request::extract(req, state.max_body_size).await {
        Ok(r) => r,
        Err(e) => return response::into_http(e.into_response()).await,
    };

    // Handlers are synchronous and may block.
    let dispatcher = state.dispatcher.clone();
    let path = request.path.clone();
    let dispatched = tokio::task::spawn_blocking(move || dispatcher.dispatch(&request)).await;

    let dispatched = match dispatched {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Dispatch task failed");
            DispatchError::HandlerPanicked { route: path }.into_response()
        }
    };

    response::into_http(dispatched).await
}
