//! HTTP server implementation
//!
//! hyper http1 with TokioIo. Bodies are collected in full before dispatch so
//! [`route`] can be driven directly from tests without a socket.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Args;
use crate::routes::{self, error_response, not_found_response, preflight_response};
use crate::services::VerificationService;
use crate::types::{Result, VouchError};

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub service: Arc<VerificationService>,
}

impl AppState {
    pub fn new(args: Args, service: VerificationService) -> Self {
        Self {
            args,
            service: Arc::new(service),
        }
    }
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Vouch listening on {} (store: {})",
        state.args.listen,
        state.service.store_backend()
    );

    if state.args.dev_mode {
        warn!("Development mode enabled - tokens carry placeholder signatures");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    info!("[{}] {} {}", addr, method, path);

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Request body error from {}: {}", addr, e);
            return Ok(error_response(&VouchError::BadRequest(
                "unreadable request body".to_string(),
            )));
        }
    };

    Ok(route(&state, method, &path, query.as_deref(), body).await)
}

/// Dispatch one fully-read request
pub async fn route(
    state: &AppState,
    method: Method,
    path: &str,
    query: Option<&str>,
    body: Bytes,
) -> Response<Full<Bytes>> {
    let service = state.service.as_ref();

    match (method, path) {
        (Method::OPTIONS, _) => preflight_response(),

        (Method::GET, "/health") => routes::health_check(state),

        (Method::POST, "/api/request") => routes::requests::create(service, &body).await,
        (Method::GET, "/api/request") => routes::requests::fetch(service, query).await,

        (Method::POST, "/api/verify") => routes::proofs::verify(service, &body).await,
        (Method::GET, "/api/proof") => routes::proofs::fetch(service, query).await,

        (Method::POST, "/api/badge") => routes::badges::create(service, &body).await,
        (Method::GET, "/api/badge") => routes::badges::fetch(service, query).await,

        (_, "/health" | "/api/request" | "/api/verify" | "/api/proof" | "/api/badge") => {
            error_response(&VouchError::MethodNotAllowed)
        }

        _ => not_found_response(path),
    }
}
