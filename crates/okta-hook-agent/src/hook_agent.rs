// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper::{body::Incoming, http, Request, Response, StatusCode};
use tracing::{debug, error};

use crate::config;
use crate::event_processor::EventProcessor;
use crate::http_utils::{self, HttpResponse};

const HOOK_ENDPOINT_PATH: &str = "/";
const CHALLENGE_HEADER: &str = "x-okta-verification-challenge";

pub struct HookAgent {
    pub config: Arc<config::Config>,
    pub event_processor: Arc<dyn EventProcessor + Send + Sync>,
}

impl HookAgent {
    /// Binds the receiver port and serves event hook deliveries until the
    /// process exits.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.receiver_port));
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        debug!(
            "event hook receiver started: listening on port {}",
            self.config.receiver_port
        );

        let event_processor = self.event_processor.clone();
        let endpoint_config = self.config.clone();

        let service = service_fn(move |req| {
            // called for each http request
            let event_processor = event_processor.clone();
            let endpoint_config = endpoint_config.clone();

            HookAgent::hook_endpoint_handler(endpoint_config, req, event_processor)
        });

        Self::serve_tcp(listener, service).await
    }

    async fn serve_tcp<S>(
        listener: tokio::net::TcpListener,
        service: S,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        S: hyper::service::Service<Request<Incoming>, Response = HttpResponse>
            + Clone
            + Send
            + 'static,
        S::Future: Send,
        S::Error: std::error::Error + Send + Sync + 'static,
    {
        let server = hyper::server::conn::http1::Builder::new();
        let mut joinset = tokio::task::JoinSet::new();

        loop {
            let conn = tokio::select! {
                con_res = listener.accept() => match con_res {
                    Err(e)
                        if matches!(
                            e.kind(),
                            io::ErrorKind::ConnectionAborted
                                | io::ErrorKind::ConnectionReset
                                | io::ErrorKind::ConnectionRefused
                        ) =>
                    {
                        continue;
                    }
                    Err(e) => {
                        error!("Server error: {e}");
                        return Err(e.into());
                    }
                    Ok((conn, _)) => conn,
                },
                finished = async {
                    match joinset.join_next().await {
                        Some(finished) => finished,
                        None => std::future::pending().await,
                    }
                } => match finished {
                    Err(e) if e.is_panic() => {
                        // Don't kill the server on panic - log and continue
                        error!("Connection handler panicked: {:?}", e);
                        continue;
                    },
                    Ok(()) | Err(_) => continue,
                },
            };
            let conn = hyper_util::rt::TokioIo::new(conn);
            let server = server.clone();
            let service = service.clone();
            joinset.spawn(async move {
                if let Err(e) = server.serve_connection(conn, service).await {
                    error!("Connection error: {e}");
                }
            });
        }
    }

    async fn hook_endpoint_handler(
        config: Arc<config::Config>,
        req: Request<Incoming>,
        event_processor: Arc<dyn EventProcessor + Send + Sync>,
    ) -> http::Result<HttpResponse> {
        if req.uri().path() != HOOK_ENDPOINT_PATH {
            let mut not_found = Response::new(Full::new(Bytes::new()));
            *not_found.status_mut() = StatusCode::NOT_FOUND;
            return Ok(not_found);
        }

        // One-time endpoint verification handshake: echo the challenge and
        // skip all shipping logic.
        if let Some(challenge) = req
            .headers()
            .get(CHALLENGE_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            debug!("responding to endpoint verification challenge");
            return http_utils::verification_challenge_response(challenge);
        }

        let (parts, body) = req.into_parts();
        if let Some(response) = http_utils::verify_request_content_length(
            &parts.headers,
            config.max_request_content_length,
            "Error processing event hook",
        ) {
            return response;
        }

        let body_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                return http_utils::log_and_create_http_response(
                    &format!("Error reading event hook body: {e}"),
                    StatusCode::BAD_REQUEST,
                );
            }
        };

        event_processor
            .process_events(config, &parts.headers, &body_bytes)
            .await
    }
}
