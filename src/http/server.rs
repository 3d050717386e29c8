//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, panic recovery)
//! - Bind server to listener
//! - Classify requests and hand them to the route handlers

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::api::ApiViewMapper;
use crate::config::ProxyConfig;
use crate::error::{bad_request, ProxyResult};
use crate::http::handlers;
use crate::http::request::{RequestIdExt, UuidRequestId};
use crate::http::response;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::routing::{RequestRouter, Route, TargetResolver, TargetUrl};
use crate::upstream::UpstreamFetcher;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RequestRouter>,
    pub resolver: Arc<TargetResolver>,
    pub default_target: Arc<TargetUrl>,
    pub fetcher: UpstreamFetcher,
    pub mapper: Arc<ApiViewMapper>,
}

impl AppState {
    pub fn from_config(config: &ProxyConfig) -> ProxyResult<Self> {
        let resolver = TargetResolver::new(config.upstream.default_target.clone());
        let default_target = resolver.default_target()?;
        let fetcher = UpstreamFetcher::new(&config.upstream)?;
        let mapper = ApiViewMapper::new(fetcher.clone(), config.api.comment_limit);

        Ok(Self {
            router: Arc::new(RequestRouter::new()),
            resolver: Arc::new(resolver),
            default_target: Arc::new(default_target),
            fetcher,
            mapper: Arc::new(mapper),
        })
    }
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> ProxyResult<Self> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            request_id = %req.request_id(),
                            method = %req.method(),
                            path = %req.uri().path(),
                        )
                    }))
                    .layer(CatchPanicLayer::custom(panic_response)),
            )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            default_target = %self.config.upstream.default_target,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Classify the request and run the matching handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let route = state.router.classify(&request);
    let (parts, _body) = request.into_parts();

    tracing::debug!(route = route.name(), "Dispatching request");

    let response = match route {
        Route::Health => response::health(),
        Route::Preflight => response::preflight(),
        Route::RedditApi => handlers::api_view(&state, &parts).await,
        Route::RawProxy => handlers::raw_proxy(&state, &parts).await,
        Route::TelemetrySink => response::no_content(),
        Route::WebPath => handlers::web_path(&state, &parts).await,
        Route::NotFound => response::not_found(),
    };

    let status = response.status().as_u16();
    metrics::record_request(parts.method.as_str(), status, route.name(), start_time);
    tracing::info!(
        route = route.name(),
        status,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(details = %details, "Handler panicked");
    bad_request("Unexpected proxy failure.", details)
}
