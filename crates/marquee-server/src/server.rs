use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use marquee_db_memory::InMemoryMovieSource;
use marquee_storage::DynMovieSource;

use crate::{config::AppConfig, handlers, state::AppState, store};

pub struct MarqueeServer {
    addr: SocketAddr,
    app: Router,
}

/// Build the full application: keyed store (Redis or in-memory fallback),
/// simulated authoritative source, services, and router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let store = store::create_keyed_store(&cfg.redis).await;
    let source: DynMovieSource = Arc::new(InMemoryMovieSource::with_latency(
        cfg.fetch_delay(),
        cfg.persist_delay(),
    ));
    let state = AppState::new(store, source, cfg);
    Ok(build_router(state, cfg))
}

/// Build the router over pre-wired state. Tests use this directly to inject
/// zero-latency in-memory backends.
pub fn build_router(state: AppState, cfg: &AppConfig) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        // Object cache (string shape)
        .route("/movies", post(handlers::upsert_movie))
        .route("/movies/{id}", get(handlers::get_movie))
        // Profiles (hash shape)
        .route(
            "/users/{id}",
            get(handlers::read_profile).patch(handlers::update_profile),
        )
        // Leaderboard (sorted-set shape)
        .route("/leaderboard/score", post(handlers::apply_score_delta))
        .route("/leaderboard/top/{n}", get(handlers::leaderboard_top))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http.request",
                        http.method = %method,
                        http.target = %uri,
                        http.status_code = Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub async fn build(self) -> anyhow::Result<MarqueeServer> {
        let app = build_app(&self.config).await?;

        Ok(MarqueeServer {
            addr: self.addr,
            app,
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarqueeServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
