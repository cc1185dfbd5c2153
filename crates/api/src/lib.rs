//! Car Price API Server
//!
//! REST API serving used-car price predictions and the dropdown options
//! for the price estimator front-end.

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub mod artifacts;
pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod telemetry;

pub use crate::artifacts::{load_artifacts, LoadError, LoadedModel};
pub use crate::config::{LoggingSettings, Settings};
pub use crate::error::ApiError;

/// Application state shared across handlers, immutable after startup
pub struct AppState {
    /// Predictor and catalog, `None` when startup loading failed
    pub loaded: Option<LoadedModel>,
    /// Prometheus handle when the recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create state around an optional loaded model
    pub fn new(loaded: Option<LoadedModel>) -> Self {
        Self {
            loaded,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    /// Load artifacts per settings; failures leave the model unavailable
    pub fn from_settings(settings: &Settings) -> Self {
        match load_artifacts(&settings.artifacts, &settings.encoding) {
            Ok(loaded) => Self::new(Some(loaded)),
            Err(e) => {
                error!("Error loading model: {}", e);
                Self::new(None)
            }
        }
    }

    /// Attach a Prometheus handle for the scrape endpoint
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    pub fn is_model_loaded(&self) -> bool {
        self.loaded.is_some()
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/options", get(routes::options::get_options))
        .route("/api/predict", post(routes::predict::predict))
        .route("/metrics", get(routes::metrics::render))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging; `RUST_LOG` takes precedence over the configured level
pub fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {e}");
    }
}

/// Run the server
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let metrics = if settings.metrics.enabled {
        match telemetry::install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Prometheus recorder not installed: {}", e);
                None
            }
        }
    } else {
        None
    };

    let state = Arc::new(AppState::from_settings(&settings).with_metrics(metrics));
    if !state.is_model_loaded() {
        warn!("Serving without a model; predict and options will return 500");
    }

    let mut app = create_router(state);

    if settings.rate_limit.enabled {
        let config = rate_limit::create_governor_config(&settings.rate_limit)
            .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {:?}", settings.rate_limit))?;
        rate_limit::spawn_cleanup(&config, Duration::from_secs(60));
        app = app.layer(GovernorLayer { config });
        info!(
            "Rate limiting enabled: burst {}, one request per {}s",
            settings.rate_limit.burst_size, settings.rate_limit.per_second
        );
    }

    let addr = settings.server.address();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
