//! Prediction Metrics

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub const PREDICTIONS_TOTAL: &str = "car_price_predictions_total";
pub const PREDICTION_LATENCY: &str = "car_price_prediction_latency_seconds";

/// Install the global Prometheus recorder
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Count one prediction request by outcome (`ok`, `rejected`, `unavailable`)
pub fn record_prediction(outcome: &'static str) {
    metrics::counter!(PREDICTIONS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record encode + inference latency of a successful prediction
pub fn record_latency(latency: Duration) {
    metrics::histogram!(PREDICTION_LATENCY).record(latency.as_secs_f64());
}
