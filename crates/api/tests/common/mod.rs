//! Common test utilities for api integration tests.

use api::{create_router, AppState, LoadedModel};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use feature_engine::ColumnSchema;
use inference_engine::{LinearPriceModel, Predictor};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const COLUMNS: &[&str] = &[
    "age",
    "engine size",
    "horse power",
    "make_Toyota",
    "make_honda",
    "make_bmw",
    "model_Corolla",
    "model_civic",
    "model_4-runner",
    "model_tesla model 3",
    "condition_Foreign Used",
    "condition_Nigerian Used",
];

/// intercept 5000, age -250, engine 1000, hp 10, then one-hot weights
pub const COEFFICIENTS: &[f64] = &[
    -250.0, 1000.0, 10.0, 500.0, 400.0, 900.0, 300.0, 200.0, 600.0, 800.0, 700.0, 100.0,
];

pub fn loaded_model(strict: bool) -> LoadedModel {
    let schema = ColumnSchema::new(COLUMNS.iter().map(|c| c.to_string()).collect())
        .expect("Failed to build schema");
    let model = LinearPriceModel::new(COEFFICIENTS.to_vec(), 5000.0);
    let predictor = Predictor::new(schema, Box::new(model))
        .expect("Failed to build predictor")
        .with_strict_categories(strict);
    LoadedModel::new(predictor)
}

/// Router with a loaded linear model
pub fn create_test_app() -> Router {
    create_router(Arc::new(AppState::new(Some(loaded_model(false)))))
}

/// Router whose startup load failed
pub fn create_unloaded_app() -> Router {
    create_router(Arc::new(AppState::new(None)))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    read_json(response).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    read_json(response).await
}

pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let text = String::from_utf8(body.to_vec()).expect("Body is not UTF-8");
    (status, text)
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&body).expect("Body is not JSON");
    (status, json)
}
