//! Integration tests for the car price REST API.

mod common;

use api::{create_router, telemetry, AppState, LoadedModel};
use axum::http::StatusCode;
use common::{create_test_app, create_unloaded_app, get_json, get_text, loaded_model, post_json};
use feature_engine::ColumnSchema;
use inference_engine::{LinearPriceModel, Predictor};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use std::sync::Arc;

const COROLLA: &str = r#"{"Make":"Toyota","Model":"Corolla","Condition":"Foreign Used","Age":3,"Engine Size":1.8,"Horse Power":140}"#;

#[tokio::test]
async fn test_predict_example_request() {
    let (status, body) = post_json(create_test_app(), "/api/predict", COROLLA).await;

    assert_eq!(status, StatusCode::OK);
    // 5000 - 750 + 1800 + 1400 + 500 + 300 + 700
    assert_eq!(body, json!({ "predicted_price": 8950.0 }));
}

#[tokio::test]
async fn test_predict_rounds_to_cents() {
    let body = r#"{"Make":"Toyota","Model":"Corolla","Condition":"Foreign Used","Age":1.0015,"Engine Size":0,"Horse Power":0}"#;
    let (status, body) = post_json(create_test_app(), "/api/predict", body).await;

    assert_eq!(status, StatusCode::OK);
    // 5000 - 250.375 + 500 + 300 + 700, the cents tie rounds to even
    assert_eq!(body["predicted_price"], json!(6249.62));
}

#[tokio::test]
async fn test_unknown_make_matches_omitted_make() {
    let unknown = r#"{"Make":"Trabant","Model":"Corolla","Condition":"Foreign Used","Age":3,"Engine Size":1.8,"Horse Power":140}"#;
    let omitted = r#"{"Model":"Corolla","Condition":"Foreign Used","Age":3,"Engine Size":1.8,"Horse Power":140}"#;

    let (status_a, body_a) = post_json(create_test_app(), "/api/predict", unknown).await;
    let (status_b, body_b) = post_json(create_test_app(), "/api/predict", omitted).await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(body_a, body_b);
    assert_eq!(body_a["predicted_price"], json!(8450.0));
}

#[tokio::test]
async fn test_strict_mode_rejects_unknown_make() {
    let app = create_router(Arc::new(AppState::new(Some(loaded_model(true)))));
    let unknown = r#"{"Make":"Trabant","Model":"Corolla","Condition":"Foreign Used","Age":3}"#;

    let (status, body) = post_json(app, "/api/predict", unknown).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("make_Trabant"));
}

#[tokio::test]
async fn test_non_numeric_value_is_bad_request() {
    let body = r#"{"Make":"Toyota","Age":"three"}"#;
    let (status, body) = post_json(create_test_app(), "/api/predict", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Age"));
}

#[tokio::test]
async fn test_numeric_string_accepted() {
    let body = r#"{"Age":"2","Engine Size":"1.5"}"#;
    let (status, body) = post_json(create_test_app(), "/api/predict", body).await;

    assert_eq!(status, StatusCode::OK);
    // 5000 - 500 + 1500
    assert_eq!(body["predicted_price"], json!(6000.0));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, body) = post_json(create_test_app(), "/api/predict", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_json(create_test_app(), "/api/predict", "[1, 2, 3]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_without_model() {
    let (status, body) = post_json(create_unloaded_app(), "/api/predict", COROLLA).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Model not loaded" }));
}

#[tokio::test]
async fn test_options() {
    let (status, body) = get_json(create_test_app(), "/api/options").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["makes"], json!(["Toyota", "bmw", "honda"]));
    assert_eq!(
        body["models"],
        json!(["4-runner", "Corolla", "civic", "tesla model 3"])
    );
    assert_eq!(body["conditions"], json!(["Foreign Used", "Nigerian Used"]));

    let mapping = body["model_make_mapping"].as_object().unwrap();
    for model in body["models"].as_array().unwrap() {
        let makes = mapping[model.as_str().unwrap()].as_array().unwrap();
        assert!(!makes.is_empty());
    }
    assert_eq!(mapping["4-runner"], json!(["bmw", "toyota"]));
    assert_eq!(mapping["civic"], json!(["honda"]));
    // Lookup is exact, so the capitalised schema value is not in the table
    assert_eq!(mapping["Corolla"], json!(["others"]));
    assert_eq!(mapping["tesla model 3"], json!(["others"]));
}

#[tokio::test]
async fn test_options_without_schema() {
    let (status, body) = get_json(create_unloaded_app(), "/api/options").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(create_test_app(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model_kind"], "linear");
    assert_eq!(body["makes_count"], 3);
    assert_eq!(body["models_count"], 4);
}

#[tokio::test]
async fn test_health_without_model() {
    let (status, body) = get_json(create_unloaded_app(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["makes_count"], 0);
    assert_eq!(body["models_count"], 0);
}

#[tokio::test]
async fn test_predict_huge_price_is_a_number() {
    let schema = ColumnSchema::new(vec!["age".to_string()]).expect("Failed to build schema");
    let model = LinearPriceModel::new(vec![1e306], 0.0);
    let predictor = Predictor::new(schema, Box::new(model)).expect("Failed to build predictor");
    let app = create_router(Arc::new(AppState::new(Some(LoadedModel::new(predictor)))));

    let (status, body) = post_json(app, "/api/predict", r#"{"Age":10}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["predicted_price"].is_number());
    assert_eq!(body["predicted_price"], json!(1e307));
}

#[tokio::test]
async fn test_metrics_disabled() {
    let (status, body) = get_text(create_test_app(), "/metrics").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "metrics disabled");
}

#[tokio::test]
async fn test_metrics_scrape() {
    let recorder = PrometheusBuilder::new().build_recorder();
    metrics::with_local_recorder(&recorder, || {
        telemetry::record_prediction("ok");
        telemetry::record_prediction("ok");
        telemetry::record_prediction("rejected");
    });

    let state = AppState::new(Some(loaded_model(false))).with_metrics(Some(recorder.handle()));
    let (status, body) = get_text(create_router(Arc::new(state)), "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("# TYPE car_price_predictions_total counter"));
    assert!(body.contains(r#"car_price_predictions_total{outcome="ok"} 2"#));
    assert!(body.contains(r#"car_price_predictions_total{outcome="rejected"} 1"#));
}
