//! HttpBackend against a local fake compute endpoint

#![cfg(feature = "http")]
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use keypad_calc::prelude::*;
use serde_json::json;
use std::collections::HashMap;

fn operand(params: &HashMap<String, String>, key: &str) -> Option<f64> {
    params.get(key).and_then(|v| v.parse().ok())
}

async fn compute(
    Path(operation): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (Some(a), b) = (operand(&params, "operand_1"), operand(&params, "operand_2")) else {
        return (StatusCode::BAD_REQUEST, "missing operand_1").into_response();
    };
    let result = match (operation.as_str(), b) {
        ("sum", Some(b)) => json!(a + b),
        ("subtract", Some(b)) => json!(a - b),
        ("multiply", Some(b)) => json!(a * b),
        ("divide", Some(b)) => json!(a / b),
        ("pow", Some(b)) => json!(a.powf(b)),
        // serde_json writes NaN as null; the endpoint spells it out
        ("sqrt", None) if a < 0.0 => json!("NaN"),
        ("sqrt", None) => json!(a.sqrt()),
        _ => return (StatusCode::NOT_FOUND, "unknown operation").into_response(),
    };
    Json(json!({ "result": result })).into_response()
}

async fn spawn_endpoint() -> String {
    let app = Router::new().route("/api/{operation}", get(compute));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn test_sum() {
    let backend = HttpBackend::new(spawn_endpoint().await);
    let request = ComputationRequest::binary(Operator::Add, "9", "5");
    assert_eq!(backend.compute(&request).await.unwrap(), 14.0);
}

#[tokio::test]
async fn test_each_binary_operation() {
    let backend = HttpBackend::new(spawn_endpoint().await);
    let cases = [
        (Operator::Subtract, "4", "3", 1.0),
        (Operator::Multiply, "4", "3", 12.0),
        (Operator::Divide, "12", "4", 3.0),
        (Operator::Power, "4", "3", 64.0),
    ];
    for (op, a, b, expected) in cases {
        let request = ComputationRequest::binary(op, a, b);
        assert_eq!(backend.compute(&request).await.unwrap(), expected, "{op}");
    }
}

#[tokio::test]
async fn test_sqrt_of_negative_is_nan() {
    let backend = HttpBackend::new(spawn_endpoint().await);
    let value = backend
        .compute(&ComputationRequest::square_root("-4"))
        .await
        .unwrap();
    assert!(value.is_nan());
}

#[tokio::test]
async fn test_missing_route_is_api_error() {
    let base = spawn_endpoint().await;
    let broken = HttpBackend::new(format!("{base}/missing"));
    let request = ComputationRequest::binary(Operator::Add, "1", "1");
    assert!(matches!(
        broken.compute(&request).await,
        Err(CalcError::Api { status: 404, .. })
    ));
    assert_eq!(Dispatcher::new(broken).dispatch(&request).await, None);
}

#[tokio::test]
async fn test_unreachable_endpoint_dispatches_none() {
    let dispatcher = Dispatcher::new(HttpBackend::new("http://127.0.0.1:9/api"));
    let request = ComputationRequest::binary(Operator::Add, "9", "5");
    assert_eq!(dispatcher.dispatch(&request).await, None);
}

#[tokio::test]
async fn test_session_over_http() {
    let backend = HttpBackend::new(spawn_endpoint().await);
    let mut session = Session::new(backend, MemoryStore::new());

    session.input_all(["9", "+", "5", "-"]).await;
    assert_eq!(session.display().upper, "14 -");

    session.input_all(["4", "="]).await;
    assert_eq!(session.display().expression, "10");
    assert_eq!(session.display().history, vec!["14 - 4 = 10"]);

    session.input_all(["AC", "-", "9", "√"]).await;
    assert_eq!(session.display().expression, NOT_REAL);
    assert_eq!(session.display().history[0], "√-9 = Not Real!");
}
