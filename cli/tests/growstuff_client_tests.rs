//! Growstuff client tests
//!
//! Runs the client against an in-process axum server that stands in for
//! growstuff.org:
//! - 200 with a crop document decodes to a CropRecord
//! - 404 is NotFound, any other failure status is Transient
//! - bodies that do not match the crop schema are MalformedResponse
//! - slugs travel as a single encoded path segment

use std::time::Duration;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use growing_recs::config::ApiConfig;
use growing_recs::{CropSource, FetchError, GrowstuffClient};
use serde_json::json;
use shared::PlantingEntry;

async fn crop_document(Path(file): Path<String>) -> Response {
    match file.as_str() {
        "tomato.json" => Json(json!({
            "id": 1,
            "name": "tomato",
            "slug": "tomato",
            "plantings_count": 3,
            "plantings": [
                {"planted_from": "seed", "sunniness": "sun"},
                {"planted_from": "seed", "sunniness": "sun"},
                {"planted_from": "seedling", "sunniness": "semi-shade"}
            ]
        }))
        .into_response(),
        "sweet-corn.json" => Json(json!({"plantings_count": 0, "plantings": []})).into_response(),
        "bok-choy/pak-choi.json" => {
            Json(json!({"plantings_count": 1, "plantings": [{"planted_from": "seed", "sunniness": null}]}))
                .into_response()
        }
        "busy.json" => (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response(),
        "limited.json" => (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response(),
        "html.json" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        "partial.json" => Json(json!({"plantings_count": 2})).into_response(),
        "slow.json" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"plantings_count": 0, "plantings": []})).into_response()
        }
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Start the fixture server and return its base URL
async fn spawn_growstuff() -> String {
    let app = Router::new().route("/crops/:file", get(crop_document));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn client() -> GrowstuffClient {
    GrowstuffClient::with_base_url(spawn_growstuff().await).unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_crop() {
    let record = client().await.get_crop("tomato").await.unwrap();

    assert_eq!(record.plantings_count, 3);
    assert_eq!(record.plantings.len(), 3);
    assert_eq!(record.plantings[2], PlantingEntry::new("seedling", "semi-shade"));
}

#[tokio::test]
async fn fetches_crop_with_no_plantings() {
    let record = client().await.get_crop("sweet-corn").await.unwrap();

    assert_eq!(record.plantings_count, 0);
    assert!(record.plantings.is_empty());
}

#[tokio::test]
async fn works_through_crop_source_trait() {
    let client = client().await;
    let source: &dyn CropSource = &client;

    let record = source.fetch_crop("tomato").await.unwrap();
    assert_eq!(record.plantings_count, 3);
}

#[tokio::test]
async fn unknown_crop_is_not_found() {
    let err = client().await.get_crop("triffid").await.unwrap_err();

    match err {
        FetchError::NotFound { slug } => assert_eq!(slug, "triffid"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn server_error_is_transient() {
    let err = client().await.get_crop("busy").await.unwrap_err();

    match err {
        FetchError::Transient { status, message } => {
            assert_eq!(status, Some(503));
            assert!(message.contains("try later"));
        }
        other => panic!("expected Transient, got {:?}", other),
    }
}

#[tokio::test]
async fn rate_limit_is_transient() {
    let err = client().await.get_crop("limited").await.unwrap_err();
    assert!(matches!(err, FetchError::Transient { status: Some(429), .. }));
}

#[tokio::test]
async fn unreachable_server_is_transient() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GrowstuffClient::with_base_url(format!("http://{}", addr)).unwrap();
    let err = client.get_crop("tomato").await.unwrap_err();

    assert!(matches!(err, FetchError::Transient { status: None, .. }));
}

#[tokio::test]
async fn timeout_is_transient() {
    let client = GrowstuffClient::new(&ApiConfig {
        base_url: spawn_growstuff().await,
        timeout_secs: 1,
    })
    .unwrap();

    let err = client.get_crop("slow").await.unwrap_err();
    assert!(matches!(err, FetchError::Transient { status: None, .. }));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let err = client().await.get_crop("html").await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_plantings_is_malformed() {
    let err = client().await.get_crop("partial").await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse(_)));
}

#[tokio::test]
async fn slug_is_sent_as_one_path_segment() {
    let record = client().await.get_crop("bok-choy/pak-choi").await.unwrap();

    assert_eq!(record.plantings_count, 1);
    assert_eq!(record.plantings[0].sunniness, None);
}
