//! Integration tests for the stream operators over in-memory sequences.

use std::collections::HashMap;

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use serde::Deserialize;
use serde_json::json;

use aria::{Error, Response, ResponseStreamExt};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Track {
    name: String,
    duration_ms: u64,
}

fn page(status: u16, body: serde_json::Value) -> Result<Response<Bytes>, Error> {
    Ok(Response::new(
        status,
        HashMap::new(),
        Bytes::from(body.to_string()),
    ))
}

fn rate_limited(retry_after: Option<&str>) -> Result<Response<Bytes>, Error> {
    let mut headers = HashMap::new();
    if let Some(value) = retry_after {
        headers.insert("retry-after".to_string(), value.to_string());
    }
    Ok(Response::new(429, headers, Bytes::new()))
}

#[tokio::test]
async fn decode_a_whole_sequence() {
    let upstream = stream::iter(vec![
        page(200, json!({"name": "So What", "duration_ms": 545_000})),
        page(200, json!({"name": "Freddie Freeloader", "duration_ms": 586_000})),
        page(200, json!({"name": "Blue in Green", "duration_ms": 337_000})),
    ]);

    let tracks: Vec<Track> = upstream
        .decode_json::<Track>()
        .map(|item| item.expect("track"))
        .collect()
        .await;

    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0].name, "So What");
    assert_eq!(tracks[2].name, "Blue in Green");
}

#[tokio::test]
async fn stages_compose() {
    // filter_error_shapes in front of decode_json: the filter surfaces the
    // error body, the decoder never sees it
    let upstream = stream::iter(vec![
        page(200, json!({"name": "So What", "duration_ms": 545_000})),
        page(
            404,
            json!({"error": {"status": 404, "message": "not found"}}),
        ),
        page(200, json!({"name": "never-reached", "duration_ms": 1})),
    ]);

    let mut items = upstream.filter_error_shapes().decode_json::<Track>();

    let first = items.next().await.expect("first").expect("track");
    assert_eq!(first.name, "So What");

    let err = items
        .next()
        .await
        .expect("the failure")
        .expect_err("api error");
    assert_eq!(err.status(), Some(404));

    assert!(items.next().await.is_none());
}

#[tokio::test]
async fn rate_limit_terminates_the_sequence() {
    let upstream = stream::iter(vec![
        page(200, json!({"name": "a", "duration_ms": 1})),
        rate_limited(Some("120")),
        page(200, json!({"name": "never-reached", "duration_ms": 2})),
    ]);

    let mut tracks = upstream.decode_json::<Track>();

    assert!(tracks.next().await.expect("first").is_ok());

    let err = tracks
        .next()
        .await
        .expect("the failure")
        .expect_err("rate limited");
    assert!(err.is_rate_limited());
    assert_eq!(err.retry_after(), Some(120));

    // No element is emitted after the failure
    assert!(tracks.next().await.is_none());
}

#[tokio::test]
async fn rate_limit_without_hint_still_fails_the_sequence() {
    let upstream = stream::iter(vec![rate_limited(None)]);

    let mut tracks = upstream.decode_json::<Track>();
    let err = tracks
        .next()
        .await
        .expect("the failure")
        .expect_err("rate limited");
    assert!(err.is_rate_limited());
    assert_eq!(err.retry_after(), None);
}

#[tokio::test]
async fn undecodable_element_yields_diagnostic() {
    let upstream = stream::iter(vec![page(200, json!({"name": "Mix", "public": true}))]);

    let mut tracks = upstream.decode_json::<Track>();
    let err = tracks
        .next()
        .await
        .expect("the failure")
        .expect_err("diagnostic");

    let Error::Decoding(diagnostic) = err else {
        panic!("expected a decoding diagnostic, got {err:?}");
    };
    assert_eq!(diagnostic.status, 200);
    assert!(diagnostic.expected.contains("Track"));

    assert!(tracks.next().await.is_none());
}

#[tokio::test]
async fn filter_passes_payload_through_unchanged() {
    let body = json!({"name": "So What", "duration_ms": 545_000});
    let upstream = stream::iter(vec![page(200, body.clone())]);

    let mut filtered = upstream.filter_error_shapes();
    let response = filtered
        .next()
        .await
        .expect("one element")
        .expect("clean response");

    assert_eq!(response.status(), 200);
    assert_eq!(response.body().as_ref(), body.to_string().as_bytes());
}
