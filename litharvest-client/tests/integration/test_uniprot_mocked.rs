//! UniProtKB entry fetch against a mocked REST server

#[path = "common.rs"]
mod common;

use common::mock_config;
use litharvest_client::{HarvestError, UniProtClient};
use tracing_test::traced_test;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[traced_test]
async fn test_fetch_summary() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/P00533"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "primaryAccession": "P00533",
            "comments": [
                {"commentType": "FUNCTION"},
                {"commentType": "SUBUNIT"},
                {"commentType": "FUNCTION"}
            ],
            "features": [
                {"type": "Signal"},
                {"type": "Chain"},
                {"type": "Domain"},
                {"type": "domain"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UniProtClient::with_config(mock_config(&mock_server)).unwrap();
    let (entry, summary) = client.fetch_summary("P00533").await.unwrap();

    assert_eq!(entry["primaryAccession"], "P00533");
    assert_eq!(summary.accession, "P00533");
    assert_eq!(summary.comment_types, vec!["FUNCTION", "SUBUNIT", "FUNCTION"]);
    assert_eq!(summary.feature_types, vec!["signal", "chain", "domain"]);
}

#[tokio::test]
#[traced_test]
async fn test_error_status_carries_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/NOPE"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"messages":["The 'accession' value has invalid format"]}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UniProtClient::with_config(mock_config(&mock_server)).unwrap();
    let err = client.fetch_entry("NOPE").await.unwrap_err();

    match err {
        HarvestError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid format"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_entry_without_lists() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/Q99999"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"entryType": "Inactive"})),
        )
        .mount(&mock_server)
        .await;

    let client = UniProtClient::with_config(mock_config(&mock_server)).unwrap();
    let (_, summary) = client.fetch_summary("Q99999").await.unwrap();

    assert!(summary.comment_types.is_empty());
    assert!(summary.feature_types.is_empty());
}
