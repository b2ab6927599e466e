//! Append semantics of the JSON Lines output

#[path = "common.rs"]
mod common;

use common::{mock_config, read_fixture, read_jsonl};
use litharvest_client::{JsonlWriter, MdpiRecord, PmcClient};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_repeated_runs_append_duplicates() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(read_fixture("xml/PMC6847991.xml")),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("test_1.jsonl");
    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();

    for _ in 0..2 {
        let mut writer = JsonlWriter::open_append(&output).await.unwrap();
        client.harvest(&["PMC6847991"], &mut writer).await.unwrap();
    }

    let records = read_jsonl(&output);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
}

#[tokio::test]
async fn test_non_ascii_written_verbatim() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("mdpi.jsonl");

    let mut writer = JsonlWriter::open_append(&output).await.unwrap();
    writer
        .write_record(&MdpiRecord {
            mdpi_id: "1166".to_string(),
            title: "Capryol\u{2122} 90 – β-Cyclodextrin".to_string(),
            url_path: "/1999-4923/17/9/1166".to_string(),
            text: "línea 1\nlínea 2".to_string(),
        })
        .await
        .unwrap();
    writer.flush().await.unwrap();

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains("Capryol\u{2122} 90 – β-Cyclodextrin"));
    assert!(raw.contains(r#""text":"línea 1\nlínea 2""#));
    assert!(raw.ends_with("}\n"));
    assert_eq!(raw.lines().count(), 1);
}

#[tokio::test]
async fn test_output_file_created_when_missing() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("fresh.jsonl");
    assert!(!output.exists());

    let writer = JsonlWriter::open_append(&output).await.unwrap();

    assert!(output.exists());
    assert_eq!(writer.path(), output.as_path());
    assert_eq!(writer.written(), 0);
}
