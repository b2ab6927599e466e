//! PMC EFetch / ESearch against a mocked E-utilities server

#[path = "common.rs"]
mod common;

use common::{mock_config, read_fixture, read_jsonl};
use litharvest_client::{HarvestError, JsonlWriter, PmcClient};
use tempfile::tempdir;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn xml_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/xml")
}

async fn mount_efetch(mock_server: &MockServer, pmcid: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pmc"))
        .and(query_param("id", pmcid))
        .and(query_param("rettype", "full"))
        .and(query_param("retmode", "xml"))
        .respond_with(response)
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
#[traced_test]
async fn test_fetch_record_joins_paragraphs() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        "PMC6847991",
        xml_response(read_fixture("xml/PMC6847991.xml")),
    )
    .await;

    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();
    let record = client
        .fetch_record("PMC6847991")
        .await
        .expect("fetch should succeed")
        .expect("article has a body");

    assert_eq!(record.pmcid, "PMC6847991");
    assert_eq!(
        record.title,
        "Self-Emulsifying Drug Delivery Systems: Excipient Selection & Performance"
    );
    assert_eq!(
        record.text,
        "Lipid-based formulations improve the oral bioavailability of poorly soluble drugs [1].\n\
         Surfactants with an HLB > 12 favour fine o/w emulsions.\n\
         Polysorbate 80 and Capryol\u{2122} 90 were obtained commercially.\n\
         Droplet size distribution."
    );
}

#[tokio::test]
#[traced_test]
async fn test_harvest_skips_missing_body_and_survives_http_errors() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        "PMC1",
        xml_response(read_fixture("xml/no_body.xml")),
    )
    .await;
    mount_efetch(&mock_server, "PMC2", ResponseTemplate::new(500)).await;
    mount_efetch(
        &mock_server,
        "PMC3",
        xml_response("<article><body><sec/></body></article>".to_string()),
    )
    .await;
    mount_efetch(
        &mock_server,
        "PMC6847991",
        xml_response(read_fixture("xml/PMC6847991.xml")),
    )
    .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("test_1.jsonl");
    let mut writer = JsonlWriter::open_append(&output).await.unwrap();

    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();
    let report = client
        .harvest(&["PMC1", "PMC2", "PMC3", "PMC6847991"], &mut writer)
        .await
        .expect("harvest should not abort");

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, vec!["PMC1", "PMC3"]);
    assert_eq!(report.failed, vec!["PMC2"]);
    assert_eq!(report.attempted(), 4);

    let records = read_jsonl(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["pmcid"], "PMC6847991");
}

#[tokio::test]
#[traced_test]
async fn test_error_document_is_not_available() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        "PMC9",
        xml_response("<pmc-articleset><ERROR>Invalid id</ERROR></pmc-articleset>".to_string()),
    )
    .await;

    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();
    let err = client.fetch_xml("PMC9").await.unwrap_err();

    assert!(matches!(err, HarvestError::PmcNotAvailableById { ref pmcid } if pmcid == "PMC9"));
}

#[tokio::test]
async fn test_invalid_pmcid_makes_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();
    let err = client.fetch_xml("PMCabc").await.unwrap_err();

    assert!(matches!(err, HarvestError::InvalidPmcid { .. }));
}

#[tokio::test]
async fn test_api_params_are_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("api_key", "KEY"))
        .and(query_param("email", "curator@example.org"))
        .respond_with(xml_response(
            "<article><body><p>x</p></body></article>".to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = mock_config(&mock_server)
        .with_api_key("KEY")
        .with_email("curator@example.org");
    let client = PmcClient::with_config(config).unwrap();

    let record = client.fetch_record("12").await.unwrap().unwrap();
    assert_eq!(record.pmcid, "PMC12");
    assert_eq!(record.text, "x");
}

#[tokio::test]
#[traced_test]
async fn test_search_pmcids_normalizes_ids() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pmc"))
        .and(query_param("term", "emulsifying excipients"))
        .and(query_param("retmax", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": {
                "count": "120",
                "retmax": "2",
                "idlist": ["6847991", "7906746"]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();
    let ids = client
        .search_pmcids("emulsifying excipients", 2)
        .await
        .unwrap();

    assert_eq!(ids, vec!["PMC6847991", "PMC7906746"]);
}

#[tokio::test]
async fn test_search_pmcids_reports_eutils_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": {"ERROR": "Invalid query syntax"}
        })))
        .mount(&mock_server)
        .await;

    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();
    let err = client.search_pmcids("((", 5).await.unwrap_err();

    assert!(matches!(err, HarvestError::EutilsError(ref m) if m == "Invalid query syntax"));
}

#[tokio::test]
#[traced_test]
async fn test_record_pmcid_is_normalized() {
    let mock_server = MockServer::start().await;
    mount_efetch(
        &mock_server,
        "PMC6847991",
        xml_response(read_fixture("xml/PMC6847991.xml")),
    )
    .await;

    let client = PmcClient::with_config(mock_config(&mock_server)).unwrap();
    let record = client
        .fetch_record("6847991")
        .await
        .expect("fetch should succeed")
        .expect("article has a body");

    assert_eq!(record.pmcid, "PMC6847991");
}
