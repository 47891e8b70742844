//! Integration tests for the crawl pipeline
//!
//! These tests use wiremock to stand in for the paging endpoint and drive
//! the full fetch -> extract -> paginate -> finalize cycle end-to-end.

use fi_alerts::config::Config;
use fi_alerts::crawler::Paginator;
use fi_alerts::dataset::Dataset;
use fi_alerts::output::XlsxSink;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT_PATH: &str = "/ajaxsearch/GetWarnedCompanyPagingResults";

/// Creates a test configuration pointing at the mock server
fn test_config(base_uri: &str) -> Config {
    let mut config = Config::default();
    config.search.endpoint = format!("{}{}", base_uri, ENDPOINT_PATH);
    config.vpn.enabled = false;
    config
}

fn paging_fragment(token: &str) -> String {
    format!(r#"<div id="paging" data-page="{}"></div>"#, token)
}

const PAGE_0_ROW: &str = r#"<ul>
    <li>
        2024-01-15
        <h3>Company A / Company B</h3>
        <p class="listing-introduction">Warning from:
            <a href="/en/alert/1">FSA One:</a>
        </p>
    </li>
    <li>
        2024-02-20
        <h3>Other Broker Ltd</h3>
        <p class="listing-introduction">Warning from:
            <a href="htt://broken.example/x">Tipster</a>
        </p>
    </li>
</ul>"#;

const PAGE_1_ROW: &str = r#"<ul>
    <li>
        2024-03-01
        <h3>Third Company</h3>
        <p class="listing-introduction">Warning from:
            <a href="/en/alert/3">FSA Three</a>
        </p>
    </li>
</ul>"#;

#[tokio::test]
async fn test_two_page_crawl_accumulates_in_order() {
    let mock_server = MockServer::start().await;

    // Page 0: two listings plus a pagination control pointing at page 1
    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("q", "*"))
        .and(query_param("take", "10"))
        .and(query_param("lang", "en"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_0_ROW, "paging": paging_fragment("1") }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 1: one listing, empty paging fragment ends the crawl
    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_1_ROW, "paging": "" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut paginator = Paginator::new(test_config(&mock_server.uri())).unwrap();
    paginator.run().await.expect("crawl failed");

    assert_eq!(paginator.pages_fetched(), 2);

    let records = paginator.into_records();
    assert_eq!(records.len(), 3);

    // Page-ascending, within-page document order
    assert_eq!(records[0].headline, "Company A | Company B");
    assert_eq!(records[0].date, "2024-01-15");
    assert_eq!(records[0].external_url, "https://www.fi.se/en/alert/1");
    assert_eq!(records[0].source, "FSA One");
    assert_eq!(
        records[0].url,
        "https://www.fi.se/en/our-registers/investor-alerts/"
    );

    assert_eq!(records[1].headline, "Other Broker Ltd");
    assert_eq!(records[1].external_url, "http://broken.example/x");

    assert_eq!(records[2].headline, "Third Company");
    assert_eq!(records[2].date, "2024-03-01");

    // Finalize into a real workbook with 1-based ids
    let dir = tempfile::tempdir().unwrap();
    let workbook_path = dir.path().join("alerts.xlsx");
    let mut dataset = Dataset::new(records);
    assert!(dataset.finalize(&XlsxSink, &workbook_path));
    assert!(workbook_path.exists());

    let ids: Vec<String> = dataset.export_rows().iter().map(|row| row[0].clone()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[tokio::test]
async fn test_absent_paging_stops_after_one_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_1_ROW }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut paginator = Paginator::new(test_config(&mock_server.uri())).unwrap();
    paginator.run().await.expect("crawl failed");

    assert_eq!(paginator.pages_fetched(), 1);
    assert_eq!(paginator.records().len(), 1);
}

#[tokio::test]
async fn test_zero_records_produce_no_workbook() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": "<ul></ul>", "paging": "" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut paginator = Paginator::new(test_config(&mock_server.uri())).unwrap();
    paginator.run().await.expect("crawl failed");

    let dir = tempfile::tempdir().unwrap();
    let workbook_path = dir.path().join("alerts.xlsx");
    let mut dataset = Dataset::new(paginator.into_records());

    assert!(!dataset.finalize(&XlsxSink, &workbook_path));
    assert!(!workbook_path.exists());
}

#[tokio::test]
async fn test_duplicate_rows_across_pages_collapse() {
    let mock_server = MockServer::start().await;

    // The same listing markup on both pages
    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_1_ROW, "paging": paging_fragment("1") }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_1_ROW }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut paginator = Paginator::new(test_config(&mock_server.uri())).unwrap();
    paginator.run().await.expect("crawl failed");

    let mut dataset = Dataset::new(paginator.into_records());
    assert_eq!(dataset.len(), 2);

    dataset.clean();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].headline, "Third Company");
}

#[tokio::test]
async fn test_mid_crawl_failure_keeps_prior_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_0_ROW, "paging": paging_fragment("1") }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut paginator = Paginator::new(test_config(&mock_server.uri())).unwrap();
    let result = paginator.run().await;
    assert!(result.is_err());

    // Records from the successful page survive the abort and still export
    let records = paginator.into_records();
    assert_eq!(records.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let workbook_path = dir.path().join("partial.xlsx");
    let mut dataset = Dataset::new(records);
    assert!(dataset.finalize(&XlsxSink, &workbook_path));
    assert!(workbook_path.exists());
}

#[tokio::test]
async fn test_max_pages_bound_stops_the_loop() {
    let mock_server = MockServer::start().await;

    // Every page advertises another one; only the bound ends the crawl
    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_1_ROW, "paging": paging_fragment("1") }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": { "row": PAGE_1_ROW, "paging": paging_fragment("2") }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.search.max_pages = 2;

    let mut paginator = Paginator::new(config).unwrap();
    paginator.run().await.expect("crawl failed");

    assert_eq!(paginator.pages_fetched(), 2);
}
