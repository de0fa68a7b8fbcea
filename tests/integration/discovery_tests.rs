//! Page discovery and fetcher behavior against a mock server

use crate::write_test_config;
use a11y_audit::crawler::{build_http_client, discover_pages, fetch_html, FetchResult};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

fn test_client(dir: &TempDir) -> reqwest::Client {
    let config = write_test_config(dir.path(), 1, false);
    build_http_client(&config).expect("Failed to build client")
}

#[tokio::test]
async fn test_budget_keeps_seed_and_first_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/first">First</a><a href="/second">Second</a><a href="/third">Third</a>"#,
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let seed = format!("{}/", server.uri());
    let pages = discover_pages(&test_client(&dir), &seed, 2).await;

    assert_eq!(pages, vec![seed.clone(), format!("{}/first", server.uri())]);
}

#[tokio::test]
async fn test_only_same_host_scannable_links_survive() {
    let server = MockServer::start().await;
    let port = url::Url::parse(&server.uri()).unwrap().port().unwrap();
    let body = format!(
        r##"<html><body>
            <a href="/about">About</a>
            <a href="http://localhost:{port}/elsewhere">Other host</a>
            <a href="https://partner.example.org/">Partner</a>
            <a href="mailto:team@example.com">Mail</a>
            <a href="#top">Top</a>
            <a href="/report.pdf">Report</a>
            <a href="/checkout">Checkout</a>
            <a href="/blog/?utm_source=nav">Tracked</a>
            <a href="/about#team">About again</a>
            <a href="contact">Contact</a>
        </body></html>"##,
        port = port
    );
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&body))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let seed = format!("{}/", server.uri());
    let pages = discover_pages(&test_client(&dir), &seed, 10).await;

    assert_eq!(
        pages,
        vec![
            seed.clone(),
            format!("{}/about", server.uri()),
            format!("{}/contact", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_failed_seed_fetch_degrades_to_seed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let seed = format!("{}/", server.uri());
    let pages = discover_pages(&test_client(&dir), &seed, 5).await;

    assert_eq!(pages, vec![seed]);
}

#[tokio::test]
async fn test_budget_of_one_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(r#"<a href="/a">A</a>"#))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let seed = format!("{}/", server.uri());
    let pages = discover_pages(&test_client(&dir), &seed, 1).await;

    assert_eq!(pages, vec![seed]);
}

#[tokio::test]
async fn test_fetch_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestAuditor/1.0 (+https://example.com/about)",
        ))
        .respond_with(html("<title>ok</title>"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let result = fetch_html(&test_client(&dir), &format!("{}/", server.uri())).await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_fetch_classifies_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let location = format!("{}/new", server.uri());
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", location.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("<title>moved</title>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = test_client(&dir);

    let missing = fetch_html(&client, &format!("{}/missing", server.uri())).await;
    assert!(matches!(missing, FetchResult::HttpError { status_code: 404 }));

    match fetch_html(&client, &format!("{}/old", server.uri())).await {
        FetchResult::Success {
            final_url,
            status_code,
            body,
        } => {
            assert_eq!(final_url, format!("{}/new", server.uri()));
            assert_eq!(status_code, 200);
            assert_eq!(body, "<title>moved</title>");
        }
        other => panic!("expected redirect to be followed, got {:?}", other),
    }
}
