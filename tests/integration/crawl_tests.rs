//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end: pages, downloads, manifest, archive.

use pdf_harvest::config::{Config, CrawlTarget};
use pdf_harvest::crawler::Coordinator;
use pdf_harvest::digest::digest_reader;
use pdf_harvest::output::{read_manifest, CrawlReport};
use pdf_harvest::url::ScopePath;
use pdf_harvest::HarvestError;
use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

fn pdf(content: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(content.to_vec(), "application/pdf")
}

fn target(server: &MockServer, start_path: &str, scope: &str, max_pages: u32) -> CrawlTarget {
    CrawlTarget::new(
        &format!("{}{}", server.uri(), start_path),
        ScopePath::new(scope),
        max_pages,
        Duration::ZERO,
    )
    .expect("valid start URL")
}

async fn run(target: CrawlTarget, out_dir: &Path) -> CrawlReport {
    Coordinator::new(Config::default(), target, out_dir)
        .expect("coordinator")
        .run()
        .await
        .expect("crawl run")
}

fn archive_entries(archive_path: &Path) -> Vec<String> {
    let file = File::open(archive_path).expect("archive exists");
    let mut archive = zip::ZipArchive::new(file).expect("valid zip");
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

async fn mount_get(server: &MockServer, p: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(p))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_section_crawl_end_to_end() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/docs",
        html(r#"<a href="/docs/p2">Next page</a> <a href="/files/a.pdf">Annual Report</a>"#),
        1,
    )
    .await;
    mount_get(
        &server,
        "/docs/p2",
        html(r#"<a href="/files/b.pdf">Download</a> <a href="/other">Elsewhere</a>"#),
        1,
    )
    .await;
    mount_get(&server, "/other", html(""), 0).await;
    mount_get(&server, "/files/a.pdf", pdf(b"%PDF-a"), 1).await;
    mount_get(&server, "/files/b.pdf", pdf(b"%PDF-bb"), 1).await;

    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");
    let report = run(target(&server, "/docs", "/docs", 10), &out_dir).await;

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.pages_processed, 2);
    assert_eq!(report.pdfs_discovered, 2);
    assert_eq!(report.pdfs_downloaded, 2);
    assert_eq!(report.download_failures, 0);
    assert!(!report.cancelled);

    let rows = read_manifest(&report.manifest_path).unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].pdf_url, format!("{}/files/a.pdf", server.uri()));
    assert_eq!(rows[0].local_path, "Annual Report - a.pdf");
    assert_eq!(rows[0].bytes, 6);
    assert_eq!(rows[0].sha256, digest_reader(&b"%PDF-a"[..]).unwrap().sha256);
    assert_eq!(rows[0].first_seen_page_url, format!("{}/docs", server.uri()));

    // Generic anchor text is dropped
    assert_eq!(rows[1].local_path, "b.pdf");
    assert_eq!(rows[1].bytes, 7);
    assert_eq!(rows[1].first_seen_page_url, format!("{}/docs/p2", server.uri()));

    assert_eq!(
        std::fs::read(out_dir.join("Annual Report - a.pdf")).unwrap(),
        b"%PDF-a"
    );
    assert_eq!(
        archive_entries(&report.archive_path),
        vec!["Annual Report - a.pdf", "b.pdf", "manifest.csv"]
    );
}

#[tokio::test]
async fn test_failures_are_isolated() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/docs",
        html(
            r#"
            <a href="/docs/broken">Broken</a>
            <a href="/docs/feed">Feed</a>
            <a href="/files/missing.pdf">Missing</a>
            <a href="/files/ok.pdf">Ok</a>
            "#,
        ),
        1,
    )
    .await;
    mount_get(&server, "/docs/broken", ResponseTemplate::new(500), 1).await;
    mount_get(
        &server,
        "/docs/feed",
        ResponseTemplate::new(200).set_body_raw(r#"{"links": ["/docs/hidden"]}"#, "application/json"),
        1,
    )
    .await;
    mount_get(&server, "/docs/hidden", html(""), 0).await;
    mount_get(&server, "/files/missing.pdf", ResponseTemplate::new(404), 1).await;
    mount_get(&server, "/files/ok.pdf", pdf(b"%PDF-ok"), 1).await;

    let dir = TempDir::new().unwrap();
    let report = run(target(&server, "/docs", "/docs", 10), dir.path()).await;

    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.pages_processed, 1);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.pages_non_html, 1);
    assert_eq!(report.pdfs_discovered, 2);
    assert_eq!(report.pdfs_downloaded, 1);
    assert_eq!(report.download_failures, 1);

    let rows = read_manifest(&report.manifest_path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].local_path, "Ok - ok.pdf");
    assert!(!dir.path().join("Missing - missing.pdf").exists());
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/docs",
        html(
            r#"
            <a href="/docs/1">1</a>
            <a href="/docs/2">2</a>
            <a href="/docs/3">3</a>
            <a href="/docs/4">4</a>
            "#,
        ),
        1,
    )
    .await;
    mount_get(&server, "/docs/1", html(""), 1).await;
    mount_get(&server, "/docs/2", html(""), 1).await;
    mount_get(&server, "/docs/3", html(""), 0).await;
    mount_get(&server, "/docs/4", html(""), 0).await;

    let dir = TempDir::new().unwrap();
    let report = run(target(&server, "/docs", "/docs", 3), dir.path()).await;

    assert_eq!(report.pages_visited, 3);
}

#[tokio::test]
async fn test_first_seen_page_wins() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/docs",
        html(r#"<a href="/docs/a">A</a> <a href="/docs/b">B</a>"#),
        1,
    )
    .await;
    mount_get(
        &server,
        "/docs/a",
        html(r#"<a href="/files/shared.pdf">From A</a>"#),
        1,
    )
    .await;
    mount_get(
        &server,
        "/docs/b",
        html(r#"<a href="/files/shared.pdf#page=3">From B</a>"#),
        1,
    )
    .await;
    mount_get(&server, "/files/shared.pdf", pdf(b"%PDF-shared"), 1).await;

    let dir = TempDir::new().unwrap();
    let report = run(target(&server, "/docs", "/docs", 10), dir.path()).await;

    assert_eq!(report.pdfs_discovered, 1);
    let rows = read_manifest(&report.manifest_path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].local_path, "From A - shared.pdf");
    assert_eq!(rows[0].first_seen_page_url, format!("{}/docs/a", server.uri()));
}

#[tokio::test]
async fn test_colliding_names_are_numbered() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/docs",
        html(
            r#"
            <a href="/one/report.pdf">PDF</a>
            <a href="/two/report.pdf">view</a>
            <a href="/three/REPORT.pdf"></a>
            "#,
        ),
        1,
    )
    .await;
    mount_get(&server, "/one/report.pdf", pdf(b"1"), 1).await;
    mount_get(&server, "/two/report.pdf", pdf(b"2"), 1).await;
    mount_get(&server, "/three/REPORT.pdf", pdf(b"3"), 1).await;

    let dir = TempDir::new().unwrap();
    let report = run(target(&server, "/docs", "/docs", 10), dir.path()).await;

    let names: Vec<_> = read_manifest(&report.manifest_path)
        .unwrap()
        .into_iter()
        .map(|row| row.local_path)
        .collect();
    assert_eq!(names, vec!["report.pdf", "report (2).pdf", "REPORT (3).pdf"]);
}

#[tokio::test]
async fn test_delay_follows_slow_responses() {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/docs",
        html(r#"<a href="/docs/p2">Next</a> <a href="/files/a.pdf">A</a>"#)
            .set_delay(Duration::from_millis(300)),
        1,
    )
    .await;
    mount_get(&server, "/docs/p2", html(""), 1).await;
    mount_get(
        &server,
        "/files/a.pdf",
        pdf(b"%PDF-a").set_delay(Duration::from_millis(300)),
        1,
    )
    .await;

    let delay = Duration::from_millis(200);
    let target = CrawlTarget::new(
        &format!("{}/docs", server.uri()),
        ScopePath::new("/docs"),
        10,
        delay,
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let start = Instant::now();
    let report = run(target, dir.path()).await;
    let elapsed = start.elapsed();

    assert_eq!(report.pdfs_downloaded, 1);
    // Slow page, pause, fast page, pause, slow download: 300 + 200 + 200 + 300
    assert!(
        elapsed >= Duration::from_millis(1000),
        "requests were not spaced after completion: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_run_without_pdfs_writes_empty_manifest() {
    let server = MockServer::start().await;
    mount_get(&server, "/docs", html("<p>Nothing here</p>"), 1).await;

    let dir = TempDir::new().unwrap();
    let report = run(target(&server, "/docs", "/docs", 10), dir.path()).await;

    assert_eq!(report.pdfs_discovered, 0);
    let content = std::fs::read_to_string(&report.manifest_path).unwrap();
    assert_eq!(content, "pdf_url,local_path,bytes,sha256,first_seen_page_url\n");
    assert_eq!(archive_entries(&report.archive_path), vec!["manifest.csv"]);
}

#[tokio::test]
async fn test_offsite_redirect_contributes_nothing() {
    let server = MockServer::start().await;
    let elsewhere = MockServer::start().await;

    mount_get(
        &server,
        "/docs",
        ResponseTemplate::new(302)
            .insert_header("location", format!("{}/docs", elsewhere.uri()).as_str()),
        1,
    )
    .await;
    mount_get(
        &elsewhere,
        "/docs",
        html(r#"<a href="/docs/x">X</a> <a href="/files/x.pdf">X</a>"#),
        1,
    )
    .await;
    mount_get(&server, "/docs/x", html(""), 0).await;
    mount_get(&elsewhere, "/docs/x", html(""), 0).await;
    mount_get(&elsewhere, "/files/x.pdf", pdf(b"x"), 0).await;

    let dir = TempDir::new().unwrap();
    let report = run(target(&server, "/docs", "/docs", 10), dir.path()).await;

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.pdfs_discovered, 0);
}

#[tokio::test]
async fn test_out_of_scope_start_fetches_nothing() {
    let server = MockServer::start().await;
    mount_get(&server, "/", html(r#"<a href="/docs">Docs</a>"#), 0).await;

    let dir = TempDir::new().unwrap();
    let report = run(target(&server, "/", "/docs", 10), dir.path()).await;

    assert_eq!(report.pages_visited, 0);
    assert!(report.manifest_path.exists());
}

#[test]
fn test_invalid_start_url_is_fatal() {
    let scope = ScopePath::new("/docs");

    for start in ["not a url", "ftp://example.com/docs", "file:///tmp/docs"] {
        let result = CrawlTarget::new(start, scope.clone(), 10, Duration::ZERO);
        assert!(
            matches!(result, Err(HarvestError::InvalidStartUrl { .. })),
            "{} should be rejected",
            start
        );
    }
}
