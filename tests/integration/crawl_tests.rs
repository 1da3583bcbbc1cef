//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use minicrawler::config::Config;
use minicrawler::crawler::{run_crawl, Coordinator};
use minicrawler::{discover_site_urls, CrawlError, SkipReason};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no pacing and a short timeout
fn create_test_config(max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.delay_ms = 0;
    config.crawler.request_timeout_ms = 1_000;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

fn html(body: &str) -> ResponseTemplate {
    html_with_status(200, body)
}

fn html_with_status(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(
        format!("<html><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Mounts a page that must never be requested
async fn mount_forbidden(server: &MockServer, page: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html("must not be fetched"))
        .expect(0)
        .mount(server)
        .await;
}

fn paths(urls: &[url::Url]) -> Vec<String> {
    urls.iter().map(|u| u.path().to_string()).collect()
}

fn seed(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

#[tokio::test]
async fn test_breadth_first_with_page_cap() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_page(&server, "/a", r#"<a href="/c">C</a>"#).await;
    mount_page(&server, "/b", "no links").await;
    mount_forbidden(&server, "/c").await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(3))
        .await
        .unwrap();

    assert_eq!(paths(&urls), vec!["/", "/a", "/b"]);
}

#[tokio::test]
async fn test_crawl_exhausts_small_site() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_page(&server, "/a", r#"<a href="/c">C</a><a href="/">home</a>"#).await;
    mount_page(&server, "/b", r#"<a href="a">A again</a>"#).await;
    mount_page(&server, "/c", "leaf").await;

    let report = run_crawl(&seed(&server), &create_test_config(50))
        .await
        .unwrap();

    assert_eq!(paths(&report.pages), vec!["/", "/a", "/b", "/c"]);
    assert_eq!(report.stats.accepted, 4);
    assert_eq!(report.stats.urls_seen, 4);
    assert_eq!(report.stats.frontier_remaining, 0);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_page(
        &server,
        "/",
        r#"<a href="/private/secret">secret</a><a href="/public">public</a>"#,
    )
    .await;
    mount_page(&server, "/public", "open").await;
    mount_forbidden(&server, "/private/secret").await;

    let report = run_crawl(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&report.pages), vec!["/", "/public"]);
    assert_eq!(report.stats.skipped_for(SkipReason::RobotsDenied), 1);
}

#[tokio::test]
async fn test_robots_group_for_our_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "User-agent: TestBot\nDisallow: /bots-keep-out\n\nUser-agent: *\nDisallow:\n",
        ))
        .mount(&server)
        .await;

    mount_page(&server, "/", r#"<a href="/bots-keep-out">x</a>"#).await;
    mount_forbidden(&server, "/bots-keep-out").await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&urls), vec!["/"]);
}

#[tokio::test]
async fn test_robots_server_error_fails_open() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_page(&server, "/", r#"<a href="/a">A</a>"#).await;
    mount_page(&server, "/a", "leaf").await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&urls), vec!["/", "/a"]);
}

#[tokio::test]
async fn test_robots_server_error_fails_closed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_forbidden(&server, "/").await;

    let mut config = create_test_config(10);
    config.robots.fail_open = false;

    let report = run_crawl(&seed(&server), &config).await.unwrap();

    assert!(report.pages.is_empty());
    assert_eq!(report.stats.skipped_for(SkipReason::RobotsDenied), 1);
    assert_eq!(report.stats.requests, 0);
}

#[tokio::test]
async fn test_robots_forbidden_denies_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    mount_forbidden(&server, "/").await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_deny_path_never_fetched() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/admin/panel">admin</a><a href="/ok">ok</a>"#,
    )
    .await;
    mount_page(&server, "/ok", "fine").await;
    mount_forbidden(&server, "/admin/panel").await;

    let mut config = create_test_config(10);
    config.scope.deny_paths = Some(vec!["/admin".to_string()]);

    let report = run_crawl(&seed(&server), &config).await.unwrap();

    assert_eq!(paths(&report.pages), vec!["/", "/ok"]);
    assert_eq!(report.stats.skipped_for(SkipReason::PathPolicy), 1);
}

#[tokio::test]
async fn test_allow_paths_restrict_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/docs/",
        r#"<a href="intro">intro</a><a href="/blog/post">blog</a>"#,
    )
    .await;
    mount_page(&server, "/docs/intro", "docs").await;
    mount_forbidden(&server, "/blog/post").await;

    let mut config = create_test_config(10);
    config.scope.allow_paths = Some(vec!["/docs".to_string()]);

    let urls = discover_site_urls(&format!("{}/docs/", server.uri()), &config)
        .await
        .unwrap();

    assert_eq!(paths(&urls), vec!["/docs/", "/docs/intro"]);
}

#[tokio::test]
async fn test_binary_asset_never_fetched() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/doc.pdf">pdf</a><a href="/photo.JPG">photo</a><a href="/page">page</a>"#,
    )
    .await;
    mount_page(&server, "/page", "text").await;
    mount_forbidden(&server, "/doc.pdf").await;
    mount_forbidden(&server, "/photo.JPG").await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&urls), vec!["/", "/page"]);
}

#[tokio::test]
async fn test_out_of_domain_links_not_followed() {
    let server = MockServer::start().await;
    let port = url::Url::parse(&server.uri()).unwrap().port().unwrap();

    // Same server, different host name
    mount_page(
        &server,
        "/",
        &format!(
            r#"<a href="http://localhost:{}/elsewhere">other host</a><a href="https://example.org/">far</a>"#,
            port
        ),
    )
    .await;
    mount_forbidden(&server, "/elsewhere").await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&urls), vec!["/"]);
}

#[tokio::test]
async fn test_non_html_response_excluded() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/data">data</a><a href="/next">next</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"links": ["/hidden"]}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/next", "next").await;

    let report = run_crawl(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&report.pages), vec!["/", "/next"]);
    assert_eq!(report.stats.skipped_for(SkipReason::NotHtml), 1);
}

#[tokio::test]
async fn test_html_error_page_accepted_and_expanded() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/gone">gone</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(html_with_status(404, r#"<a href="/child">child</a>"#))
        .mount(&server)
        .await;
    mount_page(&server, "/child", "found via error page").await;

    let report = run_crawl(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&report.pages), vec!["/", "/gone", "/child"]);
    assert_eq!(report.stats.skipped_for(SkipReason::HttpStatus), 0);
}

#[tokio::test]
async fn test_skip_error_status_drops_error_pages() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/missing">gone</a><a href="/here">here</a>"#).await;
    mount_page(&server, "/here", "present").await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(html_with_status(404, r#"<a href="/from-404">x</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    mount_forbidden(&server, "/from-404").await;

    let mut config = create_test_config(10);
    config.crawler.skip_error_status = true;

    let report = run_crawl(&seed(&server), &config).await.unwrap();

    assert_eq!(paths(&report.pages), vec!["/", "/here"]);
    assert_eq!(report.stats.skipped_for(SkipReason::HttpStatus), 1);
}

#[tokio::test]
async fn test_fragments_collapse_to_one_fetch() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r##"<a href="/a#sec1">one</a><a href="/a#sec2">two</a><a href="#top">top</a>"##,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html("section page"))
        .expect(1)
        .mount(&server)
        .await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    assert_eq!(paths(&urls), vec!["/", "/a"]);
    assert!(urls.iter().all(|u| u.fragment().is_none()));
}

#[tokio::test]
async fn test_timeout_does_not_halt_crawl() {
    let server = MockServer::start().await;

    mount_page(&server, "/", r#"<a href="/slow">slow</a><a href="/fast">fast</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("late").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    mount_page(&server, "/fast", "quick").await;

    let mut config = create_test_config(10);
    config.crawler.request_timeout_ms = 300;

    let report = run_crawl(&seed(&server), &config).await.unwrap();

    assert_eq!(paths(&report.pages), vec!["/", "/fast"]);
    assert_eq!(report.stats.skipped_for(SkipReason::Network), 1);
}

#[tokio::test]
async fn test_cap_respected_without_duplicates() {
    let server = MockServer::start().await;

    let hub: String = (1..=8)
        .map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", &hub).await;
    for i in 1..=8 {
        // Every page links back to the hub and to all its siblings
        mount_page(&server, &format!("/p{}", i), &hub).await;
    }

    let urls = discover_site_urls(&seed(&server), &create_test_config(5))
        .await
        .unwrap();

    assert_eq!(urls.len(), 5);
    let mut unique = paths(&urls);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 5);
}

#[tokio::test]
async fn test_redirected_seed_still_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/home"))
        .mount(&server)
        .await;
    mount_page(&server, "/home", r#"<a href="/about">about</a>"#).await;
    mount_page(&server, "/about", "about").await;

    let urls = discover_site_urls(&seed(&server), &create_test_config(10))
        .await
        .unwrap();

    // The requested URL is recorded, not the redirect target
    assert_eq!(paths(&urls), vec!["/", "/about"]);
}

#[tokio::test]
async fn test_invalid_seed_rejected_before_io() {
    let config = create_test_config(10);

    assert!(matches!(
        discover_site_urls("ftp://example.com/", &config).await,
        Err(CrawlError::Url(_))
    ));
    assert!(matches!(
        discover_site_urls("/relative/only", &config).await,
        Err(CrawlError::Url(_))
    ));
    assert!(Coordinator::new("mailto:someone@example.com", &config).is_err());
}
