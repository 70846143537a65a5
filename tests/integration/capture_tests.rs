//! Integration tests for the capture engine
//!
//! These tests use wiremock to create mock HTTP servers and drive the
//! fetcher, the asset capturer and the page orchestrator end-to-end.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use sumi_capture::archive::{ArchiveError, Archiver, TempArtifact};
use sumi_capture::config::{
    ArchiveConfig, Config, CrawlerConfig, ProxyConfig, SeencheckConfig, UserAgentConfig,
};
use sumi_capture::crawler::{
    build_get, frontier_channel, run_crawl, CaptureItem, CaptureOutcome, CaptureSettings,
    CapturedResponse, CrawlContext, FrontierReceiver, HttpClients, ItemType,
};
use sumi_capture::storage::SqliteSeenStore;
use sumi_capture::CaptureError;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test environment: crawl context plus the directories it writes to
struct Harness {
    ctx: Arc<CrawlContext>,
    receiver: FrontierReceiver,
    dir: TempDir,
}

impl Harness {
    fn temp_files(&self) -> usize {
        count_files(&self.dir.path().join("temp"))
    }

    fn records(&self) -> String {
        String::from_utf8_lossy(&self.raw_records()).into_owned()
    }

    fn raw_records(&self) -> Vec<u8> {
        let records_dir = self.dir.path().join("records");
        let mut contents = Vec::new();
        for entry in std::fs::read_dir(records_dir).unwrap() {
            contents.extend(std::fs::read(entry.unwrap().path()).unwrap());
        }
        contents
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

fn create_test_config(dir: &TempDir, archive: bool) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_hops: 3,
            max_redirect: 20,
            max_retry: 0,
            http_timeout: 5,
            workers: 4,
            seencheck: true,
            disable_assets_capture: false,
            capture_alternate_pages: false,
            disabled_html_tags: vec![],
            crawl_time_limit: 0,
            exclude_hosts: vec![],
            include_hosts: vec![],
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        archive: ArchiveConfig {
            enabled: archive,
            temp_dir: dir.path().join("temp").to_string_lossy().to_string(),
            output_dir: dir.path().join("records").to_string_lossy().to_string(),
        },
        proxy: None,
        seencheck: SeencheckConfig::default(),
        seeds: vec![],
    }
}

fn harness_with(archive: bool, adjust: impl FnOnce(&mut Config)) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&dir, archive);
    adjust(&mut config);
    let (ctx, receiver) = CrawlContext::from_config(&config).expect("Failed to build context");
    Harness { ctx, receiver, dir }
}

fn harness() -> Harness {
    harness_with(true, |_| {})
}

fn url(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

fn redirect(status: u16, location: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("location", location)
}

async fn mount(server: &MockServer, p: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(p))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_redirect_chain_stops_at_budget() {
    let server = MockServer::start().await;
    mount(&server, "/r0", redirect(302, "/r1"), 1).await;
    mount(&server, "/r1", redirect(302, "/r2"), 1).await;
    mount(&server, "/r2", redirect(302, "/r3"), 1).await;
    mount(&server, "/r3", html("<html></html>"), 0).await;

    let h = harness_with(true, |c| c.crawler.max_redirect = 2);
    let start = url(&server, "/r0");
    let item = Arc::new(CaptureItem::seed(start.clone()));

    let fetched = h.ctx.execute_get(item, build_get(&start)).await.unwrap();

    assert_eq!(fetched.response.status.as_u16(), 302);
    assert_eq!(fetched.response.url.path(), "/r2");
    assert_eq!(fetched.redirects, 2);
    assert!(!fetched.artifact.is_empty());
    fetched.artifact.delete();
}

#[tokio::test]
async fn test_intermediate_artifacts_deleted() {
    let server = MockServer::start().await;
    mount(&server, "/a", redirect(301, "/b"), 1).await;
    mount(&server, "/b", redirect(307, "/c"), 1).await;
    mount(&server, "/c", html("<html>final</html>"), 1).await;

    let h = harness();
    let start = url(&server, "/a");
    let item = Arc::new(CaptureItem::seed(start.clone()));

    let fetched = h.ctx.execute_get(item, build_get(&start)).await.unwrap();

    // Only the final hop's copy is left, and it holds the final body
    assert_eq!(h.temp_files(), 1);
    let final_path = fetched.artifact.path().unwrap().to_path_buf();
    assert_eq!(std::fs::read(&final_path).unwrap(), b"<html>final</html>");

    fetched.artifact.delete();
    assert_eq!(h.temp_files(), 0);

    // Every hop is archived and counted
    assert_eq!(h.records().matches("==> ").count(), 3);
    assert_eq!(h.ctx.stats.crawled.value(), 3);
}

#[tokio::test]
async fn test_failed_hop_leaves_no_artifacts() {
    let server = MockServer::start().await;
    // Nothing listens on the discard port
    mount(&server, "/a", redirect(302, "http://127.0.0.1:9/gone"), 1).await;

    let h = harness();
    let start = url(&server, "/a");
    let item = Arc::new(CaptureItem::seed(start.clone()));

    let err = h.ctx.execute_get(item, build_get(&start)).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(h.temp_files(), 0);
}

#[tokio::test]
async fn test_malformed_location_leaves_no_artifacts() {
    let server = MockServer::start().await;
    mount(&server, "/a", redirect(301, "http://[::1"), 1).await;

    let h = harness();
    let start = url(&server, "/a");
    let item = Arc::new(CaptureItem::seed(start.clone()));

    let err = h.ctx.execute_get(item, build_get(&start)).await.unwrap_err();

    assert!(matches!(err, CaptureError::RedirectLocation { .. }));
    assert!(!err.is_transport());
    assert_eq!(h.ctx.stats.crawled.value(), 1);
    assert_eq!(h.temp_files(), 0);
}

struct FailingArchiver;

#[async_trait::async_trait]
impl Archiver for FailingArchiver {
    async fn archive(&self, _response: &CapturedResponse) -> Result<TempArtifact, ArchiveError> {
        Err(ArchiveError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}

#[tokio::test]
async fn test_archive_failure_fails_fetch() {
    let server = MockServer::start().await;
    mount(&server, "/", html(r#"<a href="/next">next</a>"#), 2).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir, true);
    let (frontier, mut receiver) = frontier_channel();
    let ctx = CrawlContext::new(
        CaptureSettings::from_config(&config),
        HttpClients::from_config(&config).unwrap(),
        Some(Arc::new(FailingArchiver)),
        Arc::new(SqliteSeenStore::in_memory().unwrap()),
        frontier,
    );

    let start = url(&server, "/");
    let item = Arc::new(CaptureItem::seed(start.clone()));
    let err = ctx.execute_get(Arc::clone(&item), build_get(&start)).await.unwrap_err();
    assert!(matches!(err, CaptureError::Archive(_)));

    let outcome = ctx.capture_page(item).await;
    assert_eq!(outcome, CaptureOutcome::FetchFailed);
    assert_eq!(ctx.stats.crawled.value(), 0);
    assert!(receiver.try_recv().is_none());
}

#[tokio::test]
async fn test_redirect_without_location_is_final() {
    let server = MockServer::start().await;
    mount(&server, "/moved", ResponseTemplate::new(302), 1).await;

    let h = harness_with(false, |_| {});
    let start = url(&server, "/moved");
    let item = Arc::new(CaptureItem::seed(start.clone()));

    let fetched = h.ctx.execute_get(item, build_get(&start)).await.unwrap();
    assert_eq!(fetched.response.status.as_u16(), 302);
    assert_eq!(fetched.redirects, 0);
    assert!(fetched.artifact.is_empty());
}

#[tokio::test]
async fn test_self_redirect_is_final() {
    let server = MockServer::start().await;
    let h = harness_with(false, |_| {});
    let start = url(&server, "/loop");
    mount(&server, "/loop", redirect(301, start.as_str()), 1).await;

    let item = Arc::new(CaptureItem::seed(start.clone()));
    let fetched = h.ctx.execute_get(item, build_get(&start)).await.unwrap();

    assert_eq!(fetched.response.status.as_u16(), 301);
    assert_eq!(fetched.redirects, 0);
}

#[tokio::test]
async fn test_redirect_hop_carries_user_agent_and_referer() {
    let server = MockServer::start().await;
    let parent = url(&server, "/parent");

    mount(&server, "/old", redirect(301, "/new"), 1).await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .and(header("referer", parent.as_str()))
        .and(header("user-agent", "TestBot/1.0.0 (+https://example.com/contact)"))
        .respond_with(html("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness_with(false, |_| {});
    let seed = Arc::new(CaptureItem::seed(parent));
    let page = CaptureItem::new(url(&server, "/old"), Some(seed), ItemType::Page, 1);
    let start = page.url().clone();

    let fetched = h.ctx.execute_get(Arc::new(page), build_get(&start)).await.unwrap();
    assert_eq!(fetched.response.status.as_u16(), 200);
    assert_eq!(fetched.redirects, 1);
}

#[tokio::test]
async fn test_non_text_page_not_parsed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/image",
        ResponseTemplate::new(200).set_body_raw(
            br#"<a href="/hidden">not a link</a>"#.to_vec(),
            "image/png",
        ),
        1,
    )
    .await;
    mount(&server, "/hidden", html(""), 0).await;

    let h = harness();
    let item = Arc::new(CaptureItem::seed(url(&server, "/image")));

    let outcome = h.ctx.capture_page(item).await;

    assert_eq!(
        outcome,
        CaptureOutcome::ContentTypeRejected {
            status: reqwest::StatusCode::OK
        }
    );
    assert_eq!(h.ctx.stats.crawled_seeds.value(), 1);
    assert_eq!(h.ctx.stats.crawled.value(), 1);
    assert_eq!(h.ctx.stats.queued.value(), 0);
    assert_eq!(h.temp_files(), 0);
}

#[tokio::test]
async fn test_hop_two_page_with_redirect_and_self_asset() {
    let server = MockServer::start().await;
    let new_url = url(&server, "/new");

    mount(&server, "/old", redirect(301, "/new"), 1).await;
    mount(
        &server,
        "/new",
        html(&format!(
            r#"<html><body>
                <a href="/out1">One</a>
                <a href="/out2">Two</a>
                <img src="{}">
            </body></html>"#,
            new_url
        )),
        1,
    )
    .await;

    let mut h = harness();
    let seed = Arc::new(CaptureItem::seed(url(&server, "/")));
    let hop1 = Arc::new(CaptureItem::new(
        url(&server, "/hop1"),
        Some(seed),
        ItemType::Page,
        1,
    ));
    let page = Arc::new(CaptureItem::new(
        url(&server, "/old"),
        Some(hop1),
        ItemType::Page,
        2,
    ));

    let outcome = h.ctx.capture_page(page).await;

    assert_eq!(
        outcome,
        CaptureOutcome::Parsed {
            redirects: 1,
            outlinks_queued: 2,
            assets_captured: 0,
            assets_failed: 0,
            assets_skipped: 1,
        }
    );

    let first = h.receiver.try_recv().unwrap();
    let second = h.receiver.try_recv().unwrap();
    assert!(h.receiver.try_recv().is_none());

    for (queued, expected) in [(first, "/out1"), (second, "/out2")] {
        assert_eq!(queued.url().path(), expected);
        assert_eq!(queued.hop(), 3);
        assert_eq!(queued.item_type(), ItemType::Page);
        assert_eq!(queued.parent_url().unwrap().path(), "/old");
    }

    assert_eq!(h.ctx.stats.queued.value(), 2);
    assert_eq!(h.ctx.stats.crawled_assets.value(), 0);
    assert_eq!(h.temp_files(), 0);
}

#[tokio::test]
async fn test_max_hops_page_captures_assets_only() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/deep",
        html(r#"<html><body><a href="/further">x</a><script src="/app.js"></script></body></html>"#),
        1,
    )
    .await;
    mount(&server, "/app.js", ResponseTemplate::new(200), 1).await;

    let mut h = harness_with(true, |c| c.crawler.max_hops = 0);
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(url(&server, "/deep")))).await;

    assert!(matches!(
        outcome,
        CaptureOutcome::Parsed {
            outlinks_queued: 0,
            assets_captured: 1,
            ..
        }
    ));
    assert!(h.receiver.try_recv().is_none());
    assert_eq!(h.ctx.stats.crawled_assets.value(), 1);
    assert_eq!(h.temp_files(), 0);
}

#[tokio::test]
async fn test_assets_carry_referer_and_cookies() {
    let server = MockServer::start().await;
    let page_url = url(&server, "/page");

    mount(
        &server,
        "/page",
        html(r#"<html><head><link rel="stylesheet" href="/style.css"></head></html>"#)
            .insert_header("set-cookie", "session=abc123; Path=/"),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/style.css"))
        .and(header("referer", page_url.as_str()))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"body{}".to_vec(), "text/css"))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness();
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(page_url))).await;

    assert!(matches!(
        outcome,
        CaptureOutcome::Parsed {
            assets_captured: 1,
            assets_failed: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn test_seed_has_no_referer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("referer"))
        .respond_with(html("<html></html>"))
        .expect(0)
        .mount(&server)
        .await;
    mount(&server, "/", html("<html></html>"), 1).await;

    let h = harness_with(false, |_| {});
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(url(&server, "/")))).await;

    assert!(matches!(outcome, CaptureOutcome::Parsed { .. }));
}

#[tokio::test]
async fn test_asset_failure_does_not_stop_remaining_assets() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/page",
        html(
            r#"<html><body>
                <img src="http://127.0.0.1:9/broken.png">
                <img src="/ok.png">
            </body></html>"#,
        ),
        1,
    )
    .await;
    mount(&server, "/ok.png", ResponseTemplate::new(200), 1).await;

    let h = harness();
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(url(&server, "/page")))).await;

    assert!(matches!(
        outcome,
        CaptureOutcome::Parsed {
            assets_captured: 1,
            assets_failed: 1,
            ..
        }
    ));
    assert_eq!(h.temp_files(), 0);
}

#[tokio::test]
async fn test_seen_asset_not_fetched() {
    let server = MockServer::start().await;
    mount(&server, "/logo.png", ResponseTemplate::new(200), 0).await;

    let h = harness();
    let page = Arc::new(CaptureItem::seed(url(&server, "/")));
    let asset = Arc::new(CaptureItem::new(
        url(&server, "/logo.png"),
        Some(page),
        ItemType::Asset,
        0,
    ));

    h.ctx.seen.mark_seen(asset.hash(), ItemType::Asset).unwrap();
    h.ctx.capture_asset(asset, &[]).await.unwrap();

    assert_eq!(h.ctx.stats.crawled_assets.value(), 0);
}

#[tokio::test]
async fn test_repeated_asset_fetched_once() {
    let server = MockServer::start().await;
    mount(&server, "/logo.png", ResponseTemplate::new(200), 1).await;

    let h = harness();
    let page = Arc::new(CaptureItem::seed(url(&server, "/")));

    for _ in 0..3 {
        let asset = Arc::new(CaptureItem::new(
            url(&server, "/logo.png"),
            Some(Arc::clone(&page)),
            ItemType::Asset,
            0,
        ));
        h.ctx.capture_asset(asset, &[]).await.unwrap();
    }

    assert_eq!(h.ctx.stats.crawled_assets.value(), 1);
}

#[tokio::test]
async fn test_archival_disabled_parses_live_body() {
    let server = MockServer::start().await;
    mount(&server, "/", html(r#"<a href="/next">next</a>"#), 1).await;

    let mut h = harness_with(false, |_| {});
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(url(&server, "/")))).await;

    assert!(matches!(
        outcome,
        CaptureOutcome::Parsed {
            outlinks_queued: 1,
            ..
        }
    ));
    assert_eq!(h.receiver.try_recv().unwrap().url().path(), "/next");
    assert_eq!(h.ctx.stats.crawled.value(), 0);
    assert!(!h.dir.path().join("temp").exists());
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_encoded_body_archived_as_received() {
    let server = MockServer::start().await;
    let encoded = gzip(br#"<html><a href="/next">RAWBODY</a></html>"#);
    let response = ResponseTemplate::new(200)
        .set_body_raw(encoded.clone(), "text/html")
        .insert_header("content-encoding", "gzip");
    mount(&server, "/", response, 2).await;

    let mut h = harness();
    let start = url(&server, "/");
    let item = Arc::new(CaptureItem::seed(start.clone()));

    let fetched = h.ctx.execute_get(Arc::clone(&item), build_get(&start)).await.unwrap();
    assert_eq!(fetched.response.body, encoded);
    assert_eq!(fetched.response.content_encoding(), Some("gzip"));
    drop(fetched);

    let records = h.records();
    assert!(records.contains("content-encoding: gzip"));
    assert!(!records.contains("RAWBODY"));
    assert!(h
        .raw_records()
        .windows(encoded.len())
        .any(|window| window == encoded.as_slice()));

    let outcome = h.ctx.capture_page(item).await;
    assert!(matches!(
        outcome,
        CaptureOutcome::Parsed {
            outlinks_queued: 1,
            ..
        }
    ));
    assert_eq!(h.receiver.try_recv().unwrap().url().path(), "/next");
    assert_eq!(h.temp_files(), 0);
}

#[tokio::test]
async fn test_undecodable_body_is_parse_failure() {
    let server = MockServer::start().await;
    let response = ResponseTemplate::new(200)
        .set_body_raw(b"not gzip at all".to_vec(), "text/html")
        .insert_header("content-encoding", "gzip");
    mount(&server, "/", response, 1).await;

    let h = harness();
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(url(&server, "/")))).await;

    assert_eq!(outcome, CaptureOutcome::ParseFailed);
    assert_eq!(h.temp_files(), 0);
}

#[tokio::test]
async fn test_proxy_bypass_uses_direct_client() {
    let server = MockServer::start().await;
    mount(&server, "/", html("<html></html>"), 1).await;

    let h = harness_with(false, |c| {
        c.proxy = Some(ProxyConfig {
            url: "http://127.0.0.1:9".to_string(),
            bypass: vec!["127.0.0.1".to_string()],
        })
    });
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(url(&server, "/")))).await;

    assert!(matches!(outcome, CaptureOutcome::Parsed { .. }));
}

#[tokio::test]
async fn test_proxy_bypass_matches_host_and_port() {
    let server = MockServer::start().await;
    mount(&server, "/", html("<html></html>"), 1).await;
    let authority = format!("127.0.0.1:{}", url(&server, "/").port().unwrap());

    let bypassed = harness_with(false, |c| {
        c.proxy = Some(ProxyConfig {
            url: "http://127.0.0.1:9".to_string(),
            bypass: vec![authority.clone()],
        })
    });
    let outcome = bypassed
        .ctx
        .capture_page(Arc::new(CaptureItem::seed(url(&server, "/"))))
        .await;
    assert!(matches!(outcome, CaptureOutcome::Parsed { .. }));

    // Same host, other port: the request goes through the dead proxy
    let proxied = harness_with(false, |c| {
        c.proxy = Some(ProxyConfig {
            url: "http://127.0.0.1:9".to_string(),
            bypass: vec![format!("{}0", authority)],
        })
    });
    let outcome = proxied
        .ctx
        .capture_page(Arc::new(CaptureItem::seed(url(&server, "/"))))
        .await;
    assert_eq!(outcome, CaptureOutcome::FetchFailed);
}

#[tokio::test]
async fn test_unreachable_proxy_fails_capture() {
    let server = MockServer::start().await;
    mount(&server, "/", html("<html></html>"), 0).await;

    let h = harness_with(false, |c| {
        c.proxy = Some(ProxyConfig {
            url: "http://127.0.0.1:9".to_string(),
            bypass: vec![],
        })
    });
    let outcome = h.ctx.capture_page(Arc::new(CaptureItem::seed(url(&server, "/")))).await;

    assert_eq!(outcome, CaptureOutcome::FetchFailed);
}

#[tokio::test]
async fn test_excluded_hosts_not_queued() {
    let h = harness_with(false, |c| c.crawler.exclude_hosts = vec!["*.example.org".to_string()]);
    let seed = Arc::new(CaptureItem::seed(Url::parse("https://example.com/").unwrap()));

    let excluded = CaptureItem::new(
        Url::parse("https://cdn.example.org/page").unwrap(),
        Some(Arc::clone(&seed)),
        ItemType::Page,
        1,
    );
    let allowed = CaptureItem::new(
        Url::parse("https://example.com/page").unwrap(),
        Some(seed),
        ItemType::Page,
        1,
    );

    assert!(!h.ctx.enqueue(excluded));
    assert!(h.ctx.enqueue(allowed));
    assert_eq!(h.ctx.stats.queued.value(), 1);
}

#[tokio::test]
async fn test_full_crawl() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/",
        html(
            r#"<html><head><link rel="stylesheet" href="/style.css"></head>
            <body><a href="/page1">Page 1</a><a href="/page2">Page 2</a></body></html>"#,
        ),
        1,
    )
    .await;
    // Fetched once as an outlink and once as the target of /page2
    mount(
        &server,
        "/page1",
        html(r#"<html><body><a href="/">Home</a><img src="/logo.png"></body></html>"#),
        2,
    )
    .await;
    mount(&server, "/page2", redirect(302, "/page1"), 1).await;
    mount(&server, "/style.css", ResponseTemplate::new(200), 1).await;
    mount(&server, "/logo.png", ResponseTemplate::new(200), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&dir, true);
    config.crawler.max_hops = 1;
    config.seeds = vec![format!("{}/", server.uri())];

    let summary = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(summary.seeds_queued, 1);
    assert_eq!(summary.pages_processed, 3);
    assert_eq!(summary.fetch_failures, 0);
    assert_eq!(summary.crawled_seeds, 1);
    assert_eq!(summary.crawled_pages, 2);
    assert_eq!(summary.crawled_assets, 2);
    // 4 page responses (one of them a redirect) and 2 assets
    assert_eq!(summary.archived, 6);
    assert!(!summary.time_limit_reached);
    assert_eq!(count_files(&dir.path().join("temp")), 0);
}
