use serde::Deserialize;

/// Main configuration structure for Sumi-Capture
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    #[serde(default)]
    pub seencheck: SeencheckConfig,
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of page-to-page hops from a seed
    #[serde(rename = "max-hops")]
    pub max_hops: u32,

    /// Maximum number of redirects followed for one item
    #[serde(rename = "max-redirect", default = "default_max_redirect")]
    pub max_redirect: u32,

    /// Retry budget; carried for the layers above the capture engine
    #[serde(rename = "max-retry", default)]
    pub max_retry: u32,

    /// HTTP timeout in seconds
    #[serde(rename = "http-timeout", default = "default_http_timeout")]
    pub http_timeout: u64,

    /// Number of concurrent page captures
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Skip URLs whose hash has already been seen
    #[serde(default = "default_true")]
    pub seencheck: bool,

    #[serde(rename = "disable-assets-capture", default)]
    pub disable_assets_capture: bool,

    /// Follow `<link rel="alternate">` as outlinks
    #[serde(rename = "capture-alternate-pages", default)]
    pub capture_alternate_pages: bool,

    /// Tag names ignored during asset extraction
    #[serde(rename = "disabled-html-tags", default)]
    pub disabled_html_tags: Vec<String>,

    /// Crawl time limit in seconds (0 = unlimited)
    #[serde(rename = "crawl-time-limit", default)]
    pub crawl_time_limit: u64,

    /// Host patterns never queued as outlinks
    #[serde(rename = "exclude-hosts", default)]
    pub exclude_hosts: Vec<String>,

    /// When non-empty, only these host patterns are queued as outlinks
    #[serde(rename = "include-hosts", default)]
    pub include_hosts: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Archival configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory for temporary copies of response bodies
    #[serde(rename = "temp-dir", default = "default_temp_dir")]
    pub temp_dir: String,

    /// Directory for durable exchange records
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            temp_dir: default_temp_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Proxy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    pub url: String,

    /// Hosts that never go through the proxy
    #[serde(default)]
    pub bypass: Vec<String>,
}

/// Seen-set storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeencheckConfig {
    /// SQLite database path; in-memory when absent
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,
}

fn default_max_redirect() -> u32 {
    20
}

fn default_http_timeout() -> u64 {
    30
}

fn default_workers() -> u32 {
    8
}

fn default_true() -> bool {
    true
}

fn default_temp_dir() -> String {
    "./jobs/temp".to_string()
}

fn default_output_dir() -> String {
    "./jobs/records".to_string()
}
