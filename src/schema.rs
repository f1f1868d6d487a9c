//! Request shapes, defaults, and the validation layer.
//!
//! Every remote operation takes an options struct from this module. The
//! corresponding `*Request::new` constructor is the only way to obtain a
//! request value: it checks every constraint (collecting all violations, not
//! just the first), applies the documented defaults, and only then hands back
//! something serializable. Validation is pure and synchronous; nothing here
//! touches the network.
//!
//! On the wire, fields that still hold their default value are omitted, so
//! the body the service sees carries exactly what the caller decided plus the
//! mandatory `url`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::Violations;

/// Default output formats when the caller requests none.
pub const DEFAULT_FORMATS: [Format; 2] = [Format::Markdown, Format::Html];

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// Timeout bounds in milliseconds; values outside are rejected, not clamped.
pub const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u32> = 1_000..=90_000;

/// Upper bound for `waitFor` in milliseconds.
pub const MAX_WAIT_FOR_MS: u32 = 60_000;

/// Default page limit for crawl jobs. No hard ceiling is enforced client-side.
pub const DEFAULT_CRAWL_LIMIT: u32 = 10_000;

/// Default crawl depth relative to the seed URL.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// Default and maximum number of links a map request may return.
pub const DEFAULT_MAP_LIMIT: u32 = 5_000;

/// System prompt the service falls back to when an extraction carries none.
pub const DEFAULT_EXTRACT_SYSTEM_PROMPT: &str = "Based on the information on the page, \
    extract all the information from the schema. Try to extract all the fields even \
    those that might not be marked as required.";

/// Origin tag stamped on every request body.
const DEFAULT_ORIGIN: &str = "api";

/// Output formats a scrape can produce. Closed vocabulary; anything else is
/// unrepresentable and therefore rejected before serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "rawHtml")]
    RawHtml,
    #[serde(rename = "links")]
    Links,
    #[serde(rename = "screenshot")]
    Screenshot,
    #[serde(rename = "screenshot@fullPage")]
    FullPageScreenshot,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "extract")]
    Extract,
    #[serde(rename = "summary")]
    Summary,
}

/// Extraction mode. The service currently only offers LLM-driven extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractMode {
    #[default]
    #[serde(rename = "llm")]
    Llm,
}

/// Summarizer mode, same closed set as [`ExtractMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryMode {
    #[default]
    #[serde(rename = "llm")]
    Llm,
}

/// Directive for AI-powered structured extraction from page content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ExtractMode>,
    /// JSON-Schema-shaped target for the extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Overrides [`DEFAULT_EXTRACT_SYSTEM_PROMPT`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Freeform prompt used when no schema is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Directive for AI-powered page summarization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SummaryMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Caller-supplied options for a single-page scrape.
///
/// Also nests inside [`CrawlOptions`] as the per-page settings, where
/// `timeout` must stay unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<Format>>,
    /// Extra request headers for the page fetch (cookies, user-agent, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,
    /// Milliseconds; bounded by [`TIMEOUT_RANGE_MS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Delay before capture, milliseconds; at most [`MAX_WAIT_FOR_MS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_paths: Option<bool>,
    #[serde(rename = "parsePDFs", skip_serializing_if = "Option::is_none")]
    pub parse_pdfs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summarizer: Option<SummaryOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Caller-supplied options for a crawl job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    /// Path globs; only matching URLs are crawled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_paths: Option<Vec<String>>,
    /// Path globs; matching URLs are skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    /// Maximum number of pages to crawl.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_backward_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_external_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap: Option<bool>,
    /// Per-page scrape settings; `timeout` is not permitted here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
    /// Absolute URLs to deliver results to asynchronously.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Caller-supplied options for a site map request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_backward_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_external_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,
    /// Substring filter applied to discovered links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Maximum number of links to return; 1..=5000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Validated, fully-defaulted body for `POST /v1/scrape`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    url: String,
    #[serde(skip_serializing_if = "is_default_formats")]
    formats: Vec<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_false")]
    only_main_content: bool,
    #[serde(skip_serializing_if = "is_default_timeout")]
    timeout: u32,
    #[serde(skip_serializing_if = "is_zero")]
    wait_for: u32,
    #[serde(skip_serializing_if = "is_false")]
    absolute_paths: bool,
    #[serde(rename = "parsePDFs", skip_serializing_if = "is_true")]
    parse_pdfs: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    extract: Option<ExtractOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summarizer: Option<SummaryOptions>,
    #[serde(skip_serializing_if = "is_default_origin")]
    origin: String,
}

impl ScrapeRequest {
    /// Validate `options` against the scrape schema and apply defaults.
    ///
    /// Returns every violated constraint at once when anything is off.
    pub fn new(url: &str, options: ScrapeOptions) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        check_absolute_url(&mut violations, "url", url);
        check_scrape_options(&mut violations, "", &options, true);

        let request = Self {
            url: url.to_string(),
            formats: options.formats.unwrap_or_else(|| DEFAULT_FORMATS.to_vec()),
            headers: options.headers,
            include_tags: options.include_tags,
            exclude_tags: options.exclude_tags,
            only_main_content: options.only_main_content.unwrap_or(false),
            timeout: options.timeout.unwrap_or(DEFAULT_TIMEOUT_MS),
            wait_for: options.wait_for.unwrap_or(0),
            absolute_paths: options.absolute_paths.unwrap_or(false),
            parse_pdfs: options.parse_pdfs.unwrap_or(true),
            extract: options.extract,
            summarizer: options.summarizer,
            origin: options.origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        };
        violations.into_result(request)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    pub fn timeout(&self) -> u32 {
        self.timeout
    }
}

/// Validated, fully-defaulted body for `POST /v1/crawl`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    include_paths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude_paths: Vec<String>,
    #[serde(skip_serializing_if = "is_default_max_depth")]
    max_depth: u32,
    #[serde(skip_serializing_if = "is_default_crawl_limit")]
    limit: u32,
    #[serde(skip_serializing_if = "is_false")]
    allow_backward_links: bool,
    #[serde(skip_serializing_if = "is_false")]
    allow_external_links: bool,
    #[serde(skip_serializing_if = "is_true")]
    ignore_sitemap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    scrape_options: Option<ScrapeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_metadata: Option<Value>,
    #[serde(skip_serializing_if = "is_default_origin")]
    origin: String,
}

impl CrawlRequest {
    pub fn new(url: &str, options: CrawlOptions) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        check_absolute_url(&mut violations, "url", url);

        if options.max_depth == Some(0) {
            violations.push("maxDepth", "must be at least 1");
        }
        if options.limit == Some(0) {
            violations.push("limit", "must be at least 1");
        }
        if let Some(scrape) = &options.scrape_options {
            check_scrape_options(&mut violations, "scrapeOptions.", scrape, false);
        }
        if let Some(urls) = &options.webhook_urls {
            if urls.is_empty() {
                violations.push("webhookUrls", "must not be empty when present");
            }
            for url in urls {
                check_absolute_url(&mut violations, "webhookUrls", url);
            }
        }

        let request = Self {
            url: url.to_string(),
            include_paths: options.include_paths.unwrap_or_default(),
            exclude_paths: options.exclude_paths.unwrap_or_default(),
            max_depth: options.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            limit: options.limit.unwrap_or(DEFAULT_CRAWL_LIMIT),
            allow_backward_links: options.allow_backward_links.unwrap_or(false),
            allow_external_links: options.allow_external_links.unwrap_or(false),
            ignore_sitemap: options.ignore_sitemap.unwrap_or(true),
            scrape_options: options.scrape_options,
            webhook_urls: options.webhook_urls,
            webhook_metadata: options.webhook_metadata,
            origin: options.origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        };
        violations.into_result(request)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Validated, fully-defaulted body for `POST /v1/map`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRequest {
    url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    include_paths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude_paths: Vec<String>,
    #[serde(skip_serializing_if = "is_default_max_depth")]
    max_depth: u32,
    #[serde(skip_serializing_if = "is_false")]
    allow_backward_links: bool,
    #[serde(skip_serializing_if = "is_false")]
    allow_external_links: bool,
    #[serde(skip_serializing_if = "is_true")]
    ignore_sitemap: bool,
    #[serde(skip_serializing_if = "is_true")]
    include_subdomains: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "is_default_map_limit")]
    limit: u32,
    #[serde(skip_serializing_if = "is_default_origin")]
    origin: String,
}

impl MapRequest {
    pub fn new(url: &str, options: MapOptions) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        check_absolute_url(&mut violations, "url", url);

        if options.max_depth == Some(0) {
            violations.push("maxDepth", "must be at least 1");
        }
        if let Some(limit) = options.limit {
            if !(1..=DEFAULT_MAP_LIMIT).contains(&limit) {
                violations.push(
                    "limit",
                    format!("must be between 1 and {DEFAULT_MAP_LIMIT}, got {limit}"),
                );
            }
        }

        let request = Self {
            url: url.to_string(),
            include_paths: options.include_paths.unwrap_or_default(),
            exclude_paths: options.exclude_paths.unwrap_or_default(),
            max_depth: options.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            allow_backward_links: options.allow_backward_links.unwrap_or(false),
            allow_external_links: options.allow_external_links.unwrap_or(false),
            ignore_sitemap: options.ignore_sitemap.unwrap_or(true),
            include_subdomains: options.include_subdomains.unwrap_or(true),
            search: options.search,
            limit: options.limit.unwrap_or(DEFAULT_MAP_LIMIT),
            origin: options.origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        };
        violations.into_result(request)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// The field must parse as an absolute http(s) URL; relative paths and
/// other schemes are rejected.
fn check_absolute_url(violations: &mut Violations, field: &str, raw: &str) {
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => violations.push(
            field,
            format!("must use the http or https scheme, got '{}'", url.scheme()),
        ),
        Err(e) => violations.push(field, format!("must be an absolute URL ('{raw}': {e})")),
    }
}

/// Shared checks for scrape options, both top-level and nested under a crawl.
/// `allow_timeout` is false in the nested position, where the per-page
/// timeout is fixed by the service.
fn check_scrape_options(
    violations: &mut Violations,
    prefix: &str,
    options: &ScrapeOptions,
    allow_timeout: bool,
) {
    if let Some(formats) = &options.formats {
        if formats.is_empty() {
            violations.push(format!("{prefix}formats"), "must not be empty");
        }
    }
    if let Some(tags) = &options.include_tags {
        if tags.is_empty() {
            violations.push(format!("{prefix}includeTags"), "must not be empty when present");
        }
    }
    if let Some(tags) = &options.exclude_tags {
        if tags.is_empty() {
            violations.push(format!("{prefix}excludeTags"), "must not be empty when present");
        }
    }
    match options.timeout {
        Some(_) if !allow_timeout => {
            violations.push(
                format!("{prefix}timeout"),
                "not permitted here; the per-page timeout is fixed by the service",
            );
        }
        Some(timeout) if !TIMEOUT_RANGE_MS.contains(&timeout) => {
            violations.push(
                format!("{prefix}timeout"),
                format!(
                    "must be between {} and {} ms, got {timeout}",
                    TIMEOUT_RANGE_MS.start(),
                    TIMEOUT_RANGE_MS.end()
                ),
            );
        }
        _ => {}
    }
    if let Some(wait_for) = options.wait_for {
        if wait_for > MAX_WAIT_FOR_MS {
            violations.push(
                format!("{prefix}waitFor"),
                format!("must be at most {MAX_WAIT_FOR_MS} ms, got {wait_for}"),
            );
        }
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_zero(v: &u32) -> bool {
    *v == 0
}

fn is_default_formats(v: &Vec<Format>) -> bool {
    *v == DEFAULT_FORMATS
}

fn is_default_timeout(v: &u32) -> bool {
    *v == DEFAULT_TIMEOUT_MS
}

fn is_default_max_depth(v: &u32) -> bool {
    *v == DEFAULT_MAX_DEPTH
}

fn is_default_crawl_limit(v: &u32) -> bool {
    *v == DEFAULT_CRAWL_LIMIT
}

fn is_default_map_limit(v: &u32) -> bool {
    *v == DEFAULT_MAP_LIMIT
}

fn is_default_origin(v: &String) -> bool {
    v == DEFAULT_ORIGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scrape_defaults_are_applied() {
        let request = ScrapeRequest::new("https://example.com", ScrapeOptions::default())
            .expect("default options should validate");

        assert_eq!(request.formats(), DEFAULT_FORMATS.as_slice());
        assert_eq!(request.timeout(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn default_scrape_body_carries_only_the_url() {
        let request =
            ScrapeRequest::new("https://example.com", ScrapeOptions::default()).unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"url": "https://example.com"}));
    }

    #[test]
    fn explicit_formats_are_serialized() {
        let options = ScrapeOptions {
            formats: Some(vec![Format::Markdown]),
            ..Default::default()
        };
        let request = ScrapeRequest::new("https://example.com", options).unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"url": "https://example.com", "formats": ["markdown"]})
        );
    }

    #[test]
    fn format_wire_names() {
        assert_eq!(
            serde_json::to_string(&Format::FullPageScreenshot).unwrap(),
            "\"screenshot@fullPage\""
        );
        assert_eq!(serde_json::to_string(&Format::RawHtml).unwrap(), "\"rawHtml\"");
        assert!(serde_json::from_str::<Format>("\"pdf\"").is_err());
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = ScrapeRequest::new("/docs/page", ScrapeOptions::default()).unwrap_err();
        assert_eq!(err.as_slice()[0].field, "url");
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = ScrapeRequest::new("ftp://example.com", ScrapeOptions::default()).unwrap_err();
        assert_eq!(err.as_slice()[0].field, "url");
    }

    #[test]
    fn empty_formats_are_rejected() {
        let options = ScrapeOptions {
            formats: Some(vec![]),
            ..Default::default()
        };
        let err = ScrapeRequest::new("https://example.com", options).unwrap_err();
        assert_eq!(err.as_slice()[0].field, "formats");
    }

    #[test]
    fn timeout_bounds_reject_rather_than_clamp() {
        for bad in [999_u32, 90_001] {
            let options = ScrapeOptions {
                timeout: Some(bad),
                ..Default::default()
            };
            assert!(ScrapeRequest::new("https://example.com", options).is_err());
        }
        for good in [1_000_u32, 90_000] {
            let options = ScrapeOptions {
                timeout: Some(good),
                ..Default::default()
            };
            assert!(ScrapeRequest::new("https://example.com", options).is_ok());
        }
    }

    #[test]
    fn wait_for_upper_bound() {
        let options = ScrapeOptions {
            wait_for: Some(MAX_WAIT_FOR_MS + 1),
            ..Default::default()
        };
        assert!(ScrapeRequest::new("https://example.com", options).is_err());

        let options = ScrapeOptions {
            wait_for: Some(MAX_WAIT_FOR_MS),
            ..Default::default()
        };
        assert!(ScrapeRequest::new("https://example.com", options).is_ok());
    }

    #[test]
    fn all_violations_are_collected_at_once() {
        let options = ScrapeOptions {
            formats: Some(vec![]),
            timeout: Some(100),
            wait_for: Some(100_000),
            ..Default::default()
        };
        let err = ScrapeRequest::new("not a url", options).unwrap_err();
        assert_eq!(err.len(), 4);
    }

    #[test]
    fn crawl_rejects_nested_page_timeout() {
        let options = CrawlOptions {
            scrape_options: Some(ScrapeOptions {
                timeout: Some(5_000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = CrawlRequest::new("https://example.com", options).unwrap_err();
        assert_eq!(err.as_slice()[0].field, "scrapeOptions.timeout");
    }

    #[test]
    fn crawl_body_carries_only_non_defaults() {
        let options = CrawlOptions {
            limit: Some(50),
            ..Default::default()
        };
        let request = CrawlRequest::new("https://example.com", options).unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"url": "https://example.com", "limit": 50}));
    }

    #[test]
    fn crawl_webhook_urls_must_be_absolute() {
        let options = CrawlOptions {
            webhook_urls: Some(vec!["https://hooks.example.com/crawl".into(), "/relative".into()]),
            ..Default::default()
        };
        let err = CrawlRequest::new("https://example.com", options).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.as_slice()[0].field, "webhookUrls");
    }

    #[test]
    fn crawl_zero_limit_and_depth_are_rejected() {
        let options = CrawlOptions {
            limit: Some(0),
            max_depth: Some(0),
            ..Default::default()
        };
        let err = CrawlRequest::new("https://example.com", options).unwrap_err();
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn map_limit_boundaries() {
        for bad in [0_u32, DEFAULT_MAP_LIMIT + 1] {
            let options = MapOptions {
                limit: Some(bad),
                ..Default::default()
            };
            assert!(MapRequest::new("https://example.com", options).is_err());
        }
        for good in [1_u32, DEFAULT_MAP_LIMIT] {
            let options = MapOptions {
                limit: Some(good),
                ..Default::default()
            };
            assert!(MapRequest::new("https://example.com", options).is_ok());
        }
    }

    #[test]
    fn map_body_serializes_non_defaults() {
        let options = MapOptions {
            include_subdomains: Some(false),
            search: Some("blog".into()),
            limit: Some(100),
            ..Default::default()
        };
        let request = MapRequest::new("https://example.com", options).unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://example.com",
                "includeSubdomains": false,
                "search": "blog",
                "limit": 100
            })
        );
    }

    #[test]
    fn nested_scrape_options_serialize_as_given() {
        let options = CrawlOptions {
            scrape_options: Some(ScrapeOptions {
                formats: Some(vec![Format::Markdown]),
                wait_for: Some(250),
                ..Default::default()
            }),
            ..Default::default()
        };
        let request = CrawlRequest::new("https://docs.example.com", options).unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["scrapeOptions"],
            json!({"formats": ["markdown"], "waitFor": 250})
        );
    }
}
