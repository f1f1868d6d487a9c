//! Typed client for the LLMCrawl REST API.
//!
//! A minimal client for the LLMCrawl scraping/crawling service. Supports
//! single-page scraping, multi-page crawl jobs (submit, poll, cancel), and
//! site mapping. Options are validated locally before anything is sent;
//! responses come back as a discriminated success/failure envelope so callers
//! branch on the `success` tag instead of inspecting optional fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use llmcrawl::{LlmCrawl, Format, ScrapeOptions};
//!
//! let client = LlmCrawl::new("your-api-key")?;
//!
//! let response = client
//!     .scrape("https://example.com", ScrapeOptions {
//!         formats: Some(vec![Format::Markdown]),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! match response {
//!     llmcrawl::ScrapeResponse::Success(scrape) => {
//!         println!("{}", scrape.data.markdown.unwrap_or_default());
//!     }
//!     llmcrawl::ScrapeResponse::Failure(failure) => {
//!         eprintln!("scrape failed: {}", failure.error);
//!     }
//! }
//! ```
//!
//! # Crawl jobs
//!
//! `crawl` returns a job handle immediately; the job runs remotely and is
//! observed through `crawl_status` until [`JobStatus::is_terminal`] holds.
//! Poll scheduling is the caller's business; status reads are idempotent and
//! side-effect free.
//!
//! ```rust,ignore
//! let job = client
//!     .crawl("https://docs.example.com", CrawlOptions { limit: Some(50), ..Default::default() })
//!     .await?
//!     .into_result()?;
//!
//! loop {
//!     let status = client.crawl_status(&job.id).await?.into_result()?;
//!     if status.status.is_terminal() {
//!         break;
//!     }
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//! }
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{LlmCrawlError, Result, Violation, Violations};
pub use schema::{
    CrawlOptions, CrawlRequest, ExtractMode, ExtractOptions, Format, MapOptions, MapRequest,
    ScrapeOptions, ScrapeRequest, SummaryMode, SummaryOptions,
};
pub use types::{
    ApiFailure, CrawlCancelResponse, CrawlCancellation, CrawlJob, CrawlResponse, CrawlStatus,
    CrawlStatusResponse, Document, DocumentMetadata, Envelope, JobStatus, MapResponse,
    ScrapeData, ScrapeResponse, SiteMap,
};

use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.llmcrawl.dev";

/// LLMCrawl API client.
///
/// Stateless beyond its immutable configuration; concurrent calls from the
/// same instance are fully independent. Every operation is exactly one
/// network round trip — no retries, no caching, no internal polling.
#[derive(Clone, Debug)]
pub struct LlmCrawl {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl LlmCrawl {
    /// Create a client with the given API key.
    ///
    /// Fails with [`LlmCrawlError::Config`] when the key is empty; no call
    /// can be attempted with a client that could never authenticate.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmCrawlError::Config("missing API key".into()));
        }
        Ok(Self {
            http_client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create from the `LLMCRAWL_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LLMCRAWL_API_KEY")
            .map_err(|_| LlmCrawlError::Config("LLMCRAWL_API_KEY not set".into()))?;
        Self::new(api_key)
    }

    /// Point the client at a different endpoint (self-hosted, staging).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scrape a single webpage.
    ///
    /// Validates and defaults `options` locally, then issues one
    /// `POST /v1/scrape`.
    pub async fn scrape(&self, url: &str, options: ScrapeOptions) -> Result<ScrapeResponse> {
        let request = ScrapeRequest::new(url, options)?;
        debug!(url, "scraping page");
        self.post("/v1/scrape", &request).await
    }

    /// Start a crawl job for a website. Returns immediately with the job
    /// handle; progress is observed via [`LlmCrawl::crawl_status`].
    pub async fn crawl(&self, url: &str, options: CrawlOptions) -> Result<CrawlResponse> {
        let request = CrawlRequest::new(url, options)?;
        debug!(url, limit = request.limit(), "starting crawl job");
        self.post("/v1/crawl", &request).await
    }

    /// Get the status of a crawl job.
    ///
    /// Idempotent, side-effect-free read. The server is the authority on
    /// whether the job exists; an unknown id comes back as the service's
    /// error envelope, not a client-side error.
    pub async fn crawl_status(&self, job_id: &str) -> Result<CrawlStatusResponse> {
        let job_id = checked_job_id(job_id)?;
        let url = format!("{}/v1/crawl/{}", self.base_url, job_id);
        let request = self
            .http_client
            .get(url)
            .header(header::CONTENT_TYPE, "application/json");
        self.execute(request).await
    }

    /// Cancel a crawl job that is still `scraping`.
    ///
    /// Best-effort: a job that already reached a terminal state yields the
    /// service's error envelope rather than a silent success.
    pub async fn cancel_crawl(&self, job_id: &str) -> Result<CrawlCancelResponse> {
        let job_id = checked_job_id(job_id)?;
        debug!(job_id, "cancelling crawl job");
        let url = format!("{}/v1/crawl/{}/cancel", self.base_url, job_id);
        let request = self
            .http_client
            .delete(url)
            .header(header::CONTENT_TYPE, "application/json");
        self.execute(request).await
    }

    /// Map a website: enumerate known/linked URLs without scraping content.
    /// Always synchronous; the link list arrives in this one response.
    pub async fn map(&self, url: &str, options: MapOptions) -> Result<MapResponse> {
        let request = MapRequest::new(url, options)?;
        debug!(url, limit = request.limit(), "mapping site");
        self.post("/v1/map", &request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        // `json` sets the Content-Type header itself.
        self.execute(self.http_client.post(url).json(body)).await
    }

    /// Perform the single round trip every operation boils down to.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>> {
        let response = request.bearer_auth(&self.api_key).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The service reports request-level failures with non-2xx codes
            // and a genuine error envelope in the body; pass those through
            // untouched. Anything else non-2xx is a transport problem.
            if let Some(failure) = ApiFailure::from_body(&body) {
                warn!(status = status.as_u16(), error = %failure.error, "service reported failure");
                return Ok(Envelope::Failure(failure));
            }
            warn!(status = status.as_u16(), "API error");
            return Err(LlmCrawlError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Envelope::from_json(&body)
    }
}

fn checked_job_id(job_id: &str) -> Result<&str> {
    if job_id.trim().is_empty() {
        let mut violations = Violations::new();
        violations.push("jobId", "must not be empty");
        return Err(violations.into());
    }
    Ok(job_id)
}
