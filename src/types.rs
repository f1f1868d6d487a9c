//! Response shapes: documents, per-endpoint payloads, and the
//! success/failure envelope every endpoint answers with.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LlmCrawlError;

/// Page metadata: a fixed set of well-known SEO/OpenGraph/Dublin-Core fields
/// overlaid on an open key-value map. Keys the service adds that are not
/// modeled here land in `extra` and survive round-trips untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_determiner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_locale_alternate: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_section: Option<String>,
    /// URL the page was actually fetched from.
    #[serde(rename = "sourceURL", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// HTTP status code of the page fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Page-level fetch error reported by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unrecognized metadata keys, preserved as-is.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// The result of scraping one page, in the formats that were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Data URI or reference URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_page_screenshot: Option<String>,
    /// Structured data shaped by the caller's extraction schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<Value>,
    /// Links found on the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    /// Set when the service trimmed the content to fit limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_trimmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Position within a batch of crawled pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

/// Lifecycle state of a crawl job, as observed through status polls.
///
/// `Scraping` is the implicit initial state; the other three are terminal
/// and no transition out of them is ever observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Scraping,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// True once the job can no longer change state; polling can stop.
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Scraping)
    }
}

/// Success payload of `POST /v1/scrape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeData {
    pub data: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_id: Option<String>,
}

/// Success payload of `POST /v1/crawl`: the job handle to poll with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlJob {
    /// Opaque job id.
    pub id: String,
    /// The URL being crawled, echoed back.
    pub url: String,
}

/// Success payload of `GET /v1/crawl/{jobId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStatus {
    pub status: JobStatus,
    /// Pages crawled so far; non-decreasing while the job is `scraping`.
    pub completed: u64,
    /// Pages the job will attempt in total.
    pub total: u64,
    /// When the accumulated results expire on the service side.
    pub expires_at: DateTime<Utc>,
    /// Opaque URL for the next page of results when the set is too large
    /// for one response. Never followed automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default)]
    pub data: Vec<Document>,
}

/// Success payload of `DELETE /v1/crawl/{jobId}/cancel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlCancellation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Success payload of `POST /v1/map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMap {
    /// Links found under the site, already filtered and capped server-side.
    pub links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_id: Option<String>,
}

/// The error shape the service reports for a well-formed request it could
/// not fulfill (unreachable target, unknown job id, job already terminal...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFailure {
    /// Human-readable description of what went wrong.
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiFailure {
    /// Parse a body that claims failure: JSON with `"success": false` and an
    /// `error` message. Anything else yields `None`; nothing is fabricated.
    pub(crate) fn from_body(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        if value.get("success")?.as_bool()? {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// The two mutually exclusive shapes every endpoint responds with,
/// discriminated on the boolean `success` field.
///
/// Matching on the envelope is exhaustive; there is no third state and no
/// field that only exists on the other arm to optional-chain into.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// `success: true` plus the endpoint-specific payload.
    Success(T),
    /// `success: false` plus the service's error report.
    Failure(ApiFailure),
}

/// Response of [`crate::LlmCrawl::scrape`].
pub type ScrapeResponse = Envelope<ScrapeData>;
/// Response of [`crate::LlmCrawl::crawl`].
pub type CrawlResponse = Envelope<CrawlJob>;
/// Response of [`crate::LlmCrawl::crawl_status`].
pub type CrawlStatusResponse = Envelope<CrawlStatus>;
/// Response of [`crate::LlmCrawl::cancel_crawl`].
pub type CrawlCancelResponse = Envelope<CrawlCancellation>;
/// Response of [`crate::LlmCrawl::map`].
pub type MapResponse = Envelope<SiteMap>;

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(failure) => Some(failure),
        }
    }

    /// Convert into a plain `Result`, keeping service failures as values.
    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Failure(failure) => Err(failure),
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a response body, branching solely on the `success` tag.
    ///
    /// A body that is not JSON, a body without a boolean `success` field,
    /// and a tagged body whose payload does not match the endpoint's shape
    /// each surface as their own error; none are downgraded into a
    /// fabricated [`ApiFailure`].
    pub fn from_json(body: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| LlmCrawlError::Decode(format!("response body is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON value. See [`Envelope::from_json`].
    pub fn from_value(value: Value) -> crate::Result<Self> {
        let tag = value
            .get("success")
            .and_then(Value::as_bool)
            .ok_or(LlmCrawlError::MissingDiscriminator)?;

        if tag {
            serde_json::from_value(value)
                .map(Envelope::Success)
                .map_err(|e| LlmCrawlError::Decode(format!("success payload: {e}")))
        } else {
            serde_json::from_value(value)
                .map(Envelope::Failure)
                .map_err(|e| LlmCrawlError::Decode(format!("error envelope: {e}")))
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error;

        let (tag, mut value) = match self {
            Envelope::Success(data) => (
                true,
                serde_json::to_value(data).map_err(S::Error::custom)?,
            ),
            Envelope::Failure(failure) => (
                false,
                serde_json::to_value(failure).map_err(S::Error::custom)?,
            ),
        };
        let map = value
            .as_object_mut()
            .ok_or_else(|| S::Error::custom("envelope payload must be a JSON object"))?;
        map.insert("success".to_string(), Value::Bool(tag));
        value.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_decodes_by_tag() {
        let body = json!({
            "success": true,
            "data": {
                "markdown": "# Example",
                "metadata": {"title": "Example", "statusCode": 200}
            }
        })
        .to_string();

        let response = ScrapeResponse::from_json(&body).unwrap();
        let data = response.success().expect("tagged success");
        assert_eq!(data.data.markdown.as_deref(), Some("# Example"));
        assert_eq!(data.data.metadata.status_code, Some(200));
        assert!(response.failure().is_none());
    }

    #[test]
    fn failure_envelope_decodes_by_tag() {
        let body = json!({
            "success": false,
            "error": "Job not found",
            "details": {"jobId": "nope"}
        })
        .to_string();

        let response = CrawlStatusResponse::from_json(&body).unwrap();
        let failure = response.failure().expect("tagged failure");
        assert_eq!(failure.error, "Job not found");
        assert!(!response.is_success());
    }

    #[test]
    fn missing_tag_is_its_own_error() {
        let err = ScrapeResponse::from_json(r#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, LlmCrawlError::MissingDiscriminator));
    }

    #[test]
    fn non_boolean_tag_is_its_own_error() {
        let err = ScrapeResponse::from_json(r#"{"success": "yes"}"#).unwrap_err();
        assert!(matches!(err, LlmCrawlError::MissingDiscriminator));
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err = ScrapeResponse::from_json("<html>502</html>").unwrap_err();
        assert!(matches!(err, LlmCrawlError::Decode(_)));
    }

    #[test]
    fn serialized_success_carries_no_error_field() {
        let envelope = MapResponse::Success(SiteMap {
            links: vec!["https://example.com/a".into()],
            scrape_id: None,
        });

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], json!(true));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn serialized_failure_carries_no_payload_fields() {
        let envelope = MapResponse::Failure(ApiFailure {
            error: "target unreachable".into(),
            details: None,
        });

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("target unreachable"));
        assert!(value.get("links").is_none());
    }

    #[test]
    fn envelope_round_trips_through_json() {
        let envelope = CrawlResponse::Success(CrawlJob {
            id: "job-1".into(),
            url: "https://example.com".into(),
        });

        let body = serde_json::to_string(&envelope).unwrap();
        let decoded = CrawlResponse::from_json(&body).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn metadata_unknown_keys_round_trip() {
        let body = json!({
            "title": "Example",
            "statusCode": 200,
            "x-custom-header": "kept",
            "crawlGeneration": 3
        });

        let metadata: DocumentMetadata = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Example"));
        assert_eq!(metadata.extra["x-custom-header"], json!("kept"));
        assert_eq!(metadata.extra["crawlGeneration"], json!(3));

        let round_tripped = serde_json::to_value(&metadata).unwrap();
        assert_eq!(round_tripped, body);
    }

    #[test]
    fn job_status_terminality() {
        assert!(!JobStatus::Scraping.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn job_status_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&JobStatus::Scraping).unwrap(), "\"scraping\"");
        assert!(serde_json::from_str::<JobStatus>("\"paused\"").is_err());
    }

    #[test]
    fn crawl_status_parses_counters_and_cursor() {
        let body = json!({
            "success": true,
            "status": "scraping",
            "completed": 5,
            "total": 50,
            "expiresAt": "2026-09-01T00:00:00Z",
            "next": "https://api.llmcrawl.dev/v1/crawl/job-1?skip=10",
            "data": []
        })
        .to_string();

        let response = CrawlStatusResponse::from_json(&body).unwrap();
        let status = response.success().unwrap();
        assert_eq!(status.status, JobStatus::Scraping);
        assert_eq!((status.completed, status.total), (5, 50));
        assert!(status.next.as_deref().unwrap().contains("skip=10"));
    }

    #[test]
    fn failure_body_sniffing_never_fabricates() {
        assert!(ApiFailure::from_body("not json").is_none());
        assert!(ApiFailure::from_body(r#"{"error": "no tag"}"#).is_none());
        assert!(ApiFailure::from_body(r#"{"success": true, "error": "x"}"#).is_none());

        let failure =
            ApiFailure::from_body(r#"{"success": false, "error": "Payment required"}"#).unwrap();
        assert_eq!(failure.error, "Payment required");
    }
}
