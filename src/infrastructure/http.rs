//! `reqwest` client for the remote question service.

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use super::config::Config;
use crate::domain::{
    decode_distinct_fields, decode_questions, DistinctFieldSet, FetchError, FetchResult,
    FilterCriteria, Question, QuestionService,
};

const DISTINCT_FIELDS_PATH: &str = "question-distinct-fields";
const QUESTIONS_PATH: &str = "questions";

const USER_AGENT_VALUE: &str = concat!("prephub/", env!("CARGO_PKG_VERSION"));

/// Question service backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpQuestionService {
    client: Client,
    base_url: String,
}

impl HttpQuestionService {
    pub fn new(config: &Config) -> FetchResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn distinct_fields_url(&self) -> FetchResult<Url> {
        self.endpoint(DISTINCT_FIELDS_PATH)
    }

    /// URL for the question list. Only present criteria become parameters;
    /// with none present the URL carries no query string at all.
    pub fn questions_url(&self, criteria: &FilterCriteria) -> FetchResult<Url> {
        let mut url = self.endpoint(QUESTIONS_PATH)?;
        let pairs = criteria.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> FetchResult<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| FetchError::Network(format!("invalid URL {raw}: {e}")))
    }

    fn get(&self, url: Url) -> FetchResult<Vec<u8>> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "request rejected");
            return Err(FetchError::Server { status: status.as_u16() });
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Network(format!("failed to read body: {e}")))?;
        Ok(body.to_vec())
    }
}

impl QuestionService for HttpQuestionService {
    fn distinct_fields(&self) -> FetchResult<DistinctFieldSet> {
        let body = self.get(self.distinct_fields_url()?)?;
        decode_distinct_fields(&body)
    }

    fn questions(&self, criteria: &FilterCriteria) -> FetchResult<Vec<Question>> {
        let body = self.get(self.questions_url(criteria)?)?;
        decode_questions(&body)
    }
}
