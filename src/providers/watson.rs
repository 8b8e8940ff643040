use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::KeywordProvider;

/// Watson Natural Language Understanding client
#[derive(Debug)]
pub struct WatsonNlu {
    /// HTTP client for API requests
    client: Client,
    /// IAM API key, sent as basic auth with user `apikey`
    api_key: String,
    /// Service instance URL
    url: String,
    /// API version date
    version: String,
}

/// Analyze request
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub features: Features,
}

/// Requested analysis features
#[derive(Debug, Default, Serialize)]
pub struct Features {
    pub keywords: KeywordOptions,
}

/// Keyword feature options; the service defaults are used when empty
#[derive(Debug, Default, Serialize)]
pub struct KeywordOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A single extracted keyword
#[derive(Debug, Deserialize)]
pub struct Keyword {
    pub text: String,
    #[serde(default)]
    pub relevance: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// Analyze response
#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

impl AnalyzeRequest {
    /// Request keywords only, with service defaults
    pub fn keywords(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            features: Features::default(),
        }
    }
}

impl WatsonNlu {
    /// Create a new Watson NLU client
    pub fn new(
        api_key: impl Into<String>,
        url: impl Into<String>,
        version: impl Into<String>,
        request_timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(request_timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            url: url.into(),
            version: version.into(),
        }
    }

    /// URL of the analyze endpoint for the configured version
    pub fn analyze_url(&self) -> Result<Url, ProviderError> {
        let base = format!("{}/v1/analyze", self.url.trim_end_matches('/'));
        let mut url = Url::parse(&base).map_err(|e| ProviderError::RequestFailed(format!("Invalid Watson URL {}: {}", base, e)))?;
        url.query_pairs_mut().append_pair("version", &self.version);
        Ok(url)
    }

    /// Run an analyze request
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ProviderError> {
        let response = self
            .client
            .post(self.analyze_url()?)
            .basic_auth("apikey", Some(&self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Watson NLU error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        response
            .json::<AnalyzeResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Watson response: {}", e)))
    }

    /// Keyword texts in response order
    pub fn extract_keyword_texts(response: AnalyzeResponse) -> Vec<String> {
        response.keywords.into_iter().map(|k| k.text).collect()
    }
}

#[async_trait]
impl KeywordProvider for WatsonNlu {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, ProviderError> {
        let response = self.analyze(&AnalyzeRequest::keywords(text)).await?;
        Ok(Self::extract_keyword_texts(response))
    }
}
