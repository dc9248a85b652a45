use crate::error::ApiError;
use serde::Deserialize;

const API_BASE: &str = "https://haddock.nanoy.fr/api";

/// Client for the remote word service. One endpoint per word category,
/// each returning `{"msg": <string>}`.
pub struct WordApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct WordResponse {
    msg: String,
}

impl WordApi {
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn vocabulary(&self) -> Result<String, ApiError> {
        self.fetch_word("vocabulaire").await
    }

    pub async fn insults(&self) -> Result<String, ApiError> {
        self.fetch_word("insultes").await
    }

    async fn fetch_word(&self, endpoint: &str) -> Result<String, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.get(&url).send().await.map_err(|e| ApiError::Request {
            url: url.clone(),
            source: e,
        })?;
        let body: WordResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed { url, source: e })?;
        Ok(body.msg)
    }
}

impl Default for WordApi {
    fn default() -> Self {
        Self::new()
    }
}
