use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::RandomResult, error::ServiceErrorBody};

use crate::error::RequestError;

const MAX_ERROR_BODY_CHARS: usize = 200;

#[async_trait]
pub trait RandomTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RandomResult, RequestError>;
}

pub struct MissingTransport;

#[async_trait]
impl RandomTransport for MissingTransport {
    async fn fetch(&self, url: &str) -> Result<RandomResult, RequestError> {
        Err(RequestError::Network(format!(
            "no transport configured for {url}"
        )))
    }
}

pub struct HttpTransport {
    http: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self::with_client(Client::new(), timeout)
    }

    pub fn with_client(http: Client, timeout: Option<Duration>) -> Self {
        Self { http, timeout }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl RandomTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<RandomResult, RequestError> {
        let mut request = self.http.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RequestError::Http {
                status: status.as_u16(),
                message: service_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| RequestError::Parse(err.to_string()))
    }
}

fn service_error_message(body: &str) -> String {
    if let Some(message) = serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message())
    {
        return message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    let mut excerpt: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        excerpt.push('…');
    }
    excerpt
}
