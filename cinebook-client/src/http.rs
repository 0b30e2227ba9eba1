//! HTTP transport for the booking backend

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::MessageResponse;

/// HTTP client for making JSON requests to the booking backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request with query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, text));
        }

        serde_json::from_str(&text).map_err(Into::into)
    }

    /// `{message}` / `{error}` bodies carry the text shown to the user
    fn error_from_body(status: StatusCode, text: String) -> ClientError {
        let message = serde_json::from_str::<MessageResponse>(&text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or(text);
        tracing::warn!(%status, %message, "request failed");
        ClientError::Server { status, message }
    }
}
