//! HTTP plumbing for the Bloom API

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};

/// Error envelope the server uses for non-2xx bodies
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the Bloom server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or(text);
            return match status {
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
                _ => Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                }),
            };
        }

        response.json().await.map_err(Into::into)
    }
}
