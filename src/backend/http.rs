//! HTTP backend: one JSON POST per message.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::backend::{BackendError, ChatBackend, ChatRequest, ChatResponse};

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, message: &str) -> Result<String, BackendError> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        let url = self.endpoint();
        info!("POST {} ({} bytes)", url, message.len());

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Chat response status: {}", status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat endpoint error: {} - {}", status.as_u16(), err_body);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| BackendError::Parse(e.to_string()))?;

        debug!("Reply received ({} bytes)", parsed.reply.len());
        Ok(parsed.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let backend = HttpBackend::new("http://127.0.0.1:9010/");
        assert_eq!(backend.endpoint(), "http://127.0.0.1:9010/chat");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let backend = HttpBackend::new("https://example.com/koa");
        assert_eq!(backend.endpoint(), "https://example.com/koa/chat");
    }
}
