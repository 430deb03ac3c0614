use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::constants::network::{TIMEOUT_CONNECTION_MS, TIMEOUT_IDLE_MS};
use crate::errors::{SearchError, ToolError};
use crate::services::credentials::Credential;
use crate::services::logger::Logger;
use crate::utils::redact::redact_header_value;

/// Raw backend reply. The status is passed through uninterpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Process-wide HTTPS client for the search backend. Cloning shares the
/// underlying connection pool.
#[derive(Clone)]
pub struct SearchClient {
    logger: Logger,
    client: Client,
}

impl SearchClient {
    pub fn new(logger: Logger) -> Result<Self, ToolError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(TIMEOUT_CONNECTION_MS))
            .pool_idle_timeout(Duration::from_millis(TIMEOUT_IDLE_MS))
            .build()
            .map_err(|err| ToolError::internal(format!("Failed to build HTTP client: {}", err)))?;
        Ok(Self::with_client(logger, client))
    }

    pub fn with_client(logger: Logger, client: Client) -> Self {
        Self {
            logger: logger.child("http"),
            client,
        }
    }

    pub async fn post_search<T: Serialize + ?Sized>(
        &self,
        url: &str,
        credential: &Credential,
        body: &T,
        debug: bool,
    ) -> Result<RawResponse, SearchError> {
        let payload = serde_json::to_vec(body)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !credential.is_empty() {
            let value = HeaderValue::from_str(credential.as_header_value())
                .map_err(|err| SearchError::transport("create request", 0, err))?;
            headers.insert(AUTHORIZATION, value);
        }

        if debug {
            self.dump_request(url, &headers, &payload);
        }

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(payload)
            .send()
            .await
            .map_err(|err| SearchError::transport("execute request", 0, err))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| SearchError::transport("read response", status, err))?;

        if debug {
            self.dump_response(status, &body);
        }

        Ok(RawResponse { status, body })
    }

    fn dump_request(&self, url: &str, headers: &HeaderMap, payload: &[u8]) {
        let mut lines = vec![
            "--- Vertex Search Request ---".to_string(),
            format!("POST {}", url),
        ];
        for (name, value) in headers {
            let raw = value.to_str().unwrap_or("<binary>");
            lines.push(format!(
                "{}: {}",
                name.as_str(),
                redact_header_value(name.as_str(), raw)
            ));
        }
        lines.push(String::new());
        lines.push(String::from_utf8_lossy(payload).into_owned());
        self.logger.info(&lines.join("\n"), None);
    }

    fn dump_response(&self, status: u16, body: &[u8]) {
        let rendered = match serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
        {
            Some(pretty) => format!("Body:\n{}", pretty),
            None => format!("Body (raw): {}", String::from_utf8_lossy(body)),
        };
        self.logger.info(
            &format!(
                "--- Vertex Search Response ---\nStatus Code: {}\n{}",
                status, rendered
            ),
            None,
        );
    }
}
