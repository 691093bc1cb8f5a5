//! reqwest implementation of [`PowerApi`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::debug;

use super::{ClientError, Command, CommandRequest, PowerApi};

const USER_AGENT: &str = concat!("power-sidebar/", env!("CARGO_PKG_VERSION"));

/// Posts commands to `{server}/api/plugin/{plugin}`
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpClient {
    pub fn new(
        server: &str,
        plugin: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: plugin_endpoint(server, plugin),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn plugin_endpoint(server: &str, plugin: &str) -> String {
    format!("{}/api/plugin/{}", server.trim_end_matches('/'), plugin)
}

#[async_trait]
impl PowerApi for HttpClient {
    async fn send(&self, command: Command) -> Result<Value, ClientError> {
        debug!("POST {} command={}", self.endpoint, command);

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json; charset=UTF-8")
            .json(&CommandRequest { command });
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Request { command, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                command,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Request { command, source })?;

        // Plain acks come back as 204 with no body
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode { command, source })
    }
}
