use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use flowcell_core::config::ExecutorConfig;
use flowcell_core::error::{FlowcellError, Result};

/// One code-cell run, as the execution service expects it on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub node_id: String,
    /// The resolved upstream cell, or `None` for a root cell. The service
    /// uses it to chain variable state; to us it is an opaque key.
    pub parent_id: Option<String>,
    pub code: String,
}

/// The service's answer: captured stdout, or an error it caught itself.
/// Both fields may be present; `error` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecuteResponse {
    /// The text that belongs in the cell's output panel. A reported error
    /// takes precedence over stdout.
    pub fn into_output(self) -> String {
        match self.error {
            Some(error) => error,
            None => self.stdout.unwrap_or_default(),
        }
    }
}

/// Execution service — remote code runner.
pub trait ExecutionService: Send + Sync + 'static {
    /// Run one cell and return the service's verdict.
    fn execute(&self, request: ExecuteRequest) -> BoxFuture<'_, Result<ExecuteResponse>>;
}

/// HTTP client for the execution service.
pub struct HttpExecutionService {
    http: Client,
    base_url: String,
}

impl HttpExecutionService {
    pub fn new(config: &ExecutorConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FlowcellError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Probe the service's health endpoint.
    pub async fn health(&self) -> Result<()> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| FlowcellError::ExecRequest(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FlowcellError::ExecRequest(format!(
                "health check returned HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

impl ExecutionService for HttpExecutionService {
    fn execute(&self, request: ExecuteRequest) -> BoxFuture<'_, Result<ExecuteResponse>> {
        Box::pin(async move {
            let response = self
                .http
                .post(format!("{}/execute_node", self.base_url))
                .json(&request)
                .send()
                .await
                .map_err(|e| FlowcellError::ExecRequest(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                return Err(FlowcellError::ExecRequest(format!(
                    "HTTP {}: {}",
                    status, body
                )));
            }

            response
                .json::<ExecuteResponse>()
                .await
                .map_err(|e| FlowcellError::ExecParse(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = ExecuteRequest {
            node_id: "A".into(),
            parent_id: None,
            code: "x = 1".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["nodeId"], "A");
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert_eq!(json["code"], "x = 1");
    }

    #[test]
    fn test_response_error_takes_precedence() {
        let response = ExecuteResponse {
            stdout: Some("partial output".into()),
            error: Some("SyntaxError".into()),
        };
        assert_eq!(response.into_output(), "SyntaxError");
    }

    #[test]
    fn test_response_stdout() {
        let response: ExecuteResponse =
            serde_json::from_str(r#"{"stdout": "A, x = 1", "error": null}"#).unwrap();
        assert_eq!(response.into_output(), "A, x = 1");
    }

    #[test]
    fn test_response_empty() {
        let response: ExecuteResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_output(), "");
    }
}
