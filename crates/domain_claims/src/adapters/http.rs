//! HTTP Claim Gateway
//!
//! REST adapter for the claims back office. It implements
//! `ClaimWizardGateway` by translating each operation into one HTTP call:
//!
//! | Operation | Request |
//! |---|---|
//! | `find_contract` | `GET {base}/contracts?number=…` |
//! | `list_available_experts` | `GET {base}/experts/available?date=YYYY-MM-DD` |
//! | `create_claim` | `POST {base}/claims` |
//!
//! # Error Handling
//!
//! Responses are mapped to `PortError` variants:
//! - 404 on contract lookup -> `Ok(None)`
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - other 4xx -> `PortError::Rejected` with the body's `message`
//! - timeouts -> `PortError::Timeout`
//! - connect failures -> `PortError::Connection`

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::RETRY_AFTER;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use core_kernel::{ClaimId, DomainPort, OperationMetadata, PortError};

use crate::claim::ClaimSubmission;
use crate::contract::ContractRecord;
use crate::expert::ExpertRecord;
use crate::ports::ClaimWizardGateway;

const CORRELATION_HEADER: &str = "X-Correlation-Id";
const INITIATOR_HEADER: &str = "X-Initiated-By";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
const SERVICE_NAME: &str = "claims back office";

/// Configuration for the HTTP claim gateway
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Base URL of the API (e.g., "https://claims.example.com/api/v1")
    pub base_url: String,

    /// Bearer token sent with every request
    pub api_token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

/// Response body of a successful claim creation
#[derive(Debug, Deserialize)]
struct CreatedClaim {
    id: ClaimId,
}

/// REST implementation of `ClaimWizardGateway`
#[derive(Debug, Clone)]
pub struct HttpClaimGateway {
    config: HttpGatewayConfig,
    client: reqwest::Client,
}

impl HttpClaimGateway {
    /// Creates a new gateway
    ///
    /// # Errors
    ///
    /// Returns `PortError::Internal` if the HTTP client cannot be built
    pub fn new(config: HttpGatewayConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(error)),
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpGatewayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn prepare(&self, mut request: RequestBuilder, metadata: Option<&OperationMetadata>) -> RequestBuilder {
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }
        if let Some(metadata) = metadata {
            if let Some(correlation_id) = &metadata.correlation_id {
                request = request.header(CORRELATION_HEADER, correlation_id);
            }
            if let Some(initiator) = &metadata.initiated_by {
                request = request.header(INITIATOR_HEADER, initiator);
            }
        }
        request
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response, PortError> {
        tracing::debug!(operation, "Sending gateway request");
        request
            .send()
            .await
            .map_err(|error| self.transport_error(operation, error))
    }

    fn transport_error(&self, operation: &str, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: timeout_ms(self.config.timeout_secs),
            }
        } else if error.is_connect() {
            PortError::Connection {
                message: format!("{operation}: cannot reach {}", self.config.base_url),
                source: Some(Box::new(error)),
            }
        } else {
            PortError::Internal {
                message: format!("{operation}: request failed"),
                source: Some(Box::new(error)),
            }
        }
    }

    async fn decode<T: for<'de> Deserialize<'de>>(
        operation: &str,
        response: Response,
    ) -> Result<T, PortError> {
        response.json::<T>().await.map_err(|error| PortError::Transformation {
            message: format!("{operation}: unexpected response body: {error}"),
        })
    }
}

fn timeout_ms(timeout_secs: u64) -> u64 {
    timeout_secs.saturating_mul(1000)
}

/// Turns a non-success response into a `PortError`
async fn error_from_response(operation: &str, response: Response) -> PortError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    tracing::warn!(operation, status = status.as_u16(), "Gateway request failed");
    status_error(status, retry_after, &body)
}

/// Maps an HTTP status and body to the matching `PortError`
///
/// A server error whose body carries a message is reported as a rejection.
pub(crate) fn status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> PortError {
    let remote_message = extract_error_message(body);

    match (status, remote_message) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, message) => PortError::Unauthorized {
            message: message.unwrap_or_else(|| reason(status)),
        },
        (StatusCode::TOO_MANY_REQUESTS, _) => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        (status, None) if status.is_server_error() => PortError::ServiceUnavailable {
            service: SERVICE_NAME.to_string(),
        },
        (status, message) => PortError::Rejected {
            message: message.unwrap_or_else(|| reason(status)),
        },
    }
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("request failed").to_string()
}

/// Finds the human-readable message in an error body
///
/// Accepts `{"message": …}`, `{"body": {"message": …}}` and a list of such
/// objects, taking the first message found.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    fn find(value: &Value) -> Option<String> {
        match value {
            Value::Object(fields) => fields
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| fields.get("body").and_then(find)),
            Value::Array(items) => items.iter().find_map(find),
            _ => None,
        }
    }

    let value: Value = serde_json::from_str(body).ok()?;
    find(&value).filter(|message| !message.trim().is_empty())
}

impl DomainPort for HttpClaimGateway {}

#[async_trait]
impl ClaimWizardGateway for HttpClaimGateway {
    async fn find_contract(
        &self,
        contract_number: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<ContractRecord>, PortError> {
        const OPERATION: &str = "find_contract";
        let request = self.prepare(
            self.client
                .get(self.url("contracts"))
                .query(&[("number", contract_number)]),
            metadata.as_ref(),
        );
        let response = self.send(OPERATION, request).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Self::decode(OPERATION, response).await,
            _ => Err(error_from_response(OPERATION, response).await),
        }
    }

    async fn list_available_experts(
        &self,
        target_date: NaiveDate,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ExpertRecord>, PortError> {
        const OPERATION: &str = "list_available_experts";
        let date = target_date.format("%Y-%m-%d").to_string();
        let request = self.prepare(
            self.client
                .get(self.url("experts/available"))
                .query(&[("date", date.as_str())]),
            metadata.as_ref(),
        );
        let response = self.send(OPERATION, request).await?;

        if response.status().is_success() {
            Self::decode(OPERATION, response).await
        } else {
            Err(error_from_response(OPERATION, response).await)
        }
    }

    async fn create_claim(
        &self,
        submission: ClaimSubmission,
        metadata: Option<OperationMetadata>,
    ) -> Result<ClaimId, PortError> {
        const OPERATION: &str = "create_claim";
        let request = self.prepare(
            self.client.post(self.url("claims")).json(&submission),
            metadata.as_ref(),
        );
        let response = self.send(OPERATION, request).await?;

        if response.status().is_success() {
            let created: CreatedClaim = Self::decode(OPERATION, response).await?;
            Ok(created.id)
        } else {
            Err(error_from_response(OPERATION, response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_top_level_message() {
        assert_eq!(
            extract_error_message(r#"{"message":"Duplicate claim"}"#),
            Some("Duplicate claim".to_string())
        );
    }

    #[test]
    fn test_extract_nested_body_message() {
        assert_eq!(
            extract_error_message(r#"{"body":{"message":"Duplicate claim"}}"#),
            Some("Duplicate claim".to_string())
        );
    }

    #[test]
    fn test_extract_from_error_list() {
        let body = r#"[{"errorCode":"FIELD_CUSTOM_VALIDATION_EXCEPTION","message":"Incident date is in the future"}]"#;
        assert_eq!(
            extract_error_message(body),
            Some("Incident date is in the future".to_string())
        );
    }

    #[test]
    fn test_extract_ignores_plain_text() {
        assert_eq!(extract_error_message("Bad Gateway"), None);
        assert_eq!(extract_error_message(r#"{"message":"  "}"#), None);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, None, ""),
            PortError::Unauthorized { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, Some(5), ""),
            PortError::RateLimited { retry_after_secs: 5 }
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, None, ""),
            PortError::RateLimited { retry_after_secs: DEFAULT_RETRY_AFTER_SECS }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, None, ""),
            PortError::ServiceUnavailable { .. }
        ));
    }

    #[test]
    fn test_server_error_with_message_is_rejection() {
        let error = status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            r#"{"body":{"message":"Duplicate claim"}}"#,
        );
        assert!(matches!(error, PortError::Rejected { .. }));
        assert_eq!(error.user_message(), "Duplicate claim");
        assert!(!error.is_transient());

        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, None, "<html>down</html>"),
            PortError::ServiceUnavailable { .. }
        ));
    }

    #[test]
    fn test_timeout_ms_saturates() {
        assert_eq!(timeout_ms(30), 30_000);
        assert_eq!(timeout_ms(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_rejection_without_message_uses_reason() {
        let error = status_error(StatusCode::CONFLICT, None, "");
        assert_eq!(error.user_message(), "Conflict");
    }

    #[test]
    fn test_url_joining() {
        let gateway = HttpClaimGateway::new(HttpGatewayConfig {
            base_url: "http://localhost:9000/api/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gateway.url("claims"), "http://localhost:9000/api/claims");
    }
}
