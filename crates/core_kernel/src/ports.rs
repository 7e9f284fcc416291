//! Ports and Adapters Infrastructure
//!
//! Shared types for the hexagonal (ports and adapters) layout used by the
//! domain crates. A domain declares a port trait extending [`DomainPort`];
//! adapters implement it against a real remote system or an in-memory double.
//!
//! ```text
//!        Wizard session (domain_claims)
//!                    │
//!                    ▼
//!        ClaimWizardGateway port trait
//!           ▲                      ▲
//!           │                      │
//!   HTTP adapter (reqwest)   Mock adapter (tests)
//! ```
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait ClaimWizardGateway: DomainPort {
//!     async fn find_contract(&self, number: &str, metadata: Option<OperationMetadata>)
//!         -> Result<Option<ContractRecord>, PortError>;
//! }
//! ```

use std::collections::HashMap;
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this type so the domain can treat
/// the HTTP adapter and test doubles the same way.
#[derive(Debug, Error)]
pub enum PortError {
    /// The remote system refused the request with a human-readable reason
    #[error("Rejected: {message}")]
    Rejected {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// Rate limit exceeded for external API
    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        retry_after_secs: u64,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// A response could not be decoded into domain data
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Rejected error carrying the remote system's message
    pub fn rejected(message: impl Into<String>) -> Self {
        PortError::Rejected {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::RateLimited { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    /// Text suitable for showing to an operator
    ///
    /// Rejections carry the remote system's own wording verbatim; every other
    /// failure falls back to the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            PortError::Rejected { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// Metadata about a port operation for tracing across systems
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Correlation ID for tracing across systems
    pub correlation_id: Option<String>,
    /// User or system that initiated the operation
    pub initiated_by: Option<String>,
    /// Additional context as key-value pairs
    pub context: HashMap<String, String>,
}

impl OperationMetadata {
    /// Creates new metadata with a correlation ID
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            ..Default::default()
        }
    }

    /// Sets the initiator
    pub fn initiated_by(mut self, initiator: impl Into<String>) -> Self {
        self.initiated_by = Some(initiator.into());
        self
    }

    /// Adds context to the metadata
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
