//! Gateway Adapters
//!
//! Implementations of `ClaimWizardGateway` that talk to a real remote
//! system. The in-memory double lives next to the port in `ports::mock`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::adapters::{HttpClaimGateway, HttpGatewayConfig};
//! use domain_claims::ClaimWizardGateway;
//! use std::sync::Arc;
//!
//! let config = HttpGatewayConfig {
//!     base_url: "https://claims.example.com/api/v1".to_string(),
//!     api_token: Some("secret".to_string()),
//!     timeout_secs: 30,
//! };
//!
//! let gateway: Arc<dyn ClaimWizardGateway> = Arc::new(HttpClaimGateway::new(config)?);
//! ```

pub mod http;

pub use http::{HttpClaimGateway, HttpGatewayConfig};
