//! Tower middleware layers for the Logo Objects HTTP client.
//!
//! Layers wrap the transport through Tower's `Layer` trait. The
//! [`LogoClientBuilder`](crate::LogoClientBuilder) installs them in this
//! order, outermost first: logging, retry, bearer auth.
//!
//! - [`BearerAuthLayer`] - Adds `Authorization: Bearer <token>` from a [`SharedToken`]
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//! - [`RetryPolicy`] - Idempotent-only retry policy for [`RetryLayer`]
//!
//! # Example
//!
//! ```ignore
//! use logo_objects::HyperClient;
//! use logo_objects::middleware::BearerAuthLayer;
//!
//! let client = HyperClient::builder()
//!     .with_logging()
//!     .layer(BearerAuthLayer::new("access-token"))
//!     .build();
//! ```

mod bearer_auth;
mod logging;
mod retry;

pub use bearer_auth::{BearerAuth, BearerAuthLayer, SharedToken};
pub use logging::{LogLevel, Logging, LoggingLayer};
pub use retry::RetryPolicy;

// Re-export tower types for convenience
pub use tower::retry::RetryLayer;
pub use tower::{Layer, ServiceBuilder};
