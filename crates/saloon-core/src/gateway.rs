//! Remote AI gateway seams.
//!
//! The orchestrator treats both gateways as black-box async functions. The
//! concrete HTTP implementations live in `saloon-interaction`.

use crate::analysis::AnalysisResult;
use crate::payload::ImagePayload;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a remote gateway call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Transport failure or non-success HTTP status
    #[error("Gateway request failed: {message}")]
    Request {
        status_code: Option<u16>,
        message: String,
    },

    /// The service answered but produced nothing usable
    #[error("Gateway returned no usable content: {0}")]
    EmptyResponse(String),

    /// The response body could not be interpreted
    #[error("Failed to parse gateway response: {0}")]
    Parse(String),

    /// Gateway is missing configuration (e.g. API key)
    #[error("Gateway configuration error: {0}")]
    Config(String),

    /// No answer within the allotted time
    #[error("Gateway did not respond within {0:?}")]
    Timeout(Duration),
}

impl GatewayError {
    /// Creates a Request error without status information
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            status_code: None,
            message: message.into(),
        }
    }
}

/// Produces a face/style assessment for a captured photo.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn analyze(&self, image: &ImagePayload) -> Result<AnalysisResult, GatewayError>;
}

/// Renders the captured photo with a new hairstyle.
#[async_trait]
pub trait SynthesisGateway: Send + Sync {
    /// Returns the generated image for `image` restyled per `directive`.
    async fn synthesize(
        &self,
        image: &ImagePayload,
        directive: &str,
    ) -> Result<ImagePayload, GatewayError>;
}
