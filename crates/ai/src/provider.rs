//! The provider trait the rest of the platform programs against.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use verdant_core::identify::{CareInstructions, Identification};

use crate::error::AiError;

/// A plant identification/care-generation service.
///
/// Implementations are interchangeable: the mock answers from a lookup
/// table, the HTTP client calls a real service. Both take a
/// cancellation token so callers can abandon in-flight work.
#[async_trait]
pub trait PlantIdentifier: Send + Sync {
    /// Identify the plant in a photo.
    async fn identify(
        &self,
        photo_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Identification, AiError>;

    /// Generate structured care text for a named plant.
    async fn generate_care(
        &self,
        name: &str,
        scientific_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<CareInstructions, AiError>;
}
