//! Mock identification/care service.
//!
//! Answers from a static lookup table with artificial latency so the
//! rest of the stack behaves as it would against the real service.
//! Matching is on filename/species hints: a photo of `monstera.jpg`
//! identifies as a Monstera; anything unrecognized comes back with low
//! confidence, which routes the wizard to manual naming.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use verdant_core::identify::{CareInstructions, Identification};

use crate::error::AiError;
use crate::provider::PlantIdentifier;
use crate::retry::with_timeout;

/// Photo extensions the mock accepts; anything else is an invalid
/// file, mirroring the real service's rejection.
const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// (match hint, scientific name, common name, confidence, watering days)
static SPECIES_TABLE: [(&str, &str, &str, f32, i32); 6] = [
    ("monstera", "Monstera deliciosa", "Swiss Cheese Plant", 0.94, 7),
    ("pothos", "Epipremnum aureum", "Golden Pothos", 0.91, 7),
    ("snake", "Dracaena trifasciata", "Snake Plant", 0.89, 14),
    ("ficus", "Ficus lyrata", "Fiddle Leaf Fig", 0.86, 7),
    ("calathea", "Goeppertia orbifolia", "Prayer Plant", 0.78, 5),
    ("cactus", "Cactaceae", "Cactus", 0.82, 21),
];

/// Lookup-table implementation of [`PlantIdentifier`].
pub struct MockIdentifier {
    latency: Duration,
}

impl MockIdentifier {
    /// Mock with the default artificial latency (800 ms), roughly what
    /// the real identification service takes.
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(800))
    }

    /// Mock with explicit latency; tests pass zero.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn lookup(hint: &str) -> Option<&'static (&'static str, &'static str, &'static str, f32, i32)> {
        let hint = hint.to_lowercase();
        SPECIES_TABLE.iter().find(|(key, ..)| hint.contains(key))
    }
}

impl Default for MockIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlantIdentifier for MockIdentifier {
    async fn identify(
        &self,
        photo_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Identification, AiError> {
        let extension = photo_url.rsplit('.').next().unwrap_or("").to_lowercase();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AiError::InvalidFile(format!(
                "Unsupported image format '.{extension}'"
            )));
        }

        let latency = self.latency;
        with_timeout(
            async move {
                tokio::time::sleep(latency).await;

                let identification = match Self::lookup(photo_url) {
                    Some((_, scientific, common, confidence, _)) => Identification {
                        scientific_name: (*scientific).to_string(),
                        common_name: (*common).to_string(),
                        confidence: *confidence,
                    },
                    // Unrecognized photo: low confidence, wizard falls
                    // back to manual naming.
                    None => Identification {
                        scientific_name: "Plantae".to_string(),
                        common_name: "Unknown plant".to_string(),
                        confidence: 0.31,
                    },
                };
                Ok(identification)
            },
            latency + Duration::from_secs(5),
            cancel,
        )
        .await
    }

    async fn generate_care(
        &self,
        name: &str,
        scientific_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<CareInstructions, AiError> {
        let hint = format!("{name} {}", scientific_name.unwrap_or(""));
        let latency = self.latency;
        with_timeout(
            async move {
                tokio::time::sleep(latency).await;

                let frequency = Self::lookup(&hint).map_or(7, |(.., days)| *days);
                Ok(CareInstructions {
                    summary: format!("Water every {frequency} days, bright indirect light"),
                    watering_frequency_days: frequency,
                    light: "Bright indirect light; avoid harsh midday sun".to_string(),
                    water: format!(
                        "Water every {frequency} days, when the top inch of soil is dry"
                    ),
                    soil: "Well-draining potting mix".to_string(),
                    temperature: "18-27 C; keep away from cold draughts".to_string(),
                })
            },
            latency + Duration::from_secs(5),
            cancel,
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn mock() -> MockIdentifier {
        MockIdentifier::with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn known_species_identifies_with_high_confidence() {
        let cancel = CancellationToken::new();
        let id = mock()
            .identify("photos/my-monstera.jpg", &cancel)
            .await
            .unwrap();
        assert_eq!(id.scientific_name, "Monstera deliciosa");
        assert!(id.is_confident());
    }

    #[tokio::test]
    async fn unknown_photo_returns_low_confidence() {
        let cancel = CancellationToken::new();
        let id = mock().identify("photos/IMG_4821.jpg", &cancel).await.unwrap();
        assert!(!id.is_confident());
    }

    #[tokio::test]
    async fn non_image_extension_is_an_invalid_file() {
        let cancel = CancellationToken::new();
        let err = mock().identify("photos/notes.pdf", &cancel).await.unwrap_err();
        assert_matches!(err, AiError::InvalidFile(_));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn care_uses_the_species_watering_frequency() {
        let cancel = CancellationToken::new();
        let care = mock()
            .generate_care("Snake Plant", Some("Dracaena trifasciata"), &cancel)
            .await
            .unwrap();
        assert_eq!(care.watering_frequency_days, 14);
        assert!(care.summary.contains("14 days"));
    }

    #[tokio::test]
    async fn care_for_unknown_species_defaults_to_weekly() {
        let cancel = CancellationToken::new();
        let care = mock().generate_care("Office fern", None, &cancel).await.unwrap();
        assert_eq!(care.watering_frequency_days, 7);
    }

    #[tokio::test]
    async fn cancelled_token_aborts_identification() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = mock().identify("photos/pothos.png", &cancel).await.unwrap_err();
        assert_matches!(err, AiError::Cancelled);
    }
}
