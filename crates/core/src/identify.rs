//! Result types for the AI plant-identification and care-generation
//! collaborators.
//!
//! The services themselves are black boxes behind the provider trait in
//! `verdant-ai`; these are the structured results they return.

use serde::{Deserialize, Serialize};

/// Minimum confidence at which an identification is auto-accepted by
/// the add-plant wizard. Below this the wizard falls back to manual
/// naming.
pub const CONFIDENCE_THRESHOLD: f32 = 0.7;

/// A species identification returned by the identification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    pub scientific_name: String,
    pub common_name: String,
    /// Confidence score in `[0.0, 1.0]`.
    pub confidence: f32,
}

impl Identification {
    /// Whether this identification is confident enough to present as a
    /// result rather than routing to manual naming.
    pub fn is_confident(&self) -> bool {
        self.confidence >= CONFIDENCE_THRESHOLD
    }
}

/// Structured care text returned by the care-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareInstructions {
    /// One-line summary shown on the plant card.
    pub summary: String,
    /// Suggested watering frequency in days.
    pub watering_frequency_days: i32,
    pub light: String,
    pub water: String,
    pub soil: String,
    pub temperature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_threshold_is_inclusive() {
        let id = Identification {
            scientific_name: "Monstera deliciosa".into(),
            common_name: "Swiss Cheese Plant".into(),
            confidence: CONFIDENCE_THRESHOLD,
        };
        assert!(id.is_confident());
    }

    #[test]
    fn low_confidence_is_not_confident() {
        let id = Identification {
            scientific_name: "Unknown".into(),
            common_name: "Unknown".into(),
            confidence: 0.4,
        };
        assert!(!id.is_confident());
    }
}
