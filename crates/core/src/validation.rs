//! Synchronous input validation for plants and rooms.
//!
//! Validation failures are raised before anything touches the
//! database and are surfaced to the caller verbatim; they are never
//! retried.

use crate::error::CoreError;

/// Maximum length of a plant or room name after trimming.
pub const MAX_NAME_LEN: usize = 100;

/// Minimum watering frequency in days.
pub const MIN_WATERING_FREQUENCY_DAYS: i32 = 1;

/// Maximum watering frequency in days.
pub const MAX_WATERING_FREQUENCY_DAYS: i32 = 365;

/// Maximum length of a photo URL.
pub const MAX_PHOTO_URL_LEN: usize = 2048;

/// Maximum length of free-text care fields.
pub const MAX_CARE_TEXT_LEN: usize = 10_000;

/// Validate and normalize a plant name. Returns the trimmed name.
pub fn validate_plant_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Plant name is required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Plant name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate and normalize a room name. Returns the trimmed name.
pub fn validate_room_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Room name is required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Room name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a watering frequency in days.
pub fn validate_frequency(days: i32) -> Result<(), CoreError> {
    if !(MIN_WATERING_FREQUENCY_DAYS..=MAX_WATERING_FREQUENCY_DAYS).contains(&days) {
        return Err(CoreError::Validation(format!(
            "Watering frequency must be between {MIN_WATERING_FREQUENCY_DAYS} and \
             {MAX_WATERING_FREQUENCY_DAYS} days"
        )));
    }
    Ok(())
}

/// Validate an optional photo URL.
pub fn validate_photo_url(url: &str) -> Result<(), CoreError> {
    if url.len() > MAX_PHOTO_URL_LEN {
        return Err(CoreError::Validation(format!(
            "Photo URL must be at most {MAX_PHOTO_URL_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate optional free-text care fields (summary or instructions).
pub fn validate_care_text(text: &str) -> Result<(), CoreError> {
    if text.chars().count() > MAX_CARE_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "Care text must be at most {MAX_CARE_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn plant_name_is_trimmed() {
        assert_eq!(validate_plant_name("  Monstera  ").unwrap(), "Monstera");
    }

    #[test]
    fn empty_plant_name_is_rejected_verbatim() {
        let err = validate_plant_name("   ").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Plant name is required");
    }

    #[test]
    fn overlong_plant_name_is_rejected() {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        assert_matches!(validate_plant_name(&name), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_room_name_is_rejected() {
        assert_matches!(validate_room_name(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn frequency_bounds_are_inclusive() {
        assert!(validate_frequency(1).is_ok());
        assert!(validate_frequency(365).is_ok());
    }

    #[test]
    fn frequency_out_of_range_is_rejected_verbatim() {
        for days in [0, -1, 366] {
            let err = validate_frequency(days).unwrap_err();
            assert_matches!(
                err,
                CoreError::Validation(msg)
                    if msg == "Watering frequency must be between 1 and 365 days"
            );
        }
    }
}
