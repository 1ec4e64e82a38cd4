// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Request validation for the HTTP boundary.
//!
//! The core (registry and logs) is infallible; anything malformed is
//! rejected here before it gets that far.

use thiserror::Error;

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid room ID: {0}")]
    InvalidRoomId(String),

    #[error("Invalid message: {0}")]
    InvalidText(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a room identifier.
///
/// Room IDs are arbitrary case-sensitive tokens; only empty, oversized, or
/// control-character identifiers are rejected.
pub fn validate_room_id(room_id: &str, max_len: usize) -> ValidationResult<&str> {
    if room_id.is_empty() {
        return Err(ValidationError::InvalidRoomId(
            "Room ID must not be empty".to_string(),
        ));
    }

    if room_id.len() > max_len {
        return Err(ValidationError::InvalidRoomId(format!(
            "Room ID must not exceed {max_len} bytes"
        )));
    }

    if room_id.chars().any(char::is_control) {
        return Err(ValidationError::InvalidRoomId(
            "Room ID must not contain control characters".to_string(),
        ));
    }

    Ok(room_id)
}

/// Validate a message body.
pub fn validate_text(text: &str, max_len: usize) -> ValidationResult<&str> {
    if text.trim().is_empty() {
        return Err(ValidationError::InvalidText(
            "Message text must not be empty".to_string(),
        ));
    }

    if text.len() > max_len {
        return Err(ValidationError::InvalidText(format!(
            "Message text must not exceed {max_len} bytes"
        )));
    }

    Ok(text)
}
