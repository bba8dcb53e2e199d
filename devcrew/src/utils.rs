//! Small shared utilities: timestamps and run identifiers.

use chrono::Utc;

/// Returns the current UTC time as an ISO 8601 formatted string.
///
/// Format: `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`.
#[must_use]
pub fn iso_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Generates a new v4 UUID as a string.
#[must_use]
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}
