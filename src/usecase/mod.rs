//! Use cases: validated, single-purpose operations over the repositories.
//!
//! Every use case checks, in order: configuration, required strings
//! (non-empty after trimming), numeric bounds. Only then does it attach
//! device metadata and call the repository. Validation failures never
//! reach the network.

pub mod comments;
pub mod suggestions;
pub mod version;


pub use comments::CommentUseCases;
pub use suggestions::{SuggestionUseCases, VoteOutcome};
pub use version::{VersionUseCases, VERSION_REPORT_COOLDOWN};

use crate::error::{Result, SdkError};

/// Trimmed `value`, or `InvalidInput` naming `field` if it is blank.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SdkError::invalid_input(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trimmed optional text; blank values become `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Page limits must be strictly positive when present.
pub(crate) fn validate_limit(limit: Option<u32>) -> Result<()> {
    match limit {
        Some(0) => Err(SdkError::invalid_input("limit must be greater than 0")),
        _ => Ok(()),
    }
}
