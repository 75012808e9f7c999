//! Content library categories and access rules.
//!
//! The libraries (marketing assets, CPA and legal documents) are part of the
//! dashboard and only open to users who finished training.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Marketing assets (images, videos, copy).
pub const CATEGORY_MARKETING: &str = "marketing";
/// CPA documents.
pub const CATEGORY_CPA: &str = "cpa";
/// Legal documents.
pub const CATEGORY_LEGAL: &str = "legal";

/// All valid library categories.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_MARKETING, CATEGORY_CPA, CATEGORY_LEGAL];

/// Categories listed together on the CPA/legal page.
pub const CPA_LEGAL_CATEGORIES: &[&str] = &[CATEGORY_CPA, CATEGORY_LEGAL];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a category is one of the known library categories.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid library category '{category}'. Must be one of: {VALID_CATEGORIES:?}"
        )))
    }
}

/// Validate every category in a slice.
pub fn validate_categories(categories: &[&str]) -> Result<(), CoreError> {
    for category in categories {
        validate_category(category)?;
    }
    Ok(())
}

/// Libraries are only open to users whose dashboard access was granted.
pub fn require_dashboard_access(has_dashboard_access: bool) -> Result<(), CoreError> {
    if has_dashboard_access {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Complete all training videos to unlock the content libraries".to_string(),
        ))
    }
}
