//! Name validation for rename operations
//!
//! Validation happens on the UI thread before a rename task is spawned,
//! so workers can assume well-formed names.

use crate::domain::errors::DomainError;

/// Repository names: non-empty ASCII alphanumerics plus `-`, `_`, `.`
pub fn validate_repository_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidRepositoryName(
            "name must not be empty".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(DomainError::InvalidRepositoryName(format!(
            "'{}' may only contain letters, digits, '-', '_' and '.'",
            name
        )));
    }
    Ok(())
}

/// File names: non-empty, no path separators
pub fn validate_file_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidFileName(
            "name must not be empty".to_string(),
        ));
    }
    if name.contains('/') {
        return Err(DomainError::InvalidFileName(format!(
            "'{}' must not contain '/'",
            name
        )));
    }
    Ok(())
}
