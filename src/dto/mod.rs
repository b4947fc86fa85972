pub mod application_dto;
pub mod registry_dto;
pub mod service_dto;
pub mod vacancy_dto;

use crate::error::{Error, Result};

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<String> {
    non_blank(Some(value)).ok_or_else(|| Error::Validation(format!("{} must not be blank", field)))
}
