use std::str::FromStr;

use super::ApiError;

/// `None` for absent or blank values; the value itself is kept untrimmed.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an identifier field, naming the field on failure.
pub fn parse_id<T>(field: &str, value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|_| ApiError::Validation(format!("Invalid {}: {}", field, value)))
}
