use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be 100 characters or less")]
    TitleTooLong,

    #[error("Description must be 500 characters or less")]
    DescriptionTooLong,
}

// Trims the title and checks it is non-empty and within the limit.
pub fn normalize_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(title.to_string())
}

// Trims the description; blank collapses to `None`.
pub fn normalize_description(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(description) = raw.map(str::trim) else {
        return Ok(None);
    };
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    if description.is_empty() {
        return Ok(None);
    }
    Ok(Some(description.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_rules() {
        assert_eq!(normalize_title(""), Err(ValidationError::TitleRequired));
        assert_eq!(normalize_title("   "), Err(ValidationError::TitleRequired));
        assert_eq!(normalize_title(&"a".repeat(101)), Err(ValidationError::TitleTooLong));
        assert_eq!(normalize_title(&"a".repeat(100)), Ok("a".repeat(100)));
        assert_eq!(normalize_title("  Buy milk "), Ok("Buy milk".to_string()));
    }

    #[test]
    fn test_title_limit_counts_trimmed_chars() {
        let padded = format!("  {}  ", "é".repeat(100));
        assert_eq!(normalize_title(&padded), Ok("é".repeat(100)));
    }

    #[test]
    fn test_description_rules() {
        assert_eq!(normalize_description(None), Ok(None));
        assert_eq!(normalize_description(Some("")), Ok(None));
        assert_eq!(normalize_description(Some("  \t ")), Ok(None));
        assert_eq!(
            normalize_description(Some(" two litres ")),
            Ok(Some("two litres".to_string()))
        );
        assert_eq!(
            normalize_description(Some("d".repeat(501).as_str())),
            Err(ValidationError::DescriptionTooLong)
        );
        assert!(normalize_description(Some("d".repeat(500).as_str())).is_ok());
    }

    #[test]
    fn test_messages_match_api_contract() {
        assert_eq!(ValidationError::TitleRequired.to_string(), "Title is required");
        assert_eq!(
            ValidationError::TitleTooLong.to_string(),
            "Title must be 100 characters or less"
        );
        assert_eq!(
            ValidationError::DescriptionTooLong.to_string(),
            "Description must be 500 characters or less"
        );
    }
}
