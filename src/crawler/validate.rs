use super::error::InvalidUrlError;

const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Checks that `candidate` has a leading `http://` or `https://` at a minimum.
/// Nothing else about the string is inspected or normalized.
pub fn validate_url(candidate: &str) -> Result<(), InvalidUrlError> {
    if ALLOWED_SCHEMES.iter().any(|scheme| candidate.starts_with(scheme)) {
        Ok(())
    } else {
        Err(InvalidUrlError::InvalidFormat(candidate.to_string()))
    }
}

/// Validates a raw anchor `href` as handed over by a page fetcher.
/// A missing value is rejected as the wrong type.
pub fn validate_href(candidate: Option<&str>) -> Result<&str, InvalidUrlError> {
    let url = candidate.ok_or(InvalidUrlError::InvalidType)?;
    validate_url(url)?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("http://example.com/x").is_ok());
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            validate_url("ftp://x"),
            Err(InvalidUrlError::InvalidFormat("ftp://x".to_string()))
        );
        assert!(validate_url("notarealsite").is_err());
        assert!(validate_url("/relative/path").is_err());
        assert!(validate_url("").is_err());
        assert!(validate_url("mailto:someone@example.com").is_err());
    }

    /// Only the structural prefix counts, so these stay invalid
    #[test]
    fn test_prefix_is_case_sensitive_and_anchored() {
        assert!(validate_url("HTTP://example.com").is_err());
        assert!(validate_url(" http://example.com").is_err());
        assert!(validate_url("see http://example.com").is_err());
        assert!(validate_url("http:/example.com").is_err());
    }

    #[test]
    fn test_missing_href_is_invalid_type() {
        assert_eq!(validate_href(None), Err(InvalidUrlError::InvalidType));
        assert_eq!(validate_href(Some("https://a.test/")), Ok("https://a.test/"));
        assert!(matches!(
            validate_href(Some("not-a-url")),
            Err(InvalidUrlError::InvalidFormat(_))
        ));
    }
}
