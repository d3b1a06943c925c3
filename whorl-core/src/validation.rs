//! Domain name cleanup before a lookup.

use crate::error::{Result, WhorlError};

/// Normalize and validate a domain name
///
/// This function:
/// - Converts to lowercase and trims whitespace
/// - Removes http:// and https:// prefixes, paths and a leading `www.`
/// - Requires at least one dot and only alphanumerics, hyphens and dots
///
/// Internationalized names must already be in their ASCII form.
pub fn normalize_domain(domain: &str) -> Result<String> {
    let domain = domain.trim().to_lowercase();

    let domain = domain
        .strip_prefix("http://")
        .or_else(|| domain.strip_prefix("https://"))
        .unwrap_or(&domain);

    let domain = domain.split('/').next().unwrap_or(domain);
    let domain = domain.strip_prefix("www.").unwrap_or(domain);
    let domain = domain.trim_end_matches('.');

    if domain.is_empty() || !domain.contains('.') {
        return Err(WhorlError::InvalidDomain(domain.to_string()));
    }

    let valid = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid || domain.split('.').any(|label| label.is_empty()) {
        return Err(WhorlError::InvalidDomain(domain.to_string()));
    }

    Ok(domain.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("example.com").unwrap(), "example.com");
        assert_eq!(normalize_domain(" EXAMPLE.COM ").unwrap(), "example.com");
        assert_eq!(
            normalize_domain("https://www.example.co.uk/path").unwrap(),
            "example.co.uk"
        );
        assert_eq!(normalize_domain("example.com.").unwrap(), "example.com");
    }

    #[test]
    fn test_normalize_domain_rejects() {
        assert!(normalize_domain("invalid").is_err());
        assert!(normalize_domain("").is_err());
        assert!(normalize_domain("exa mple.com").is_err());
        assert!(normalize_domain("example..com").is_err());
        assert!(normalize_domain("bücher.de").is_err());
    }
}
