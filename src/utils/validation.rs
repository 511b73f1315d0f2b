use crate::utils::error::{Result, StatsError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: &str, reason: String) -> StatsError {
    StatsError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    }
}

pub fn validate_url(field: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field, url_str, "URL cannot be empty".to_string()));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "Path cannot be empty".to_string()));
    }

    if path.contains('\0') {
        return Err(invalid(field, path, "Path contains null bytes".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("lookup_endpoint", "https://example.com").is_ok());
        assert!(validate_url("lookup_endpoint", "http://example.com").is_ok());
        assert!(validate_url("lookup_endpoint", "").is_err());
        assert!(validate_url("lookup_endpoint", "invalid-url").is_err());
        assert!(validate_url("lookup_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("stats_dir", "raw").is_ok());
        assert!(validate_path("stats_dir", "utils/raw").is_ok());
        assert!(validate_path("stats_dir", "").is_err());
        assert!(validate_path("stats_dir", "   ").is_err());
        assert!(validate_path("stats_dir", "bad\0path").is_err());
    }
}
