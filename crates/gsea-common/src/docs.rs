//! Documentation links for error codes
//!
//! Every parse or aggregation failure carries a numeric code. Callers surface
//! it together with a link built here, so users land on the page describing
//! the format rule they broke.

/// Default documentation base when `GSEA_DOCS_URL` is not set.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://www.gsea-msigdb.org/gsea/doc/errors";

/// Environment variable overriding [`DEFAULT_DOCS_BASE_URL`]
pub const DOCS_URL_ENV: &str = "GSEA_DOCS_URL";

/// Resolve the documentation base URL, honouring the environment override
pub fn docs_base_url() -> String {
    match std::env::var(DOCS_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_DOCS_BASE_URL.to_string(),
    }
}

/// Link to the documentation page for an error code
pub fn error_help_url(code: u32) -> String {
    format!("{}/{}", docs_base_url(), code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_help_url_ends_with_code() {
        let url = error_help_url(5005);
        assert!(url.ends_with("/5005"));
        assert!(url.starts_with("http"));
    }
}
