//! URL helper functions for Threads.net
//!
//! Provides functions for building endpoint and profile URLs and for
//! reducing a profile reference to a bare handle.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use crate::error::{Result, ThreadScrapeError};

/// Public web origin of Threads.net
pub const BASE_URL: &str = "https://www.threads.net";

static PROFILE_URL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^https://[^/]+/@([^/]+)").ok());

/// Builds the GraphQL endpoint URL
///
/// # Example
/// ```
/// use threadscrape_core::url::build_graphql_url;
/// let url = build_graphql_url("https://www.threads.net");
/// assert_eq!(url, "https://www.threads.net/api/graphql");
/// ```
pub fn build_graphql_url(base_url: &str) -> String {
    format!("{}/api/graphql", base_url.trim_end_matches('/'))
}

/// Builds the text-only post endpoint URL
///
/// # Example
/// ```
/// use threadscrape_core::url::build_text_post_url;
/// let url = build_text_post_url("https://www.threads.net");
/// assert_eq!(url, "https://www.threads.net/api/v1/media/configure_text_only_post/");
/// ```
pub fn build_text_post_url(base_url: &str) -> String {
    format!(
        "{}/api/v1/media/configure_text_only_post/",
        base_url.trim_end_matches('/')
    )
}

/// Builds the profile page URL for a handle
///
/// # Example
/// ```
/// use threadscrape_core::url::build_profile_url;
/// let url = build_profile_url("https://www.threads.net", "zuck");
/// assert_eq!(url, "https://www.threads.net/@zuck");
/// ```
pub fn build_profile_url(base_url: &str, handle: &str) -> String {
    format!(
        "{}/@{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(handle)
    )
}

/// Moves a page URL onto the configured origin
///
/// The session cookie is scoped to `base_url`, so a post page is always
/// fetched from there. Path and query are kept; scheme, host and port are
/// taken from `base_url`.
///
/// # Errors
/// - `InvalidUrl` if either URL cannot be parsed or `url` is not http(s)
///
/// # Example
/// ```
/// use threadscrape_core::url::rebase_page_url;
/// let url = rebase_page_url("https://www.threads.net", "https://threads.net/@zuck/post/C1").unwrap();
/// assert_eq!(url, "https://www.threads.net/@zuck/post/C1");
/// ```
pub fn rebase_page_url(base_url: &str, url: &str) -> Result<String> {
    let page = Url::parse(url)
        .map_err(|e| ThreadScrapeError::InvalidUrl(format!("{}: {}", url, e)))?;
    if !matches!(page.scheme(), "http" | "https") {
        return Err(ThreadScrapeError::InvalidUrl(url.to_string()));
    }

    let mut rebased = Url::parse(base_url)
        .map_err(|e| ThreadScrapeError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    rebased.set_path(page.path());
    rebased.set_query(page.query());
    Ok(rebased.to_string())
}

/// Reduces a profile reference to a bare handle
///
/// Accepts either a handle (`"zuck"`, `"@zuck"`) or a profile URL of the
/// form `https://<host>/@<handle>`.
///
/// # Errors
/// - `InvalidArgument` if the reference is empty
/// - `InvalidUrl` if a URL does not match the profile shape
///
/// # Example
/// ```
/// use threadscrape_core::url::parse_handle;
/// assert_eq!(parse_handle("https://www.threads.net/@zuck").unwrap(), "zuck");
/// assert_eq!(parse_handle("@zuck").unwrap(), "zuck");
/// ```
pub fn parse_handle(reference: &str) -> Result<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(ThreadScrapeError::InvalidArgument(
            "Profile reference cannot be empty".to_string(),
        ));
    }

    if !trimmed.contains("://") {
        let handle = trimmed.trim_start_matches('@');
        if handle.is_empty() {
            return Err(ThreadScrapeError::InvalidArgument(
                "Profile handle cannot be empty".to_string(),
            ));
        }
        return Ok(handle.to_string());
    }

    let re = PROFILE_URL_RE
        .as_ref()
        .ok_or_else(|| ThreadScrapeError::InvalidUrl("Failed to compile regex".to_string()))?;

    re.captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ThreadScrapeError::InvalidUrl(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_graphql_url_trailing_slash() {
        assert_eq!(
            build_graphql_url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/api/graphql"
        );
    }

    #[test]
    fn test_build_profile_url_encodes_handle() {
        let url = build_profile_url(BASE_URL, "a b");
        assert_eq!(url, "https://www.threads.net/@a%20b");
    }

    #[test]
    fn test_parse_handle_plain() {
        assert_eq!(parse_handle("alice").unwrap(), "alice");
        assert_eq!(parse_handle("  @alice ").unwrap(), "alice");
    }

    #[test]
    fn test_parse_handle_from_url() {
        assert_eq!(parse_handle("https://www.threads.net/@alice").unwrap(), "alice");
        assert_eq!(
            parse_handle("https://www.threads.net/@alice/post/C1a2b3").unwrap(),
            "alice"
        );
    }

    #[test]
    fn test_parse_handle_rejects_other_urls() {
        match parse_handle("https://www.threads.net/alice") {
            Err(ThreadScrapeError::InvalidUrl(url)) => {
                assert_eq!(url, "https://www.threads.net/alice");
            }
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
        assert!(matches!(
            parse_handle("http://www.threads.net/@alice"),
            Err(ThreadScrapeError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_handle_empty() {
        assert!(matches!(
            parse_handle("   "),
            Err(ThreadScrapeError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_handle("@"),
            Err(ThreadScrapeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rebase_page_url_moves_to_base_origin() {
        assert_eq!(
            rebase_page_url("http://127.0.0.1:8080", "https://threads.net/@alice/post/C1?x=1").unwrap(),
            "http://127.0.0.1:8080/@alice/post/C1?x=1"
        );
        assert_eq!(
            rebase_page_url(BASE_URL, "https://www.threads.net/@alice/post/C1").unwrap(),
            "https://www.threads.net/@alice/post/C1"
        );
    }

    #[test]
    fn test_rebase_page_url_rejects_bad_input() {
        assert!(matches!(
            rebase_page_url(BASE_URL, "not a url"),
            Err(ThreadScrapeError::InvalidUrl(_))
        ));
        assert!(matches!(
            rebase_page_url(BASE_URL, "ftp://threads.net/@alice/post/C1"),
            Err(ThreadScrapeError::InvalidUrl(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_profile_url_round_trips_to_handle(handle in "[a-z0-9_.]{1,30}") {
            let url = format!("https://www.threads.net/@{}", handle);
            prop_assert_eq!(parse_handle(&url).unwrap(), handle);
        }
    }
}
