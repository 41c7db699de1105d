//! Identifier scraper for Threads.net pages
//!
//! Profile and post pages embed the numeric IDs the GraphQL API needs in
//! inline JSON. The markup is undocumented, so extraction sits behind
//! [`IdentifierExtractor`] and call sites never see the strategy.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{IdentifierKind, Result, ThreadScrapeError};

static USER_ID_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""userID":"(\d+)""#).ok());
static POST_ID_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""postID":"(\d+)""#).ok());
static COMPOSITE_ID_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""id":"(\d+_\d+)""#).ok());

/// Strategy for pulling identifiers out of a response body
pub trait IdentifierExtractor: Send + Sync {
    /// Returns the first identifier of `kind` found in `body`
    fn find(&self, kind: IdentifierKind, body: &str) -> Option<String>;
}

/// Extracts identifiers by matching the embedded JSON field names
///
/// - user: `"userID":"<digits>"`
/// - post: `"postID":"<digits>"`
/// - composite: `"id":"<digits>_<digits>"`
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexExtractor;

impl IdentifierExtractor for RegexExtractor {
    fn find(&self, kind: IdentifierKind, body: &str) -> Option<String> {
        let re = match kind {
            IdentifierKind::User => USER_ID_RE.as_ref(),
            IdentifierKind::Post => POST_ID_RE.as_ref(),
            IdentifierKind::Composite => COMPOSITE_ID_RE.as_ref(),
        }?;

        re.captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Extracts an identifier or fails with `IdentifierNotFound`
///
/// # Arguments
/// * `extractor` - Extraction strategy
/// * `kind` - Which identifier to look for
/// * `body` - Response body to search
/// * `origin` - URL or handle the body came from, for the error
pub fn extract_identifier(
    extractor: &dyn IdentifierExtractor,
    kind: IdentifierKind,
    body: &str,
    origin: &str,
) -> Result<String> {
    extractor.find(kind, body).ok_or_else(|| {
        warn!(%kind, origin, "identifier not found in response");
        ThreadScrapeError::IdentifierNotFound {
            kind,
            origin: origin.to_string(),
        }
    })
}

/// Extracts the numeric user ID from a profile page
pub fn extract_user_id(
    extractor: &dyn IdentifierExtractor,
    body: &str,
    origin: &str,
) -> Result<u64> {
    let raw = extract_identifier(extractor, IdentifierKind::User, body, origin)?;
    raw.parse::<u64>()
        .map_err(|_| ThreadScrapeError::IdentifierNotFound {
            kind: IdentifierKind::User,
            origin: origin.to_string(),
        })
}
