//! Error types for the Threads.net client
//!
//! One flat taxonomy for every failure the client can surface. Nothing is
//! retried or recovered internally; callers decide what to do with each kind.

use std::fmt;

use reqwest::StatusCode;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Which identifier the scraper was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// Numeric user ID embedded as `"userID":"..."` on profile pages
    User,
    /// Numeric post ID embedded as `"postID":"..."` on post pages
    Post,
    /// Composite `<number>_<number>` content ID embedded as `"id":"..."`
    Composite,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentifierKind::User => "userID",
            IdentifierKind::Post => "postID",
            IdentifierKind::Composite => "ID",
        };
        f.write_str(name)
    }
}

/// Error type for all Threads.net client operations
///
/// Implements Display for human-readable messages and Serialize
/// so errors can be handed to JSON-speaking front ends as plain strings.
#[derive(Error, Debug)]
pub enum ThreadScrapeError {
    /// Credential bundle is missing keys or has non-string values
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A required identifier could not be scraped from a response
    #[error("Error retrieving {kind} from {origin}")]
    IdentifierNotFound {
        kind: IdentifierKind,
        origin: String,
    },

    /// HTTP status outside the expected set
    #[error("{context} (unexpected status {status})")]
    UnexpectedStatus { status: StatusCode, context: String },

    /// Body was not valid JSON when JSON was required
    #[error("Error decoding JSON response: {0}")]
    MalformedResponse(String),

    /// The remote GraphQL envelope reported an `errors` list
    #[error("{0}")]
    RemoteOperationError(String),

    /// Valid JSON that does not have the shape an operation navigates
    #[error("Unexpected payload shape: {0}")]
    MalformedPayload(String),

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// URL does not have the expected shape
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Caller-supplied argument rejected before any request was made
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Serialize for ThreadScrapeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for Threads.net client operations
pub type Result<T> = std::result::Result<T, ThreadScrapeError>;
