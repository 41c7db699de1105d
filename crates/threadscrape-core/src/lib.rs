//! Threads.net Web API Client Library
//!
//! Provides an async API for reading and acting on Threads.net through the
//! same GraphQL endpoint the web app uses, authenticated with captured
//! browser session artifacts.
//!
//! # Overview
//!
//! This crate provides:
//! - An HTTP client carrying the session cookie and browser fingerprint
//! - A response validator that turns status codes and GraphQL `errors`
//!   lists into one error type
//! - An identifier scraper for user, post and content IDs embedded in pages
//! - One method per supported action (follow, like, post, delete, ...)
//! - A media extractor that flattens post payloads into image lists
//!
//! # Example
//!
//! ```no_run
//! use threadscrape_core::{Credentials, ImageSize, Result, ThreadScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credentials = Credentials::from_json(
//!         r#"{"sessionid": "...", "fb_dtsg": "...", "x-csrftoken": "..."}"#,
//!     )?;
//!     let scraper = ThreadScraper::new(credentials)?;
//!
//!     // Follow someone by handle or profile URL
//!     scraper.follow_user("https://www.threads.net/@zuck").await?;
//!
//!     // Collect the images of a post
//!     let media = scraper
//!         .get_post_media("https://www.threads.net/@zuck/post/CuXFPIeLLod", ImageSize::Original)
//!         .await?;
//!     for image in &media.images {
//!         println!("{}: {}", image.index, image.url);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Session artifacts
//!
//! `sessionid`, `fb_dtsg` and `x-csrftoken` are copied from a logged-in
//! browser session. An expired session surfaces as `RemoteOperationError`
//! or `UnexpectedStatus`, indistinguishable from other failures.

mod client;
mod error;
pub mod operations;
pub mod parser;
pub mod response;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, ThreadsClient};

// Re-export error types
pub use error::{IdentifierKind, Result, ThreadScrapeError};

// Re-export parser functions
pub use parser::{IdentifierExtractor, RegexExtractor, extract_media};

// Re-export main scraper API
pub use scraper::ThreadScraper;

// Re-export data types
pub use types::{Credentials, Dimension, ImageSize, MediaDescriptor, PostMedia, ReplyControl};

// Re-export URL helper functions for convenience
pub use url::{build_profile_url, parse_handle};
