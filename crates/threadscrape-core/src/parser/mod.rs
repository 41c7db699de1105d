//! Parsers for Threads.net responses
//!
//! Contains the identifier scraper for page markup and the media
//! extractor for post info payloads.

pub mod identifier;
pub mod media;

pub use identifier::{IdentifierExtractor, RegexExtractor, extract_identifier, extract_user_id};
pub use media::extract_media;
