//! Core data types for the Threads.net client
//!
//! Contains the credential bundle and the values returned to callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ThreadScrapeError};

const SESSION_ID_KEY: &str = "sessionid";
const FB_DTSG_KEY: &str = "fb_dtsg";
const CSRF_TOKEN_KEY: &str = "x-csrftoken";

/// Captured browser session artifacts
///
/// Built once when the client is created and never changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    session_id: String,
    fb_dtsg: String,
    csrf_token: String,
}

impl Credentials {
    /// Create a credential bundle from its three parts
    pub fn new(
        session_id: impl Into<String>,
        fb_dtsg: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            fb_dtsg: fb_dtsg.into(),
            csrf_token: csrf_token.into(),
        }
    }

    /// Build credentials from a JSON mapping with keys `sessionid`,
    /// `fb_dtsg` and `x-csrftoken`
    ///
    /// # Errors
    /// - `InvalidCredentials("Missing keys: ...")` if any key is absent
    /// - `InvalidCredentials("Invalid data format")` if a value is not a string
    pub fn from_value(data: &Value) -> Result<Self> {
        let map = data.as_object().ok_or_else(|| {
            ThreadScrapeError::InvalidCredentials("Invalid data format".to_string())
        })?;

        let missing: Vec<&str> = [SESSION_ID_KEY, FB_DTSG_KEY, CSRF_TOKEN_KEY]
            .into_iter()
            .filter(|key| !map.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(ThreadScrapeError::InvalidCredentials(format!(
                "Missing keys: {}",
                missing.join(", ")
            )));
        }

        match (
            map[SESSION_ID_KEY].as_str(),
            map[FB_DTSG_KEY].as_str(),
            map[CSRF_TOKEN_KEY].as_str(),
        ) {
            (Some(session_id), Some(fb_dtsg), Some(csrf_token)) => {
                Ok(Self::new(session_id, fb_dtsg, csrf_token))
            }
            _ => Err(ThreadScrapeError::InvalidCredentials(
                "Invalid data format".to_string(),
            )),
        }
    }

    /// Build credentials from a JSON document such as an exported cookie file
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ThreadScrapeError::InvalidCredentials(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn fb_dtsg(&self) -> &str {
        &self.fb_dtsg
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("session_id", &"<redacted>")
            .field("fb_dtsg", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .finish()
    }
}

/// Height or width of an image as reported upstream
///
/// Post-level dimensions come back as numbers; sized carousel lookups
/// label the image with the requested size as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(u64),
    Text(String),
}

impl Dimension {
    /// Read a dimension field, defaulting to an empty string when absent
    pub(crate) fn from_field(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(n) => Dimension::Number(n),
                None => Dimension::Text(n.to_string()),
            },
            Some(Value::String(s)) => Dimension::Text(s.clone()),
            _ => Dimension::Text(String::new()),
        }
    }
}

/// A single image extracted from a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// CDN URL of the selected image candidate
    pub url: String,

    pub height: Dimension,

    pub width: Dimension,

    /// 1-based position in the post
    pub index: usize,
}

/// Normalized media of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMedia {
    pub images: Vec<MediaDescriptor>,

    /// Always empty; videos are not extracted
    pub videos: Vec<Value>,
}

/// Image size requested from [`crate::parser::extract_media`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// First candidate with the post's recorded dimensions
    #[default]
    Original,

    /// Candidate whose URL carries the `_s{n}x{n}` marker
    Square(u32),
}

impl ImageSize {
    /// URL substring identifying a candidate of this size
    pub fn url_marker(&self) -> Option<String> {
        match self {
            ImageSize::Original => None,
            ImageSize::Square(n) => Some(format!("_s{n}x{n}")),
        }
    }
}

impl FromStr for ImageSize {
    type Err = ThreadScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("original") {
            return Ok(ImageSize::Original);
        }
        trimmed
            .parse::<u32>()
            .map(ImageSize::Square)
            .map_err(|_| ThreadScrapeError::InvalidArgument(format!("Unknown image size: {s}")))
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSize::Original => f.write_str("original"),
            ImageSize::Square(n) => write!(f, "{n}"),
        }
    }
}

/// Who may reply to a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyControl {
    MentionedOnly,
    #[default]
    AccountsYouFollow,
    YourFollowers,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_from_value() {
        let data = json!({"sessionid": "s", "fb_dtsg": "d", "x-csrftoken": "c"});
        let creds = Credentials::from_value(&data).expect("valid credentials");
        assert_eq!(creds.session_id(), "s");
        assert_eq!(creds.fb_dtsg(), "d");
        assert_eq!(creds.csrf_token(), "c");
    }

    #[test]
    fn test_credentials_missing_keys_listed_in_order() {
        let data = json!({"fb_dtsg": "d"});
        match Credentials::from_value(&data) {
            Err(ThreadScrapeError::InvalidCredentials(msg)) => {
                assert_eq!(msg, "Missing keys: sessionid, x-csrftoken");
            }
            other => panic!("Expected InvalidCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_wrong_type() {
        let data = json!({"sessionid": 42, "fb_dtsg": "d", "x-csrftoken": "c"});
        match Credentials::from_value(&data) {
            Err(ThreadScrapeError::InvalidCredentials(msg)) => {
                assert_eq!(msg, "Invalid data format");
            }
            other => panic!("Expected InvalidCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_not_an_object() {
        let result = Credentials::from_value(&json!(["sessionid"]));
        assert!(matches!(
            result,
            Err(ThreadScrapeError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_credentials_from_json() {
        let creds =
            Credentials::from_json(r#"{"sessionid":"s","fb_dtsg":"d","x-csrftoken":"c"}"#)
                .expect("valid credentials");
        assert_eq!(creds, Credentials::new("s", "d", "c"));

        assert!(Credentials::from_json("not json").is_err());
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("secret-session", "secret-dtsg", "secret-csrf");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_dimension_from_field() {
        assert_eq!(
            Dimension::from_field(Some(&json!(1080))),
            Dimension::Number(1080)
        );
        assert_eq!(
            Dimension::from_field(Some(&json!("640"))),
            Dimension::Text("640".to_string())
        );
        assert_eq!(Dimension::from_field(None), Dimension::Text(String::new()));
    }

    #[test]
    fn test_image_size_parse() {
        assert_eq!("original".parse::<ImageSize>().unwrap(), ImageSize::Original);
        assert_eq!("640".parse::<ImageSize>().unwrap(), ImageSize::Square(640));
        assert!("huge".parse::<ImageSize>().is_err());
    }

    #[test]
    fn test_image_size_marker() {
        assert_eq!(ImageSize::Original.url_marker(), None);
        assert_eq!(
            ImageSize::Square(320).url_marker(),
            Some("_s320x320".to_string())
        );
    }

    #[test]
    fn test_reply_control_serialization() {
        let json = serde_json::to_string(&ReplyControl::MentionedOnly).unwrap();
        assert_eq!(json, "\"mentioned_only\"");
        assert_eq!(ReplyControl::default(), ReplyControl::AccountsYouFollow);
    }

    #[test]
    fn test_post_media_serialization() {
        let media = PostMedia {
            images: vec![MediaDescriptor {
                url: "https://cdn.example/a.jpg".to_string(),
                height: Dimension::Number(1440),
                width: Dimension::Text("640".to_string()),
                index: 1,
            }],
            videos: Vec::new(),
        };

        let value = serde_json::to_value(&media).expect("Serialization should succeed");
        assert_eq!(
            value,
            json!({
                "images": [{"url": "https://cdn.example/a.jpg", "height": 1440, "width": "640", "index": 1}],
                "videos": []
            })
        );
    }
}
