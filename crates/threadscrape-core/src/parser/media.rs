//! Media extraction from post info payloads
//!
//! Normalizes the `BarcelonaPostPageQuery` response into a flat list of
//! images. Carousel posts yield one image per item; single-media posts
//! yield the post's own image.

use serde_json::Value;

use crate::error::{Result, ThreadScrapeError};
use crate::types::{Dimension, ImageSize, MediaDescriptor, PostMedia};

const POST_POINTER: &str = "/data/data/edges/0/node/thread_items/0/post";

/// Extracts image descriptors from a post info response
///
/// # Arguments
/// * `post_info` - JSON returned by the post info query
/// * `size` - Requested image size; only applied to carousel items
///
/// # Returns
/// [`PostMedia`] with images in post order. `videos` is always empty.
///
/// # Errors
/// Returns `MalformedPayload` if the post cannot be located, or if a
/// single-media post has no image candidate.
pub fn extract_media(post_info: &Value, size: ImageSize) -> Result<PostMedia> {
    let post = post_info.pointer(POST_POINTER).ok_or_else(|| {
        ThreadScrapeError::MalformedPayload(format!("no post at {}", POST_POINTER))
    })?;

    let images = match post.get("carousel_media").and_then(Value::as_array) {
        Some(carousel) => carousel_images(carousel, size),
        None => vec![single_image(post)?],
    };

    Ok(PostMedia {
        images,
        videos: Vec::new(),
    })
}

fn carousel_images(carousel: &[Value], size: ImageSize) -> Vec<MediaDescriptor> {
    let marker = size.url_marker();

    carousel
        .iter()
        .enumerate()
        .filter_map(|(position, media)| {
            let candidates = media
                .get("image_versions2")
                .and_then(|versions| versions.get("candidates"))
                .and_then(Value::as_array)?;

            let url = candidates.iter().map(candidate_url).find(|url| match &marker {
                None => true,
                Some(marker) => url.contains(marker.as_str()),
            })?;

            let (height, width) = match size {
                ImageSize::Original => (
                    Dimension::from_field(media.get("original_height")),
                    Dimension::from_field(media.get("original_width")),
                ),
                ImageSize::Square(n) => (Dimension::Text(n.to_string()), Dimension::Text(n.to_string())),
            };

            Some(MediaDescriptor {
                url,
                height,
                width,
                index: position + 1,
            })
        })
        .collect()
}

// The requested size is not applied here; single-media posts always
// report their first candidate at the original dimensions.
fn single_image(post: &Value) -> Result<MediaDescriptor> {
    let url = post
        .pointer("/image_versions2/candidates/0/url")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ThreadScrapeError::MalformedPayload("post has no image candidate".to_string())
        })?;

    Ok(MediaDescriptor {
        url: url.to_string(),
        height: Dimension::from_field(post.get("original_height")),
        width: Dimension::from_field(post.get("original_width")),
        index: 1,
    })
}

fn candidate_url(candidate: &Value) -> String {
    candidate
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
