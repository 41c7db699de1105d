//! Debug script to inspect media extraction for a post
//!
//! Run with:
//! THREADS_CREDENTIALS=creds.json cargo run --example debug_post_media -p threadscrape-core -- <post-url> [size]

use threadscrape_core::{Credentials, ImageSize, ThreadScraper};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials_path = std::env::var("THREADS_CREDENTIALS")?;
    let credentials = Credentials::from_json(&std::fs::read_to_string(credentials_path)?)?;

    let mut args = std::env::args().skip(1);
    let post_url = args.next().ok_or("usage: debug_post_media <post-url> [size]")?;
    let size: ImageSize = match args.next() {
        Some(size) => size.parse()?,
        None => ImageSize::Original,
    };

    let scraper = ThreadScraper::new(credentials)?;

    println!("Resolving post ID for {}...\n", post_url);
    let post_id = scraper.get_post_id(&post_url).await?;
    println!("Post ID: {}\n", post_id);

    match scraper.get_post_media(&post_url, size).await {
        Ok(media) => {
            println!("Found {} images ({}):\n", media.images.len(), size);
            for image in &media.images {
                println!("{}. {}", image.index, image.url);
                println!("   {:?} x {:?}", image.width, image.height);
            }
        }
        Err(e) => {
            println!("Failed to extract media: {}", e);

            // Dump the raw payload for inspection
            let info = scraper.get_post_info(&post_url).await?;
            std::fs::write("debug_post_info.json", serde_json::to_string_pretty(&info)?)?;
            println!("Payload saved to debug_post_info.json");
        }
    }

    Ok(())
}
