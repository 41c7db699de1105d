//! Main API for Threads.net
//!
//! Combines the HTTP client, identifier scraper and operation table into
//! one method per supported action. Every action resolves the identifiers
//! it needs (one page fetch), then runs its GraphQL operation and returns
//! the validated JSON unchanged.

use serde_json::Value;
use tracing::debug;

use crate::client::{ClientConfig, ThreadsClient};
use crate::error::{IdentifierKind, Result, ThreadScrapeError};
use crate::operations::{
    self, BlockVariables, FollowVariables, FriendshipsVariables, MediaVariables,
    PostInfoVariables, ProfileInfoVariables, RecommendedUsersVariables, ReplyControlVariables,
    SearchVariables, UserThreadsVariables,
};
use crate::parser::{IdentifierExtractor, RegexExtractor, extract_identifier, extract_media, extract_user_id};
use crate::types::{Credentials, ImageSize, PostMedia, ReplyControl};
use crate::url::{build_profile_url, parse_handle, rebase_page_url};

/// Main API for Threads.net
///
/// Takes `&self` everywhere and keeps no per-request state, so one
/// instance can serve concurrent callers.
pub struct ThreadScraper {
    client: ThreadsClient,
    extractor: Box<dyn IdentifierExtractor>,
}

impl ThreadScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new scraper with custom client configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let client = ThreadsClient::with_config(credentials, config)?;
        Ok(Self::from_client(client))
    }

    /// Create a scraper around an existing client
    pub fn from_client(client: ThreadsClient) -> Self {
        Self {
            client,
            extractor: Box::new(RegexExtractor),
        }
    }

    /// Replace the identifier extraction strategy
    pub fn with_extractor(mut self, extractor: impl IdentifierExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn client(&self) -> &ThreadsClient {
        &self.client
    }

    /// Look up the numeric user ID for a handle or profile URL
    ///
    /// # Errors
    /// - `InvalidUrl` if a URL is not of the form `https://<host>/@<handle>`
    /// - `IdentifierNotFound` if the profile page has no `userID`
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> threadscrape_core::Result<()> {
    /// use threadscrape_core::{Credentials, ThreadScraper};
    /// let scraper = ThreadScraper::new(Credentials::new("sessionid", "fb_dtsg", "csrftoken"))?;
    /// let id = scraper.get_user_id("https://www.threads.net/@zuck").await?;
    /// println!("user id: {}", id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_user_id(&self, profile: &str) -> Result<u64> {
        let handle = parse_handle(profile)?;
        let url = build_profile_url(self.client.base_url(), &handle);
        let html = self.client.fetch_page(&url).await?;
        let user_id = extract_user_id(self.extractor.as_ref(), &html, &handle)?;
        debug!(handle = %handle, user_id, "resolved user id");
        Ok(user_id)
    }

    /// Look up the numeric post ID embedded in a post page
    ///
    /// The page is fetched from the configured origin whatever host
    /// `post_url` names, so the session cookie is always sent.
    pub async fn get_post_id(&self, post_url: &str) -> Result<String> {
        self.resolve(IdentifierKind::Post, post_url).await
    }

    /// Look up the composite `<number>_<number>` content ID of a post
    ///
    /// Fetched from the configured origin, like [`Self::get_post_id`].
    pub async fn get_content_id(&self, post_url: &str) -> Result<String> {
        self.resolve(IdentifierKind::Composite, post_url).await
    }

    async fn resolve(&self, kind: IdentifierKind, url: &str) -> Result<String> {
        let url = non_empty(url, "Post URL")?;
        let page_url = rebase_page_url(self.client.base_url(), url)?;
        let html = self.client.fetch_page(&page_url).await?;
        extract_identifier(self.extractor.as_ref(), kind, &html, url)
    }

    /// Get the followers of a user
    pub async fn get_followers(&self, profile: &str) -> Result<Value> {
        let user_id = self.get_user_id(profile).await?;
        let variables = FriendshipsVariables {
            user_id: user_id.to_string(),
            is_logged_in: true,
        };
        let context = format!("Error retrieving Followers for {}", profile);
        self.client
            .graphql(&operations::FOLLOWERS, &variables, &context)
            .await
    }

    /// Get the accounts a user follows
    pub async fn get_following(&self, profile: &str) -> Result<Value> {
        let user_id = self.get_user_id(profile).await?;
        let variables = FriendshipsVariables {
            user_id: user_id.to_string(),
            is_logged_in: true,
        };
        let context = format!("Error retrieving Following for {}", profile);
        self.client
            .graphql(&operations::FOLLOWING, &variables, &context)
            .await
    }

    /// Follow a user
    ///
    /// Repeating the call when already following is forwarded as-is.
    pub async fn follow_user(&self, profile: &str) -> Result<Value> {
        let user_id = self.get_user_id(profile).await?;
        let variables = FollowVariables {
            target_user_id: user_id.to_string(),
        };
        let context = format!("Error Following User {}", profile);
        self.client
            .graphql(&operations::FOLLOW, &variables, &context)
            .await
    }

    /// Unfollow a user
    pub async fn unfollow_user(&self, profile: &str) -> Result<Value> {
        let user_id = self.get_user_id(profile).await?;
        let variables = FollowVariables {
            target_user_id: user_id.to_string(),
        };
        let context = format!("Error UnFollowing User {}", profile);
        self.client
            .graphql(&operations::UNFOLLOW, &variables, &context)
            .await
    }

    /// Like a post
    pub async fn like_post(&self, post_url: &str) -> Result<Value> {
        let post_id = self.get_post_id(post_url).await?;
        let variables = MediaVariables { media_id: post_id };
        self.client
            .graphql(&operations::LIKE, &variables, "Error Liking Post")
            .await
    }

    /// Remove a like from a post
    pub async fn unlike_post(&self, post_url: &str) -> Result<Value> {
        let post_id = self.get_post_id(post_url).await?;
        let variables = MediaVariables { media_id: post_id };
        self.client
            .graphql(&operations::UNLIKE, &variables, "Error UnLiking Post")
            .await
    }

    /// Get the hover-card profile details of a user
    ///
    /// Only the handle is needed; no page fetch happens.
    pub async fn get_profile_info(&self, profile: &str) -> Result<Value> {
        let variables = ProfileInfoVariables {
            username: parse_handle(profile)?,
        };
        self.client
            .graphql(
                &operations::PROFILE_INFO,
                &variables,
                "Error Retrieving Profile Details",
            )
            .await
    }

    /// Search for accounts
    ///
    /// # Arguments
    /// * `query` - Free text, escaped by the JSON encoder
    /// * `limit` - Maximum number of results (the web app uses 10)
    pub async fn search(&self, query: &str, limit: u32) -> Result<Value> {
        let variables = SearchVariables {
            query: query.to_string(),
            first: limit,
            is_logged_in: true,
        };
        self.client
            .graphql(&operations::SEARCH, &variables, "Error Searching")
            .await
    }

    /// Get recommended accounts to follow
    ///
    /// The web app sends `limit` as the pagination cursor and always asks
    /// for 10 users; that wire shape is kept as-is.
    pub async fn get_recommended_users(&self, limit: u32) -> Result<Value> {
        let variables = RecommendedUsersVariables::new(limit);
        self.client
            .graphql(
                &operations::RECOMMENDED_USERS,
                &variables,
                "Error Retrieving Recommended Users",
            )
            .await
    }

    /// Publish a text post
    ///
    /// # Errors
    /// - `InvalidArgument` if `text` is empty or whitespace only
    pub async fn create_thread(&self, text: &str) -> Result<Value> {
        if text.trim().is_empty() {
            return Err(ThreadScrapeError::InvalidArgument(
                "Post text cannot be empty".to_string(),
            ));
        }
        self.client.post_text(text, "Error Creating Thread").await
    }

    /// Change who may reply to a post
    pub async fn update_reply_permission(
        &self,
        post_url: &str,
        option: ReplyControl,
    ) -> Result<Value> {
        let post_id = self.get_post_id(post_url).await?;
        let variables = ReplyControlVariables {
            reply_control: option,
            post_id,
        };
        self.client
            .graphql(
                &operations::REPLY_CONTROL,
                &variables,
                "Error Updating Reply Permission",
            )
            .await
    }

    /// Delete one of the session user's posts
    pub async fn delete_thread(&self, post_url: &str) -> Result<Value> {
        let content_id = self.get_content_id(post_url).await?;
        let variables = MediaVariables {
            media_id: content_id,
        };
        self.client
            .graphql(&operations::DELETE_POST, &variables, "Error Deleting Thread")
            .await
    }

    /// Block a user
    pub async fn block_user(&self, profile: &str) -> Result<Value> {
        let user_id = self.get_user_id(profile).await?;
        let variables = BlockVariables {
            user_id: user_id.to_string(),
        };
        let context = format!("Error Blocking User {}", profile);
        self.client
            .graphql(&operations::BLOCK, &variables, &context)
            .await
    }

    /// Unblock a user
    pub async fn unblock_user(&self, profile: &str) -> Result<Value> {
        let user_id = self.get_user_id(profile).await?;
        let variables = BlockVariables {
            user_id: user_id.to_string(),
        };
        let context = format!("Error UnBlocking User {}", profile);
        self.client
            .graphql(&operations::UNBLOCK, &variables, &context)
            .await
    }

    /// List the posts on a user's profile
    pub async fn get_user_threads(&self, profile: &str) -> Result<Value> {
        let user_id = self.get_user_id(profile).await?;
        let variables = UserThreadsVariables {
            user_id: user_id.to_string(),
        };
        let context = format!("Error retrieving Threads for {}", profile);
        self.client
            .graphql(&operations::USER_THREADS, &variables, &context)
            .await
    }

    /// Get the full post page payload
    pub async fn get_post_info(&self, post_url: &str) -> Result<Value> {
        let post_id = self.get_post_id(post_url).await?;
        let variables = PostInfoVariables {
            post_id,
            is_logged_in: true,
            feedback_hub_enabled: false,
        };
        let context = format!("Error retrieving Post Info for {}", post_url);
        self.client
            .graphql(&operations::POST_INFO, &variables, &context)
            .await
    }

    /// Get the images of a post
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> threadscrape_core::Result<()> {
    /// use threadscrape_core::{Credentials, ImageSize, ThreadScraper};
    /// let scraper = ThreadScraper::new(Credentials::new("sessionid", "fb_dtsg", "csrftoken"))?;
    /// let media = scraper
    ///     .get_post_media("https://www.threads.net/@zuck/post/CuXFPIeLLod", ImageSize::Square(640))
    ///     .await?;
    /// for image in media.images {
    ///     println!("{}: {}", image.index, image.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_post_media(&self, post_url: &str, size: ImageSize) -> Result<PostMedia> {
        let post_info = self.get_post_info(post_url).await?;
        extract_media(&post_info, size)
    }
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ThreadScrapeError::InvalidArgument(format!(
            "{} cannot be empty",
            what
        )));
    }
    Ok(trimmed)
}
