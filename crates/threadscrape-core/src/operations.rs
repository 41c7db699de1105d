//! GraphQL operation table for the Threads.net web API
//!
//! Each action is a fixed document ID plus a friendly name the server uses
//! to pick the persisted query. These values must match the web app
//! byte for byte; variables are typed structs so caller text is escaped
//! by the JSON encoder.

use serde::Serialize;

use crate::error::{Result, ThreadScrapeError};
use crate::types::ReplyControl;

/// A persisted GraphQL query or mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Sent as `fb_api_req_friendly_name` and as the `x-fb-friendly-name` header
    pub friendly_name: &'static str,
    pub doc_id: &'static str,
    /// Per-operation `lsd` form value captured from the web app, if any
    pub lsd: Option<&'static str>,
}

pub const FOLLOWERS: Operation = Operation {
    friendly_name: "BarcelonaFriendshipsFollowersTabQuery",
    doc_id: "6173206472779164",
    lsd: Some("nucUUd7UtYh-1Efz-5wTiC"),
};

pub const FOLLOWING: Operation = Operation {
    friendly_name: "BarcelonaFriendshipsFollowingTabQuery",
    doc_id: "6566004623483043",
    lsd: Some("nucUUd7UtYh-1Efz-5wTiC"),
};

pub const FOLLOW: Operation = Operation {
    friendly_name: "useBarcelonaFollowMutationFollowMutation",
    doc_id: "6240353742756860",
    lsd: Some("BSWpx6WGeZ94S2rNbmkxn4"),
};

pub const UNFOLLOW: Operation = Operation {
    friendly_name: "useBarcelonaFollowMutationUnfollowMutation",
    doc_id: "6419596478124270",
    lsd: Some("BSWpx6WGeZ94S2rNbmkxn4"),
};

pub const LIKE: Operation = Operation {
    friendly_name: "useBarcelonaLikeMutationLikeMutation",
    doc_id: "6163527303756305",
    lsd: Some("OacJH75YYKAh8Xtd4UtEJT"),
};

pub const UNLIKE: Operation = Operation {
    friendly_name: "useBarcelonaLikeMutationUnlikeMutation",
    doc_id: "6574229129305381",
    lsd: None,
};

pub const PROFILE_INFO: Operation = Operation {
    friendly_name: "BarcelonaUsernameHoverCardImplQuery",
    doc_id: "6294229744032325",
    lsd: None,
};

pub const SEARCH: Operation = Operation {
    friendly_name: "useBarcelonaAccountSearchGraphQLDataSourceQuery",
    doc_id: "6427333243987367",
    lsd: None,
};

pub const RECOMMENDED_USERS: Operation = Operation {
    friendly_name: "BarcelonaSearchRecommendedUsersRefetchableQuery",
    doc_id: "6476698865784411",
    lsd: None,
};

// Shares its doc_id with RECOMMENDED_USERS upstream.
pub const REPLY_CONTROL: Operation = Operation {
    friendly_name: "useBarcelonaSetPostReplyControlMutation",
    doc_id: "6476698865784411",
    lsd: None,
};

pub const DELETE_POST: Operation = Operation {
    friendly_name: "useBarcelonaDeleteMutationMutation",
    doc_id: "9722027491203611",
    lsd: None,
};

pub const BLOCK: Operation = Operation {
    friendly_name: "useBarcelonaUserBlockMutation",
    doc_id: "7159968810697379",
    lsd: Some("BSWpx6WGeZ94S2rNbmkxn4"),
};

pub const UNBLOCK: Operation = Operation {
    friendly_name: "useBarcelonaUserUnblockMutation",
    doc_id: "6572924756096893",
    lsd: Some("BSWpx6WGeZ94S2rNbmkxn4"),
};

pub const USER_THREADS: Operation = Operation {
    friendly_name: "BarcelonaProfileThreadsTabQuery",
    doc_id: "6232751443445612",
    lsd: Some("BSWpx6WGeZ94S2rNbmkxn4"),
};

pub const POST_INFO: Operation = Operation {
    friendly_name: "BarcelonaPostPageQuery",
    doc_id: "6994920940542386",
    lsd: Some("SI3IPQlJXR0BOvV0HaHVtY"),
};

impl Operation {
    /// Build the form-encoded body for this operation
    ///
    /// Field order follows the web app: `fb_dtsg`, `lsd` (when set),
    /// `fb_api_req_friendly_name`, `variables`, `server_timestamps`, `doc_id`.
    pub fn form<V: Serialize>(
        &self,
        fb_dtsg: &str,
        variables: &V,
    ) -> Result<Vec<(&'static str, String)>> {
        let variables = serde_json::to_string(variables).map_err(|e| {
            ThreadScrapeError::InvalidArgument(format!(
                "Failed to encode variables for {}: {}",
                self.friendly_name, e
            ))
        })?;

        let mut form = Vec::with_capacity(6);
        form.push(("fb_dtsg", fb_dtsg.to_string()));
        if let Some(lsd) = self.lsd {
            form.push(("lsd", lsd.to_string()));
        }
        form.push(("fb_api_req_friendly_name", self.friendly_name.to_string()));
        form.push(("variables", variables));
        form.push(("server_timestamps", "true".to_string()));
        form.push(("doc_id", self.doc_id.to_string()));
        Ok(form)
    }
}

/// Variables for the followers/following tabs
#[derive(Debug, Serialize)]
pub struct FriendshipsVariables {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "__relay_internal__pv__BarcelonaIsLoggedInrelayprovider")]
    pub is_logged_in: bool,
}

/// Variables for the profile threads tab
#[derive(Debug, Serialize)]
pub struct UserThreadsVariables {
    #[serde(rename = "userID")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct FollowVariables {
    pub target_user_id: String,
}

/// Variables for block and unblock
#[derive(Debug, Serialize)]
pub struct BlockVariables {
    pub user_id: String,
}

/// Variables for like, unlike and delete
#[derive(Debug, Serialize)]
pub struct MediaVariables {
    pub media_id: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileInfoVariables {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SearchVariables {
    pub query: String,
    pub first: u32,
    #[serde(rename = "__relay_internal__pv__BarcelonaIsLoggedInrelayprovider")]
    pub is_logged_in: bool,
}

/// Pagination variables for the recommended users query
///
/// The web client passes the caller's limit as the `after` cursor and
/// always asks for 10 users.
#[derive(Debug, Serialize)]
pub struct RecommendedUsersVariables {
    pub after: String,
    pub before: Option<String>,
    pub first: u32,
    pub last: Option<u32>,
    #[serde(rename = "__relay_internal__pv__BarcelonaIsLoggedInrelayprovider")]
    pub is_logged_in: bool,
}

impl RecommendedUsersVariables {
    pub fn new(limit: u32) -> Self {
        Self {
            after: limit.to_string(),
            before: None,
            first: 10,
            last: None,
            is_logged_in: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplyControlVariables {
    pub reply_control: ReplyControl,
    pub post_id: String,
}

#[derive(Debug, Serialize)]
pub struct PostInfoVariables {
    #[serde(rename = "postID")]
    pub post_id: String,
    #[serde(rename = "__relay_internal__pv__BarcelonaIsLoggedInrelayprovider")]
    pub is_logged_in: bool,
    #[serde(rename = "__relay_internal__pv__BarcelonaIsFeedbackHubEnabledrelayprovider")]
    pub feedback_hub_enabled: bool,
}

/// Form body for the text-only post endpoint
pub fn text_post_form(text: &str) -> Vec<(&'static str, String)> {
    vec![
        ("caption", text.to_string()),
        ("is_meta_only_post", String::new()),
        ("is_paid_partnership", String::new()),
        ("publish_mode", "text_post".to_string()),
        ("text_post_app_info", r#"{"reply_control":0}"#.to_string()),
    ]
}
