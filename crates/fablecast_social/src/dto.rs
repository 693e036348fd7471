//! Graph API response shapes.

use derive_getters::Getters;
use fablecast_core::PostStatus;
use serde::{Deserialize, Serialize};

/// `{"id": ...}` answer to media creation and publishing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedId {
    pub(crate) id: String,
}

/// One entry from `GET /{account}/media`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct MediaItem {
    /// Media identifier
    id: String,
    /// `IMAGE`, `VIDEO`, `CAROUSEL_ALBUM`, ...
    #[serde(default)]
    media_type: Option<String>,
    /// Asset URL
    #[serde(default)]
    media_url: Option<String>,
    /// Video thumbnail URL
    #[serde(default)]
    thumbnail_url: Option<String>,
    /// Creation timestamp as reported by the platform
    #[serde(default)]
    created_time: Option<String>,
    /// Present once the media is live
    #[serde(default)]
    published: Option<serde_json::Value>,
}

/// Page of media returned by `GET /{account}/media`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct MediaListing {
    /// Media on this page
    #[serde(default)]
    data: Vec<MediaItem>,
}

/// Media created on the platform but not yet published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PendingMedia {
    /// Media identifier
    media_id: String,
    /// Platform media type
    media_type: Option<String>,
    /// Creation timestamp as reported by the platform
    created_time: Option<String>,
    /// Always [`PostStatus::Scheduled`]
    status: PostStatus,
}

impl MediaListing {
    /// Entries without a `published` marker.
    pub fn pending(self) -> Vec<PendingMedia> {
        self.data
            .into_iter()
            .filter(|item| item.published.is_none())
            .map(|item| PendingMedia {
                media_id: item.id,
                media_type: item.media_type,
                created_time: item.created_time,
                status: PostStatus::Scheduled,
            })
            .collect()
    }
}

/// Raw `GET /{account}` answer.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountInfo {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) username: Option<String>,
    #[serde(default)]
    pub(crate) followers_count: Option<u64>,
    #[serde(default)]
    pub(crate) media_count: Option<u64>,
}

/// Account summary reported by a successful connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ConnectionStatus {
    /// Display name, `Unknown` when absent
    account_name: String,
    /// Handle, `Unknown` when absent
    username: String,
    /// Follower count
    followers: u64,
    /// Number of media objects on the account
    media_count: u64,
}

impl From<AccountInfo> for ConnectionStatus {
    fn from(info: AccountInfo) -> Self {
        Self {
            account_name: info.name.unwrap_or_else(|| "Unknown".to_string()),
            username: info.username.unwrap_or_else(|| "Unknown".to_string()),
            followers: info.followers_count.unwrap_or_default(),
            media_count: info.media_count.unwrap_or_default(),
        }
    }
}
