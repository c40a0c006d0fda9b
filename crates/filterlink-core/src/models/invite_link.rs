use serde::{Deserialize, Serialize};

use super::{ChatId, FilterId};

/// One shareable invite link of a chat filter.
///
/// A link is identified by `(filter_id, url)`. An empty `url` marks a
/// placeholder for a filter that has no exported link yet; placeholders never
/// carry chats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteLinkData {
    pub filter_id: FilterId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub chats: Vec<ChatId>,
}

impl InviteLinkData {
    pub fn placeholder(filter_id: FilterId) -> Self {
        Self {
            filter_id,
            url: String::new(),
            title: String::new(),
            chats: Vec::new(),
        }
    }

    pub fn is_exported(&self) -> bool {
        !self.url.is_empty()
    }

    /// Placeholders must not list chats.
    pub fn is_consistent(&self) -> bool {
        self.is_exported() || self.chats.is_empty()
    }

    pub fn same_link(&self, other: &InviteLinkData) -> bool {
        self.filter_id == other.filter_id && self.url == other.url
    }
}
