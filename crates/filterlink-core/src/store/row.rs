use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::InviteLinkData;

/// Stable row identifier derived from a link URL.
pub type RowId = u64;

/// Icon category of a link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkColor {
    Permanent,
}

impl LinkColor {
    pub fn for_link(_link: &InviteLinkData) -> Self {
        Self::Permanent
    }
}

/// First 8 bytes of the SHA-256 of the URL, big endian. The same URL always
/// maps to the same id, whatever the link's title or chats.
pub fn compute_row_id(url: &str) -> RowId {
    let digest = Sha256::digest(url.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Title when set, otherwise the URL with every `strip` fragment removed.
pub fn display_name(link: &InviteLinkData, strip: &[String]) -> String {
    if !link.title.is_empty() {
        return link.title.clone();
    }
    strip
        .iter()
        .fold(link.url.clone(), |name, fragment| name.replace(fragment.as_str(), ""))
}

pub fn link_status(link: &InviteLinkData) -> String {
    match link.chats.len() {
        1 => "1 chat".to_string(),
        count => format!("{} chats", count),
    }
}

/// View model of one invite link in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    id: RowId,
    data: InviteLinkData,
    name: String,
    status: String,
    color: LinkColor,
}

impl LinkRow {
    pub fn new(data: InviteLinkData, strip: &[String]) -> Self {
        Self {
            id: compute_row_id(&data.url),
            name: display_name(&data, strip),
            status: link_status(&data),
            color: LinkColor::for_link(&data),
            data,
        }
    }

    /// Replace the row's link data. Returns false when nothing changed.
    pub fn update(&mut self, data: &InviteLinkData, strip: &[String]) -> bool {
        if self.data == *data {
            return false;
        }
        if self.data.url != data.url {
            self.id = compute_row_id(&data.url);
        }
        self.data = data.clone();
        self.name = display_name(data, strip);
        self.status = link_status(data);
        self.color = LinkColor::for_link(data);
        true
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn data(&self) -> &InviteLinkData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn color(&self) -> LinkColor {
        self.color
    }
}
