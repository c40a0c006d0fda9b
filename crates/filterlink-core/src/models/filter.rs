use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use super::ChatId;

/// Identifier of a chat filter (folder). Invite links are addressed by it.
pub type FilterId = i32;

/// Inclusion rule bits of a chat filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterFlags(u32);

impl FilterFlags {
    pub const CONTACTS: Self = Self(1 << 0);
    pub const NON_CONTACTS: Self = Self(1 << 1);
    pub const GROUPS: Self = Self(1 << 2);
    pub const CHANNELS: Self = Self(1 << 3);
    pub const BOTS: Self = Self(1 << 4);
    pub const NO_MUTED: Self = Self(1 << 5);
    pub const NO_READ: Self = Self(1 << 6);
    pub const NO_ARCHIVED: Self = Self(1 << 7);
    /// Set once the folder has been shared through an invite link.
    pub const SHAREABLE: Self = Self(1 << 8);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for FilterFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A user-defined folder of chats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFilter {
    pub id: FilterId,
    pub title: String,
    /// Chats always included, in display order
    #[serde(default)]
    pub always: Vec<ChatId>,
    /// Chats always excluded
    #[serde(default)]
    pub never: Vec<ChatId>,
    #[serde(default)]
    pub flags: FilterFlags,
}

impl ChatFilter {
    pub fn new(id: FilterId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            always: Vec::new(),
            never: Vec::new(),
            flags: FilterFlags::empty(),
        }
    }

    pub fn with_always(mut self, chats: impl IntoIterator<Item = ChatId>) -> Self {
        self.always.extend(chats);
        self
    }

    pub fn with_never(mut self, chats: impl IntoIterator<Item = ChatId>) -> Self {
        self.never.extend(chats);
        self
    }

    pub fn with_flags(mut self, flags: FilterFlags) -> Self {
        self.flags = flags;
        self
    }
}
