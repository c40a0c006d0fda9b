use serde::{Deserialize, Serialize};

/// Server-side peer identifier of a chat.
pub type ChatId = i64;

/// What kind of peer a chat is. Sharing rules differ per kind, so this is a
/// closed set that callers match on instead of probing for capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatKind {
    /// One-to-one chat with a user or a bot
    Person {
        #[serde(default)]
        is_bot: bool,
    },
    /// Legacy small group
    BasicGroup {
        #[serde(default)]
        can_have_invite_link: bool,
    },
    /// Broadcast channel, or a supergroup when `megagroup` is set
    Channel {
        #[serde(default)]
        megagroup: bool,
        #[serde(default)]
        can_have_invite_link: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub name: String,
    pub kind: ChatKind,
}

impl Chat {
    pub fn new(id: ChatId, name: impl Into<String>, kind: ChatKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self.kind, ChatKind::Person { .. })
    }
}
