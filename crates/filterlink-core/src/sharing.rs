use crate::error::LinkError;
use crate::models::{Chat, ChatFilter, ChatId, ChatKind, FilterFlags};
use crate::session::Session;

/// Why a chat can't be added to a folder invite link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingError {
    Bot,
    Private,
    NoAdminGroup,
    NoAdminChannel,
}

impl SharingError {
    /// Short text shown in place of the chat's status line.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Bot => "you can't share chats with bots",
            Self::Private => "you can't share private chats",
            Self::NoAdminGroup | Self::NoAdminChannel => "you are not an admin",
        }
    }

    /// Message shown when the user tries to select the chat.
    pub fn toast(&self) -> &'static str {
        match self {
            Self::Bot => "Sorry, chats with bots can't be added to a shared folder.",
            Self::Private => "Sorry, private chats can't be added to a shared folder.",
            Self::NoAdminGroup => {
                "You don't have the admin rights to share invite links to this group chat."
            }
            Self::NoAdminChannel => {
                "You don't have the admin rights to share invite links to this channel."
            }
        }
    }
}

/// Classify whether `chat` can be reached through a folder invite link.
pub fn sharing_error(chat: &Chat) -> Option<SharingError> {
    match chat.kind {
        ChatKind::Person { is_bot: true } => Some(SharingError::Bot),
        ChatKind::Person { is_bot: false } => Some(SharingError::Private),
        ChatKind::BasicGroup {
            can_have_invite_link,
        } => (!can_have_invite_link).then_some(SharingError::NoAdminGroup),
        ChatKind::Channel {
            megagroup,
            can_have_invite_link,
        } => {
            if can_have_invite_link {
                None
            } else if megagroup {
                Some(SharingError::NoAdminGroup)
            } else {
                Some(SharingError::NoAdminChannel)
            }
        }
    }
}

/// The filter's included chats that can be shared, in filter order. Chats
/// missing from the session are skipped.
pub fn collect_filter_link_chats(session: &Session, filter: &ChatFilter) -> Vec<ChatId> {
    let mut result: Vec<ChatId> = Vec::new();
    for &id in &filter.always {
        if result.contains(&id) {
            continue;
        }
        match session.chat(id) {
            Some(chat) if sharing_error(chat).is_none() => result.push(id),
            _ => {}
        }
    }
    result
}

/// Only folders without excluded chats and without inclusion rules (apart
/// from the shareable marker itself) can be exported.
pub fn check_exportable(filter: &ChatFilter) -> Result<(), LinkError> {
    if !filter.never.is_empty() || !filter.flags.without(FilterFlags::SHAREABLE).is_empty() {
        return Err(LinkError::FilterNotShareable);
    }
    Ok(())
}
