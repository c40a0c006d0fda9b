pub mod chat;
pub mod filter;
pub mod invite_link;

pub use chat::{Chat, ChatId, ChatKind};
pub use filter::{ChatFilter, FilterFlags, FilterId};
pub use invite_link::InviteLinkData;
