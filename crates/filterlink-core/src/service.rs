use tracing::warn;

use crate::models::{ChatId, FilterId, InviteLinkData};

/// Continuation invoked once with the outcome of a remote request.
pub type Completion<T> = Box<dyn FnOnce(Result<T, RemoteError>)>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("Invite link not found")]
    NotFound,
    #[error("Request rejected: {message}")]
    Rejected { message: String },
    #[error("Transport error: {message}")]
    Transport { message: String },
    #[error("Link service disconnected")]
    Disconnected,
}

/// Remote operations on folder invite links.
///
/// Every call returns right after dispatch. The completion runs later, on the
/// caller's event loop, and never from inside the call itself. There is no
/// retry at this layer.
pub trait RemoteLinkService {
    /// Create a new link for the filter. `chats` must not be empty.
    fn export(&self, filter_id: FilterId, chats: Vec<ChatId>, done: Completion<InviteLinkData>);

    /// Replace the chat set of an exported link. `url` and `chats` must not
    /// be empty.
    fn edit_chats(
        &self,
        filter_id: FilterId,
        url: &str,
        chats: Vec<ChatId>,
        done: Completion<InviteLinkData>,
    );

    /// Change the title of a link. An empty `url` renames the placeholder,
    /// which the server answers without persisting anything.
    fn rename(&self, filter_id: FilterId, url: &str, title: &str, done: Completion<InviteLinkData>);

    /// Revoke a link. Deleting an already deleted link succeeds.
    fn delete(&self, filter_id: FilterId, url: &str, done: Completion<()>);
}

/// Export a link, handing `done` a placeholder bound to the filter when the
/// request fails so the caller keeps an identifiable slot for a later retry.
pub fn export_link(
    service: &dyn RemoteLinkService,
    filter_id: FilterId,
    chats: Vec<ChatId>,
    done: impl FnOnce(InviteLinkData) + 'static,
) {
    debug_assert!(!chats.is_empty(), "export requires at least one chat");
    service.export(
        filter_id,
        chats,
        Box::new(move |result| match result {
            Ok(link) => done(link),
            Err(err) => {
                warn!(filter_id, error = %err, "failed to export invite link");
                done(InviteLinkData::placeholder(filter_id));
            }
        }),
    );
}
