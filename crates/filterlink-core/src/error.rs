use crate::models::FilterId;
use crate::service::RemoteError;

/// Failures surfaced by the link controllers. Everything except `Remote` is
/// detected locally, before any request leaves the process.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Select at least one chat to share")]
    EmptySelection,
    #[error("Link title is {len} characters, the limit is {max}")]
    TitleTooLong { len: usize, max: usize },
    #[error("Link has not been exported yet")]
    MissingUrl,
    #[error("This folder has excluded chats or chat types and can't be shared")]
    FilterNotShareable,
    #[error("Unknown chat filter: {0}")]
    UnknownFilter(FilterId),
    #[error("No link row at index {0}")]
    RowOutOfRange(usize),
    #[error("Nothing to save")]
    NoChanges,
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Link worker is not running")]
    WorkerGone,
}
