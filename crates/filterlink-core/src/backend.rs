use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::config::CoreConfig;
use crate::models::{ChatFilter, ChatId, FilterFlags, FilterId, InviteLinkData};
use crate::service::RemoteError;
use crate::sharing::check_exportable;

/// Backend operations, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    Export,
    EditChats,
    Rename,
    Delete,
}

/// Result of exporting a link: the link plus the filter as the server now
/// sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedLink {
    pub link: InviteLinkData,
    pub filter: ChatFilter,
}

/// Server side of folder invite links. Calls are answered in order; later
/// writes win.
pub trait LinkBackend: Send + Sync {
    fn export(&self, filter_id: FilterId, chats: &[ChatId]) -> Result<ExportedLink, RemoteError>;

    fn edit_chats(
        &self,
        filter_id: FilterId,
        url: &str,
        chats: &[ChatId],
    ) -> Result<InviteLinkData, RemoteError>;

    fn rename(&self, filter_id: FilterId, url: &str, title: &str)
        -> Result<InviteLinkData, RemoteError>;

    fn delete(&self, filter_id: FilterId, url: &str) -> Result<(), RemoteError>;

    /// Current links of a filter, newest first.
    fn links(&self, filter_id: FilterId) -> Vec<InviteLinkData>;
}

#[derive(Default)]
struct MemoryState {
    filters: HashMap<FilterId, ChatFilter>,
    links: HashMap<FilterId, Vec<InviteLinkData>>,
    minted: u64,
    failures: HashSet<BackendOp>,
}

impl MemoryState {
    fn take_failure(&mut self, op: BackendOp) -> Result<(), RemoteError> {
        if self.failures.remove(&op) {
            return Err(RemoteError::Transport {
                message: format!("injected {:?} failure", op),
            });
        }
        Ok(())
    }

    fn link_mut(&mut self, filter_id: FilterId, url: &str) -> Result<&mut InviteLinkData, RemoteError> {
        self.links
            .get_mut(&filter_id)
            .and_then(|links| links.iter_mut().find(|link| link.url == url))
            .ok_or(RemoteError::NotFound)
    }
}

/// In-process backend holding the authoritative state in memory.
pub struct MemoryBackend {
    link_prefix: String,
    max_title_length: usize,
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            link_prefix: config.link_prefix.clone(),
            max_title_length: config.max_title_length,
            state: Mutex::new(MemoryState::default()),
        }
    }

    pub fn with_filters(self, filters: impl IntoIterator<Item = ChatFilter>) -> Self {
        {
            let mut state = self.state.lock();
            for filter in filters {
                state.filters.insert(filter.id, filter);
            }
        }
        self
    }

    /// Seed existing links, in list order. Placeholders are not stored.
    pub fn with_links(self, links: impl IntoIterator<Item = InviteLinkData>) -> Self {
        {
            let mut state = self.state.lock();
            for link in links.into_iter().filter(InviteLinkData::is_exported) {
                state.links.entry(link.filter_id).or_default().push(link);
            }
        }
        self
    }

    /// Make the next call of `op` fail with a transport error.
    pub fn fail_next(&self, op: BackendOp) {
        self.state.lock().failures.insert(op);
    }

    pub fn filter(&self, filter_id: FilterId) -> Option<ChatFilter> {
        self.state.lock().filters.get(&filter_id).cloned()
    }

    fn mint_url(&self, filter_id: FilterId, sequence: u64) -> String {
        let digest = Sha256::digest(format!("{}:{}", filter_id, sequence).as_bytes());
        format!("{}{}", self.link_prefix, hex::encode(&digest[..6]))
    }
}

impl LinkBackend for MemoryBackend {
    fn export(&self, filter_id: FilterId, chats: &[ChatId]) -> Result<ExportedLink, RemoteError> {
        let mut state = self.state.lock();
        state.take_failure(BackendOp::Export)?;
        if chats.is_empty() {
            return Err(RemoteError::Rejected {
                message: "CHATS_EMPTY".to_string(),
            });
        }

        let filter = state
            .filters
            .get_mut(&filter_id)
            .ok_or(RemoteError::NotFound)?;
        check_exportable(filter).map_err(|err| RemoteError::Rejected {
            message: err.to_string(),
        })?;
        filter.flags = filter.flags | FilterFlags::SHAREABLE;
        let filter = filter.clone();

        state.minted += 1;
        let link = InviteLinkData {
            filter_id,
            url: self.mint_url(filter_id, state.minted),
            title: String::new(),
            chats: chats.to_vec(),
        };
        state
            .links
            .entry(filter_id)
            .or_default()
            .insert(0, link.clone());

        Ok(ExportedLink { link, filter })
    }

    fn edit_chats(
        &self,
        filter_id: FilterId,
        url: &str,
        chats: &[ChatId],
    ) -> Result<InviteLinkData, RemoteError> {
        let mut state = self.state.lock();
        state.take_failure(BackendOp::EditChats)?;
        if url.is_empty() || chats.is_empty() {
            return Err(RemoteError::Rejected {
                message: "INVITE_INVALID".to_string(),
            });
        }
        let link = state.link_mut(filter_id, url)?;
        link.chats = chats.to_vec();
        Ok(link.clone())
    }

    fn rename(
        &self,
        filter_id: FilterId,
        url: &str,
        title: &str,
    ) -> Result<InviteLinkData, RemoteError> {
        let mut state = self.state.lock();
        state.take_failure(BackendOp::Rename)?;
        if title.chars().count() > self.max_title_length {
            return Err(RemoteError::Rejected {
                message: "TITLE_TOO_LONG".to_string(),
            });
        }
        if url.is_empty() {
            let mut placeholder = InviteLinkData::placeholder(filter_id);
            placeholder.title = title.to_string();
            return Ok(placeholder);
        }
        let link = state.link_mut(filter_id, url)?;
        link.title = title.to_string();
        Ok(link.clone())
    }

    fn delete(&self, filter_id: FilterId, url: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock();
        state.take_failure(BackendOp::Delete)?;
        if let Some(links) = state.links.get_mut(&filter_id) {
            links.retain(|link| link.url != url);
        }
        Ok(())
    }

    fn links(&self, filter_id: FilterId) -> Vec<InviteLinkData> {
        self.state
            .lock()
            .links
            .get(&filter_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_backend() -> MemoryBackend {
        MemoryBackend::new(&CoreConfig::default())
            .with_filters([ChatFilter::new(1, "Work").with_always([10, 11])])
    }

    #[test]
    fn test_export_mints_unique_urls_newest_first() {
        let backend = make_test_backend();
        let first = backend.export(1, &[10]).unwrap();
        let second = backend.export(1, &[11]).unwrap();

        assert!(first.link.url.starts_with("https://t.me/addlist/"));
        assert_ne!(first.link.url, second.link.url);
        assert!(second.filter.flags.contains(FilterFlags::SHAREABLE));

        let links = backend.links(1);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], second.link);
        assert_eq!(links[1], first.link);
    }

    #[test]
    fn test_export_rejections() {
        let backend = make_test_backend();
        assert!(matches!(
            backend.export(1, &[]),
            Err(RemoteError::Rejected { .. })
        ));
        assert_eq!(backend.export(2, &[10]), Err(RemoteError::NotFound));

        let backend = MemoryBackend::new(&CoreConfig::default())
            .with_filters([ChatFilter::new(1, "Rules").with_never([3])]);
        assert!(matches!(
            backend.export(1, &[10]),
            Err(RemoteError::Rejected { .. })
        ));
    }

    #[test]
    fn test_edit_and_rename() {
        let backend = make_test_backend();
        let url = backend.export(1, &[10]).unwrap().link.url;

        let edited = backend.edit_chats(1, &url, &[10, 11]).unwrap();
        assert_eq!(edited.chats, vec![10, 11]);

        let renamed = backend.rename(1, &url, "Team").unwrap();
        assert_eq!(renamed.title, "Team");
        assert_eq!(renamed.chats, vec![10, 11]);
        assert_eq!(backend.links(1)[0], renamed);

        assert_eq!(
            backend.edit_chats(1, "https://t.me/addlist/nope", &[10]),
            Err(RemoteError::NotFound)
        );
        assert!(backend.rename(1, &url, &"t".repeat(33)).is_err());
    }

    #[test]
    fn test_placeholder_rename_is_not_persisted() {
        let backend = make_test_backend();
        let renamed = backend.rename(1, "", "Draft").unwrap();
        assert_eq!(renamed.title, "Draft");
        assert!(!renamed.is_exported());
        assert!(backend.links(1).is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let backend = make_test_backend();
        let url = backend.export(1, &[10]).unwrap().link.url;
        assert!(backend.delete(1, &url).is_ok());
        assert!(backend.delete(1, &url).is_ok());
        assert!(backend.links(1).is_empty());
    }

    #[test]
    fn test_injected_failure_hits_once() {
        let backend = make_test_backend();
        backend.fail_next(BackendOp::Export);
        assert!(matches!(
            backend.export(1, &[10]),
            Err(RemoteError::Transport { .. })
        ));
        assert!(backend.export(1, &[10]).is_ok());
    }

    #[test]
    fn test_seeded_placeholders_are_skipped() {
        let backend = make_test_backend().with_links([
            InviteLinkData::placeholder(1),
            InviteLinkData {
                filter_id: 1,
                url: "https://t.me/addlist/seed".to_string(),
                title: String::new(),
                chats: vec![10],
            },
        ]);
        assert_eq!(backend.links(1).len(), 1);
    }
}
