use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::CoreConfig;
use crate::models::{Chat, ChatFilter, ChatId, FilterId};

/// Per-session cache of chats and chat filters.
///
/// Shared as `Rc<Session>` by every controller of the session. Chats are
/// fixed once the session is built; filters are refreshed whenever the
/// server pushes an update.
pub struct Session {
    config: CoreConfig,
    chats: HashMap<ChatId, Chat>,
    filters: RefCell<HashMap<FilterId, ChatFilter>>,
}

impl Session {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            chats: HashMap::new(),
            filters: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_chats(mut self, chats: impl IntoIterator<Item = Chat>) -> Self {
        for chat in chats {
            self.chats.insert(chat.id, chat);
        }
        self
    }

    pub fn with_filters(self, filters: impl IntoIterator<Item = ChatFilter>) -> Self {
        {
            let mut cache = self.filters.borrow_mut();
            for filter in filters {
                cache.insert(filter.id, filter);
            }
        }
        self
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn chat(&self, id: ChatId) -> Option<&Chat> {
        self.chats.get(&id)
    }

    pub fn filter(&self, id: FilterId) -> Option<ChatFilter> {
        self.filters.borrow().get(&id).cloned()
    }

    pub fn apply_filter(&self, filter: ChatFilter) {
        self.filters.borrow_mut().insert(filter.id, filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatKind, FilterFlags};

    #[test]
    fn test_apply_filter_replaces_cached_copy() {
        let session = Session::new(CoreConfig::default())
            .with_filters([ChatFilter::new(1, "Work")]);
        assert!(session.filter(1).unwrap().flags.is_empty());

        session.apply_filter(ChatFilter::new(1, "Work").with_flags(FilterFlags::SHAREABLE));
        assert!(session
            .filter(1)
            .unwrap()
            .flags
            .contains(FilterFlags::SHAREABLE));
        assert!(session.filter(2).is_none());
    }

    #[test]
    fn test_chat_lookup() {
        let session = Session::new(CoreConfig::default()).with_chats([Chat::new(
            5,
            "Bob",
            ChatKind::Person { is_bot: false },
        )]);
        assert_eq!(session.chat(5).unwrap().name, "Bob");
        assert!(session.chat(6).is_none());
    }
}
