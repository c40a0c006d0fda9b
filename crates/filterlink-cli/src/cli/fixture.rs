use std::path::Path;

use anyhow::{Context, Result};
use filterlink_core::models::{Chat, ChatFilter, InviteLinkData};
use filterlink_core::{CoreConfig, LinkBackend, MemoryBackend, Session};
use serde::{Deserialize, Serialize};

/// A session snapshot the CLI runs against: chats, filters and the links
/// the server currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub chats: Vec<Chat>,
    #[serde(default)]
    pub filters: Vec<ChatFilter>,
    #[serde(default)]
    pub links: Vec<InviteLinkData>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
        let fixture: Fixture = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture file: {}", path.display()))?;
        Ok(fixture)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize fixture")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write fixture file: {}", path.display()))
    }

    pub fn session(&self, config: CoreConfig) -> Session {
        Session::new(config)
            .with_chats(self.chats.iter().cloned())
            .with_filters(self.filters.iter().cloned())
    }

    pub fn backend(&self, config: &CoreConfig) -> MemoryBackend {
        MemoryBackend::new(config)
            .with_filters(self.filters.iter().cloned())
            .with_links(self.links.iter().cloned())
    }

    /// The fixture as the backend now sees it.
    pub fn refreshed(&self, backend: &MemoryBackend) -> Fixture {
        let filters: Vec<ChatFilter> = self
            .filters
            .iter()
            .map(|filter| backend.filter(filter.id).unwrap_or_else(|| filter.clone()))
            .collect();
        let links = filters
            .iter()
            .flat_map(|filter| backend.links(filter.id))
            .collect();
        Fixture {
            chats: self.chats.clone(),
            filters,
            links,
        }
    }
}
