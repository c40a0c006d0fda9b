use serde::Serialize;
use tracing::debug;

use super::row::{compute_row_id, LinkRow, RowId};
use crate::config::CoreConfig;
use crate::models::InviteLinkData;

/// One mutation applied to the row list during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum RowChange {
    Updated { index: usize, id: RowId },
    Appended { index: usize, id: RowId },
    Removed { index: usize, id: RowId },
}

/// Ordered rows of the link list, kept in step with the server's list.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: Vec<LinkRow>,
    strip_prefixes: Vec<String>,
}

impl RowStore {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            rows: Vec::new(),
            strip_prefixes: config.display_strip_prefixes.clone(),
        }
    }

    /// Bring the rows in line with `links`, position by position.
    ///
    /// Rows present on both sides are updated in place, extra links are
    /// appended, and surplus rows are removed from the tail. Rows whose data
    /// is unchanged produce no mutation, so applying the same list twice
    /// yields no changes the second time.
    pub fn reconcile(&mut self, links: &[InviteLinkData]) -> Vec<RowChange> {
        let mut changes = Vec::new();

        for (index, link) in links.iter().enumerate() {
            if index < self.rows.len() {
                let row = &mut self.rows[index];
                if row.update(link, &self.strip_prefixes) {
                    changes.push(RowChange::Updated {
                        index,
                        id: row.id(),
                    });
                }
            } else {
                let row = LinkRow::new(link.clone(), &self.strip_prefixes);
                changes.push(RowChange::Appended {
                    index,
                    id: row.id(),
                });
                self.rows.push(row);
            }
        }

        let keep = links.len();
        if self.rows.len() > keep {
            for row in self.rows.drain(keep..) {
                changes.push(RowChange::Removed {
                    index: keep,
                    id: row.id(),
                });
            }
        }

        debug!(
            rows = self.rows.len(),
            changes = changes.len(),
            "reconciled link rows"
        );
        changes
    }

    pub fn rows(&self) -> &[LinkRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_at(&self, index: usize) -> Option<&LinkRow> {
        self.rows.get(index)
    }

    pub fn find(&self, id: RowId) -> Option<(usize, &LinkRow)> {
        self.rows.iter().enumerate().find(|(_, row)| row.id() == id)
    }

    pub fn find_by_url(&self, url: &str) -> Option<(usize, &LinkRow)> {
        self.find(compute_row_id(url))
    }

    /// Drop the row for `url`, if any. Returns the removal that happened.
    pub fn remove_by_url(&mut self, url: &str) -> Option<RowChange> {
        let (index, id) = self.find_by_url(url).map(|(index, row)| (index, row.id()))?;
        self.rows.remove(index);
        Some(RowChange::Removed { index, id })
    }
}
