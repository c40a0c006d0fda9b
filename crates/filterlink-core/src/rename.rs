use tracing::{debug, warn};

use crate::error::LinkError;
use crate::models::InviteLinkData;
use crate::service::RemoteLinkService;

/// Primary button of the rename form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameAction {
    /// The link has no URL yet
    Create,
    Save,
}

/// Title editor for a single link.
#[derive(Debug, Clone)]
pub struct RenameForm {
    link: InviteLinkData,
    title: String,
    max_length: usize,
}

impl RenameForm {
    pub fn new(link: InviteLinkData, max_length: usize) -> Self {
        let title = link.title.chars().take(max_length).collect();
        Self {
            link,
            title,
            max_length,
        }
    }

    pub fn link(&self) -> &InviteLinkData {
        &self.link
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn action(&self) -> RenameAction {
        if self.link.is_exported() {
            RenameAction::Save
        } else {
            RenameAction::Create
        }
    }

    /// Replace the field's text. Text over the limit is rejected and the
    /// previous value kept.
    pub fn set_title(&mut self, text: &str) -> Result<(), LinkError> {
        let len = text.chars().count();
        if len > self.max_length {
            return Err(LinkError::TitleTooLong {
                len,
                max: self.max_length,
            });
        }
        self.title = text.to_string();
        Ok(())
    }

    /// Send the trimmed title. The list picks the new title up from the
    /// next server push.
    pub fn submit(self, service: &dyn RemoteLinkService) -> Result<(), LinkError> {
        let title = self.title.trim().to_string();
        let len = title.chars().count();
        if len > self.max_length {
            return Err(LinkError::TitleTooLong {
                len,
                max: self.max_length,
            });
        }

        let filter_id = self.link.filter_id;
        debug!(filter_id, url = %self.link.url, "renaming invite link");
        service.rename(
            filter_id,
            &self.link.url,
            &title,
            Box::new(move |result| {
                if let Err(err) = result {
                    warn!(filter_id, error = %err, "failed to rename invite link");
                }
            }),
        );
        Ok(())
    }
}
