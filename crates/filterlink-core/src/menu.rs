use serde::Serialize;

use crate::models::InviteLinkData;
use crate::presentation::Presentation;
use crate::rename::RenameForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Copy,
    Share,
    Qr,
    Rename,
    Delete,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Copy => "Copy Link",
            Self::Share => "Share Link",
            Self::Qr => "Get QR Code",
            Self::Rename => "Name Link",
            Self::Delete => "Delete Link",
        }
    }
}

/// A context menu item, carrying a snapshot of the link it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub action: MenuAction,
    pub link: InviteLinkData,
}

/// Build the menu for a link. A fresh list is built on every request so it
/// always reflects the row's current data.
pub fn build_link_menu(link: &InviteLinkData) -> Vec<MenuEntry> {
    [
        MenuAction::Copy,
        MenuAction::Share,
        MenuAction::Qr,
        MenuAction::Rename,
        MenuAction::Delete,
    ]
    .into_iter()
    .map(|action| MenuEntry {
        label: action.label(),
        action,
        link: link.clone(),
    })
    .collect()
}

/// Run a menu entry. Deletion only asks for confirmation here.
pub fn dispatch_menu_action(
    entry: &MenuEntry,
    presentation: &dyn Presentation,
    max_title_length: usize,
) {
    let url = entry.link.url.as_str();
    match entry.action {
        MenuAction::Copy => presentation.copy_link(url),
        MenuAction::Share => presentation.share_link(url),
        MenuAction::Qr => presentation.show_qr(url),
        MenuAction::Rename => {
            presentation.show_rename(RenameForm::new(entry.link.clone(), max_title_length))
        }
        MenuAction::Delete => presentation.confirm_delete(entry.link.clone()),
    }
}
