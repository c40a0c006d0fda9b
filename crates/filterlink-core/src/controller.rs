use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::editor::{LinkEditor, EMPTY_SELECTION_TOAST};
use crate::error::LinkError;
use crate::menu::{build_link_menu, dispatch_menu_action, MenuEntry};
use crate::models::{ChatFilter, FilterId, InviteLinkData};
use crate::presentation::Presentation;
use crate::service::{export_link, RemoteError, RemoteLinkService};
use crate::session::Session;
use crate::sharing::{check_exportable, collect_filter_link_chats};
use crate::store::{LinkRow, RowChange, RowStore};

/// Revoke a link on the server. Rows are not touched locally; the removal
/// shows up with the next authoritative list.
pub fn delete_link(service: &dyn RemoteLinkService, link: &InviteLinkData) {
    let filter_id = link.filter_id;
    let url = link.url.clone();
    debug!(filter_id, url = %url, "deleting invite link");
    service.delete(
        filter_id,
        &link.url,
        Box::new(move |result| match result {
            Ok(()) => debug!(filter_id, url = %url, "invite link deleted"),
            Err(RemoteError::NotFound) => {
                debug!(filter_id, url = %url, "invite link was already deleted")
            }
            Err(err) => warn!(filter_id, url = %url, error = %err, "failed to delete invite link"),
        }),
    );
}

/// The list of invite links of one chat filter.
pub struct LinkListController {
    weak_self: Weak<RefCell<LinkListController>>,
    session: Rc<Session>,
    service: Rc<dyn RemoteLinkService>,
    presentation: Rc<dyn Presentation>,
    filter_id: FilterId,
    rows: RowStore,
}

impl LinkListController {
    pub fn new(
        session: Rc<Session>,
        service: Rc<dyn RemoteLinkService>,
        presentation: Rc<dyn Presentation>,
        filter_id: FilterId,
    ) -> Rc<RefCell<Self>> {
        let rows = RowStore::new(session.config());
        Rc::new_cyclic(|weak_self| {
            RefCell::new(Self {
                weak_self: weak_self.clone(),
                session,
                service,
                presentation,
                filter_id,
                rows,
            })
        })
    }

    pub fn filter_id(&self) -> FilterId {
        self.filter_id
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    // ===== Feed =====

    /// Handle one emission of the authoritative link list. The presentation
    /// is told after the list is released, so it can read the rows back.
    pub fn apply_links(this: &Rc<RefCell<Self>>, links: &[InviteLinkData]) -> Vec<RowChange> {
        let (changes, presentation, filter_id) = {
            let mut controller = this.borrow_mut();
            let changes = controller.rows.reconcile(links);
            (changes, controller.presentation.clone(), controller.filter_id)
        };
        if !changes.is_empty() {
            debug!(filter_id, changes = changes.len(), "link list changed");
            presentation.rows_changed(&changes);
        }
        changes
    }

    // ===== Row events =====

    pub fn row_clicked(&self, index: usize) -> Result<(), LinkError> {
        self.open(index).map(|_| ())
    }

    /// Open the chat editor for a row and hand it to the presentation.
    pub fn open(&self, index: usize) -> Result<Rc<RefCell<LinkEditor>>, LinkError> {
        let data = self.row(index)?.data().clone();
        self.open_link(data)
    }

    fn open_link(&self, data: InviteLinkData) -> Result<Rc<RefCell<LinkEditor>>, LinkError> {
        let filter = self.current_filter()?;
        let editor = LinkEditor::open(
            &self.session,
            self.service.clone(),
            self.presentation.clone(),
            &filter,
            data,
        );
        self.presentation.show_editor(editor.clone());
        Ok(editor)
    }

    pub fn row_right_action_clicked(&self, index: usize) -> Result<(), LinkError> {
        let entries = self.context_menu(index)?;
        self.presentation.show_menu(entries);
        Ok(())
    }

    pub fn context_menu(&self, index: usize) -> Result<Vec<MenuEntry>, LinkError> {
        Ok(build_link_menu(self.row(index)?.data()))
    }

    pub fn perform(&self, entry: &MenuEntry) {
        dispatch_menu_action(
            entry,
            self.presentation.as_ref(),
            self.session.config().max_title_length,
        );
    }

    pub fn copy_link(&self, index: usize) -> Result<(), LinkError> {
        let row = self.row(index)?;
        self.presentation.copy_link(&row.data().url);
        Ok(())
    }

    pub fn share_link(&self, index: usize) -> Result<(), LinkError> {
        let row = self.row(index)?;
        self.presentation.share_link(&row.data().url);
        Ok(())
    }

    pub fn show_qr(&self, index: usize) -> Result<(), LinkError> {
        let row = self.row(index)?;
        self.presentation.show_qr(&row.data().url);
        Ok(())
    }

    // ===== Deletion =====

    pub fn request_delete(&self, index: usize) -> Result<(), LinkError> {
        let link = self.row(index)?.data().clone();
        self.presentation.confirm_delete(link);
        Ok(())
    }

    /// The user confirmed deleting `link`.
    pub fn delete_confirmed(&self, link: &InviteLinkData) {
        delete_link(self.service.as_ref(), link);
    }

    // ===== Export =====

    /// Export a new link with every shareable chat of the filter, then open
    /// the editor on the result. A failed export opens the editor on a
    /// placeholder, from which the user can retry.
    pub fn create_link(&self) -> Result<(), LinkError> {
        let filter = self.current_filter()?;
        if let Err(err) = check_exportable(&filter) {
            self.presentation.show_toast(&err.to_string());
            return Err(err);
        }
        let chats = collect_filter_link_chats(&self.session, &filter);
        if chats.is_empty() {
            self.presentation.show_toast(EMPTY_SELECTION_TOAST);
            return Err(LinkError::EmptySelection);
        }

        info!(filter_id = filter.id, chats = chats.len(), "exporting invite link");
        let weak = self.weak_self.clone();
        export_link(self.service.as_ref(), filter.id, chats, move |link| {
            let Some(controller) = weak.upgrade() else {
                debug!("link list closed before export completed");
                return;
            };
            let opened = controller.borrow().open_link(link);
            if let Err(err) = opened {
                warn!(error = %err, "failed to open exported link");
            }
        });
        Ok(())
    }

    // ===== Helpers =====

    fn row(&self, index: usize) -> Result<&LinkRow, LinkError> {
        self.rows
            .row_at(index)
            .ok_or(LinkError::RowOutOfRange(index))
    }

    fn current_filter(&self) -> Result<ChatFilter, LinkError> {
        self.session
            .filter(self.filter_id)
            .ok_or(LinkError::UnknownFilter(self.filter_id))
    }
}
