use std::cell::RefCell;
use std::rc::Rc;

use crate::editor::LinkEditor;
use crate::menu::MenuEntry;
use crate::models::InviteLinkData;
use crate::rename::RenameForm;
use crate::store::RowChange;

/// The UI side of the link controllers. These are the only calls the core
/// makes into the presentation layer.
///
/// The calling controller is not borrowed while one of these runs, so an
/// implementation may read it back to re-render. Mutations triggered from a
/// callback belong to the next event loop turn.
pub trait Presentation {
    /// Rows were updated, appended or removed by a reconciliation pass.
    fn rows_changed(&self, changes: &[RowChange]);

    /// Non-blocking message, e.g. why a chat can't be selected.
    fn show_toast(&self, text: &str);

    /// The open editor switched between "has pending changes" and not.
    fn has_changes_changed(&self, has_changes: bool);

    /// Take ownership of a newly opened editor. Dropping it closes it.
    fn show_editor(&self, editor: Rc<RefCell<LinkEditor>>);

    fn show_rename(&self, form: RenameForm);

    fn show_menu(&self, entries: Vec<MenuEntry>);

    /// Ask the user to confirm revoking `link`; on confirmation the caller
    /// invokes the controller's delete.
    fn confirm_delete(&self, link: InviteLinkData);

    fn copy_link(&self, url: &str);

    fn share_link(&self, url: &str);

    fn show_qr(&self, url: &str);
}
