use std::cell::RefCell;
use std::rc::Rc;

use filterlink_core::menu::MenuEntry;
use filterlink_core::models::InviteLinkData;
use filterlink_core::store::RowChange;
use filterlink_core::{LinkEditor, Presentation, RenameForm};
use serde::Serialize;

/// Something the core asked the UI to do, as reported in the CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConsoleEvent {
    RowsChanged { changes: Vec<RowChange> },
    Toast { text: String },
    HasChanges { value: bool },
    EditorOpened { url: String },
    RenameOpened { title: String },
    MenuOpened { entries: usize },
    ConfirmDelete { url: String },
    Copied { url: String },
    Shared { url: String },
    Qr { url: String },
}

/// Headless presentation: records every call and keeps the dialogs the
/// core hands over so the driver can act on them afterwards.
#[derive(Default)]
pub struct ConsolePresentation {
    events: RefCell<Vec<ConsoleEvent>>,
    editors: RefCell<Vec<Rc<RefCell<LinkEditor>>>>,
    renames: RefCell<Vec<RenameForm>>,
    menus: RefCell<Vec<Vec<MenuEntry>>>,
    pending_deletes: RefCell<Vec<InviteLinkData>>,
}

impl ConsolePresentation {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.events.borrow().clone()
    }

    pub fn take_editor(&self) -> Option<Rc<RefCell<LinkEditor>>> {
        self.editors.borrow_mut().pop()
    }

    pub fn take_rename(&self) -> Option<RenameForm> {
        self.renames.borrow_mut().pop()
    }

    pub fn take_menu(&self) -> Option<Vec<MenuEntry>> {
        self.menus.borrow_mut().pop()
    }

    pub fn take_pending_delete(&self) -> Option<InviteLinkData> {
        self.pending_deletes.borrow_mut().pop()
    }

    fn record(&self, event: ConsoleEvent) {
        tracing::debug!(?event, "presentation event");
        self.events.borrow_mut().push(event);
    }
}

impl Presentation for ConsolePresentation {
    fn rows_changed(&self, changes: &[RowChange]) {
        self.record(ConsoleEvent::RowsChanged {
            changes: changes.to_vec(),
        });
    }

    fn show_toast(&self, text: &str) {
        self.record(ConsoleEvent::Toast {
            text: text.to_string(),
        });
    }

    fn has_changes_changed(&self, has_changes: bool) {
        self.record(ConsoleEvent::HasChanges { value: has_changes });
    }

    fn show_editor(&self, editor: Rc<RefCell<LinkEditor>>) {
        let url = editor.borrow().data().url.clone();
        self.record(ConsoleEvent::EditorOpened { url });
        self.editors.borrow_mut().push(editor);
    }

    fn show_rename(&self, form: RenameForm) {
        self.record(ConsoleEvent::RenameOpened {
            title: form.title().to_string(),
        });
        self.renames.borrow_mut().push(form);
    }

    fn show_menu(&self, entries: Vec<MenuEntry>) {
        self.record(ConsoleEvent::MenuOpened {
            entries: entries.len(),
        });
        self.menus.borrow_mut().push(entries);
    }

    fn confirm_delete(&self, link: InviteLinkData) {
        self.record(ConsoleEvent::ConfirmDelete {
            url: link.url.clone(),
        });
        self.pending_deletes.borrow_mut().push(link);
    }

    fn copy_link(&self, url: &str) {
        self.record(ConsoleEvent::Copied {
            url: url.to_string(),
        });
    }

    fn share_link(&self, url: &str) {
        self.record(ConsoleEvent::Shared {
            url: url.to_string(),
        });
    }

    fn show_qr(&self, url: &str) {
        self.record(ConsoleEvent::Qr {
            url: url.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filterlink_core::menu::build_link_menu;

    fn make_test_link() -> InviteLinkData {
        InviteLinkData {
            filter_id: 5,
            url: "https://t.me/addlist/seed".to_string(),
            title: String::new(),
            chats: vec![1],
        }
    }

    #[test]
    fn test_records_events_in_order() {
        let console = ConsolePresentation::new();
        console.show_toast("hello");
        console.copy_link("https://t.me/addlist/seed");
        console.has_changes_changed(true);

        assert_eq!(
            console.events(),
            vec![
                ConsoleEvent::Toast {
                    text: "hello".to_string()
                },
                ConsoleEvent::Copied {
                    url: "https://t.me/addlist/seed".to_string()
                },
                ConsoleEvent::HasChanges { value: true },
            ]
        );
    }

    #[test]
    fn test_keeps_dialogs_for_the_driver() {
        let console = ConsolePresentation::new();
        let link = make_test_link();
        console.show_menu(build_link_menu(&link));
        console.confirm_delete(link.clone());
        console.show_rename(RenameForm::new(link.clone(), 32));

        assert_eq!(console.take_menu().map(|entries| entries.len()), Some(5));
        assert_eq!(console.take_pending_delete(), Some(link));
        assert!(console.take_rename().is_some());
        assert!(console.take_rename().is_none());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(ConsoleEvent::Toast {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"event": "toast", "text": "hi"}));
    }
}
