use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::{Rc, Weak};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::LinkError;
use crate::menu::{build_link_menu, dispatch_menu_action, MenuEntry};
use crate::models::{Chat, ChatFilter, ChatId, InviteLinkData};
use crate::presentation::Presentation;
use crate::service::{RemoteError, RemoteLinkService};
use crate::session::Session;
use crate::sharing::sharing_error;

pub const DEFAULT_EDITOR_TITLE: &str = "Share Folder";
pub const EMPTY_SELECTION_TOAST: &str = "Please select at least one chat for this link.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorButton {
    Save,
    Cancel,
    Done,
}

/// Buttons of the editor dialog for the given pending-changes state.
pub fn editor_buttons(has_changes: bool) -> Vec<EditorButton> {
    if has_changes {
        vec![EditorButton::Save, EditorButton::Cancel]
    } else {
        vec![EditorButton::Done]
    }
}

/// Whether the editor shows the link block (label, copy, share, menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    Unexported,
    Shared,
}

/// Subtitle above the chat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSummary {
    NoLink,
    NoneSelected,
    Count(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorRow {
    pub chat_id: ChatId,
    pub name: String,
    pub checked: bool,
    /// Replaces the chat's status line when sharing it is impossible
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    Denied,
    NotListed,
}

/// A presentation call held until the editor is released.
enum Notice {
    Toast(String),
    HasChanges(bool),
}

/// Chat membership editor for one invite link.
///
/// Rows list the link's chats (checked) followed by the filter's remaining
/// chats (unchecked). Chats that can't be shared, and every chat of a link
/// that has no URL yet, are denied: they stay visible but can't be toggled.
pub struct LinkEditor {
    weak_self: Weak<RefCell<LinkEditor>>,
    service: Rc<dyn RemoteLinkService>,
    presentation: Rc<dyn Presentation>,
    data: InviteLinkData,
    filter_title: String,
    rows: Vec<EditorRow>,
    /// Chat -> toast text; empty text means deny silently
    denied: HashMap<ChatId, String>,
    initial: BTreeSet<ChatId>,
    selected: BTreeSet<ChatId>,
    has_changes: bool,
    max_title_length: usize,
    notices: Vec<Notice>,
}

impl LinkEditor {
    pub fn open(
        session: &Session,
        service: Rc<dyn RemoteLinkService>,
        presentation: Rc<dyn Presentation>,
        filter: &ChatFilter,
        data: InviteLinkData,
    ) -> Rc<RefCell<Self>> {
        debug_assert!(data.is_consistent(), "placeholder links can't carry chats");
        Rc::new_cyclic(|weak_self| {
            let mut editor = Self {
                weak_self: weak_self.clone(),
                service,
                presentation,
                data,
                filter_title: filter.title.clone(),
                rows: Vec::new(),
                denied: HashMap::new(),
                initial: BTreeSet::new(),
                selected: BTreeSet::new(),
                has_changes: false,
                max_title_length: session.config().max_title_length,
                notices: Vec::new(),
            };
            editor.prepare(session, filter);
            RefCell::new(editor)
        })
    }

    fn prepare(&mut self, session: &Session, filter: &ChatFilter) {
        let exported = self.data.is_exported();
        let mut rows: Vec<EditorRow> = Vec::new();

        for &chat_id in &self.data.chats {
            if rows.iter().any(|row| row.chat_id == chat_id) {
                continue;
            }
            rows.push(EditorRow {
                chat_id,
                name: chat_name(session.chat(chat_id), chat_id),
                checked: true,
                status: None,
            });
            self.initial.insert(chat_id);
        }

        for &chat_id in &filter.always {
            if rows.iter().any(|row| row.chat_id == chat_id) {
                continue;
            }
            let chat = session.chat(chat_id);
            let mut row = EditorRow {
                chat_id,
                name: chat_name(chat, chat_id),
                checked: false,
                status: None,
            };
            match chat.map(sharing_error) {
                Some(Some(error)) => {
                    row.status = Some(error.status().to_string());
                    self.denied.insert(chat_id, error.toast().to_string());
                }
                Some(None) if exported => {}
                Some(None) => {
                    self.denied.insert(chat_id, String::new());
                }
                None => {
                    warn!(chat_id, "filter chat missing from session, denying it");
                    self.denied.insert(chat_id, String::new());
                }
            }
            rows.push(row);
        }

        self.rows = rows;
        self.selected = self.initial.clone();
    }

    // ===== Selection =====

    /// Flip a chat's membership. Denied chats keep their state and surface
    /// their reason, if they have one.
    pub fn toggle(this: &Rc<RefCell<Self>>, chat_id: ChatId) -> ToggleOutcome {
        let outcome = this.borrow_mut().flip(chat_id);
        Self::flush(this);
        outcome
    }

    pub fn toggle_row(this: &Rc<RefCell<Self>>, index: usize) -> Option<ToggleOutcome> {
        let chat_id = this.borrow().rows.get(index)?.chat_id;
        Some(Self::toggle(this, chat_id))
    }

    fn flip(&mut self, chat_id: ChatId) -> ToggleOutcome {
        if let Some(reason) = self.denied.get(&chat_id) {
            if !reason.is_empty() {
                self.notices.push(Notice::Toast(reason.clone()));
            }
            return ToggleOutcome::Denied;
        }

        let checked = match self.rows.iter_mut().find(|row| row.chat_id == chat_id) {
            Some(row) => {
                row.checked = !row.checked;
                row.checked
            }
            None => return ToggleOutcome::NotListed,
        };

        let outcome = if checked {
            self.selected.insert(chat_id);
            ToggleOutcome::Selected
        } else {
            self.selected.remove(&chat_id);
            ToggleOutcome::Deselected
        };
        self.refresh_has_changes();
        outcome
    }

    fn refresh_has_changes(&mut self) {
        let has = self.initial != self.selected;
        if has != self.has_changes {
            self.has_changes = has;
            self.notices.push(Notice::HasChanges(has));
        }
    }

    /// Deliver queued notices once the editor is no longer borrowed, so the
    /// presentation can read it back.
    fn flush(this: &Rc<RefCell<Self>>) {
        let (presentation, notices) = {
            let mut editor = this.borrow_mut();
            let notices = std::mem::take(&mut editor.notices);
            (editor.presentation.clone(), notices)
        };
        for notice in notices {
            match notice {
                Notice::Toast(text) => presentation.show_toast(&text),
                Notice::HasChanges(has) => presentation.has_changes_changed(has),
            }
        }
    }

    // ===== Saving =====

    /// Send the selected chats to the server.
    ///
    /// Only valid while there are pending changes. An empty selection is
    /// reported to the user and never reaches the service.
    pub fn commit(this: &Rc<RefCell<Self>>) -> Result<(), LinkError> {
        let started = this.borrow_mut().start_commit();
        Self::flush(this);
        started
    }

    fn start_commit(&mut self) -> Result<(), LinkError> {
        if !self.has_changes {
            return Err(LinkError::NoChanges);
        }
        if self.selected.is_empty() {
            self.notices
                .push(Notice::Toast(EMPTY_SELECTION_TOAST.to_string()));
            return Err(LinkError::EmptySelection);
        }
        if !self.data.is_exported() {
            return Err(LinkError::MissingUrl);
        }

        let filter_id = self.data.filter_id;
        let chats: Vec<ChatId> = self.selected.iter().copied().collect();
        let weak = self.weak_self.clone();
        debug!(filter_id, chats = chats.len(), "saving invite link chats");

        self.service.edit_chats(
            filter_id,
            &self.data.url,
            chats,
            Box::new(move |result| {
                let Some(editor) = weak.upgrade() else {
                    debug!(filter_id, "link editor closed before edit completed");
                    return;
                };
                match result {
                    Ok(link) => editor.borrow_mut().apply_committed(link),
                    Err(err) => editor.borrow_mut().report_commit_failure(&err),
                }
                LinkEditor::flush(&editor);
            }),
        );
        Ok(())
    }

    fn apply_committed(&mut self, link: InviteLinkData) {
        if !link.same_link(&self.data) {
            warn!(url = %link.url, "edit response for a different link, ignoring");
            return;
        }
        self.initial = link.chats.iter().copied().collect();
        self.data = link;
        self.refresh_has_changes();
    }

    fn report_commit_failure(&mut self, err: &RemoteError) {
        warn!(filter_id = self.data.filter_id, error = %err, "failed to save invite link chats");
        self.notices.push(Notice::Toast(err.to_string()));
    }

    // ===== Link block =====

    /// The link's menu. Unexported links have no link block, hence no menu.
    pub fn menu(&self) -> Vec<MenuEntry> {
        if self.data.is_exported() {
            build_link_menu(&self.data)
        } else {
            Vec::new()
        }
    }

    pub fn perform(&self, entry: &MenuEntry) {
        dispatch_menu_action(entry, self.presentation.as_ref(), self.max_title_length);
    }

    pub fn copy_link(&self) {
        if self.data.is_exported() {
            self.presentation.copy_link(&self.data.url);
        }
    }

    pub fn share_link(&self) {
        if self.data.is_exported() {
            self.presentation.share_link(&self.data.url);
        }
    }

    /// URL as shown in the link label, without the scheme.
    pub fn link_label(&self) -> &str {
        self.data
            .url
            .strip_prefix("https://")
            .unwrap_or(&self.data.url)
    }

    // ===== Queries =====

    pub fn data(&self) -> &InviteLinkData {
        &self.data
    }

    pub fn rows(&self) -> &[EditorRow] {
        &self.rows
    }

    pub fn selected(&self) -> &BTreeSet<ChatId> {
        &self.selected
    }

    pub fn initial(&self) -> &BTreeSet<ChatId> {
        &self.initial
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn is_denied(&self, chat_id: ChatId) -> bool {
        self.denied.contains_key(&chat_id)
    }

    pub fn denied_reason(&self, chat_id: ChatId) -> Option<&str> {
        self.denied.get(&chat_id).map(String::as_str)
    }

    pub fn buttons(&self) -> Vec<EditorButton> {
        editor_buttons(self.has_changes)
    }

    pub fn mode(&self) -> EditorMode {
        if self.data.is_exported() {
            EditorMode::Shared
        } else {
            EditorMode::Unexported
        }
    }

    pub fn summary(&self) -> SelectionSummary {
        if !self.data.is_exported() {
            SelectionSummary::NoLink
        } else if self.selected.is_empty() {
            SelectionSummary::NoneSelected
        } else {
            SelectionSummary::Count(self.selected.len())
        }
    }

    pub fn title(&self) -> &str {
        if self.data.title.is_empty() {
            DEFAULT_EDITOR_TITLE
        } else {
            &self.data.title
        }
    }

    pub fn filter_title(&self) -> &str {
        &self.filter_title
    }
}

/// Chats a link currently admits, for read-only display.
pub fn link_chats<'a>(session: &'a Session, link: &InviteLinkData) -> Vec<&'a Chat> {
    link.chats
        .iter()
        .filter_map(|&chat_id| session.chat(chat_id))
        .collect()
}

fn chat_name(chat: Option<&Chat>, chat_id: ChatId) -> String {
    chat.map(|chat| chat.name.clone())
        .unwrap_or_else(|| format!("chat {}", chat_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::menu::MenuAction;
    use crate::models::ChatKind;
    use crate::presentation::testing::{RecordingPresentation, UiEvent};
    use crate::service::testing::{Call, RecordingService};
    use crate::sharing::SharingError;

    const GROUP_A: ChatId = 1;
    const GROUP_B: ChatId = 2;
    const CHANNEL_X: ChatId = 3;
    const BOT: ChatId = 4;
    const FRIEND: ChatId = 5;
    const NEWS: ChatId = 6;

    fn make_test_session() -> Session {
        Session::new(CoreConfig::default()).with_chats([
            Chat::new(
                GROUP_A,
                "Group A",
                ChatKind::BasicGroup {
                    can_have_invite_link: true,
                },
            ),
            Chat::new(
                GROUP_B,
                "Group B",
                ChatKind::Channel {
                    megagroup: true,
                    can_have_invite_link: true,
                },
            ),
            Chat::new(
                CHANNEL_X,
                "Channel X",
                ChatKind::Channel {
                    megagroup: false,
                    can_have_invite_link: true,
                },
            ),
            Chat::new(BOT, "Helper Bot", ChatKind::Person { is_bot: true }),
            Chat::new(FRIEND, "Friend", ChatKind::Person { is_bot: false }),
            Chat::new(
                NEWS,
                "News",
                ChatKind::Channel {
                    megagroup: false,
                    can_have_invite_link: false,
                },
            ),
        ])
    }

    fn make_test_link(chats: Vec<ChatId>) -> InviteLinkData {
        InviteLinkData {
            filter_id: 10,
            url: "https://t.me/addlist/editor".to_string(),
            title: String::new(),
            chats,
        }
    }

    struct Fixture {
        service: Rc<RecordingService>,
        presentation: Rc<RecordingPresentation>,
        editor: Rc<RefCell<LinkEditor>>,
    }

    fn open_editor(filter: ChatFilter, data: InviteLinkData) -> Fixture {
        let session = make_test_session();
        let service = RecordingService::new();
        let presentation = RecordingPresentation::new();
        let editor = LinkEditor::open(
            &session,
            service.clone(),
            presentation.clone(),
            &filter,
            data,
        );
        Fixture {
            service,
            presentation,
            editor,
        }
    }

    #[test]
    fn test_unexported_link_denies_every_chat() {
        let filter = ChatFilter::new(10, "Folder").with_always([CHANNEL_X]);
        let fixture = open_editor(filter, InviteLinkData::placeholder(10));
        let editor = fixture.editor.borrow();

        assert_eq!(editor.rows().len(), 1);
        assert_eq!(editor.rows()[0].chat_id, CHANNEL_X);
        assert!(!editor.rows()[0].checked);
        assert!(editor.is_denied(CHANNEL_X));
        assert_eq!(editor.denied_reason(CHANNEL_X), Some(""));
        assert!(editor.selected().is_empty());
        assert!(!editor.has_changes());
        assert_eq!(editor.mode(), EditorMode::Unexported);
        assert_eq!(editor.summary(), SelectionSummary::NoLink);

        drop(editor);

        // Silent denial: no toast, no selection change
        assert_eq!(
            LinkEditor::toggle(&fixture.editor, CHANNEL_X),
            ToggleOutcome::Denied
        );
        assert!(fixture.editor.borrow().selected().is_empty());
        assert!(fixture.presentation.events().is_empty());
    }

    #[test]
    fn test_rows_list_link_chats_then_filter_chats() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_B, CHANNEL_X, GROUP_A]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A, GROUP_B]));
        let editor = fixture.editor.borrow();

        let ids: Vec<ChatId> = editor.rows().iter().map(|row| row.chat_id).collect();
        assert_eq!(ids, vec![GROUP_A, GROUP_B, CHANNEL_X]);
        assert!(editor.rows()[0].checked);
        assert!(editor.rows()[1].checked);
        assert!(!editor.rows()[2].checked);
        assert!(!editor.is_denied(CHANNEL_X));
        assert_eq!(editor.summary(), SelectionSummary::Count(2));
        assert_eq!(editor.filter_title(), "Folder");
    }

    #[test]
    fn test_has_changes_tracks_difference_from_initial() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A, GROUP_B]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A, GROUP_B]));
        let editor = &fixture.editor;
        assert_eq!(editor.borrow().buttons(), vec![EditorButton::Done]);

        assert_eq!(LinkEditor::toggle(editor, GROUP_A), ToggleOutcome::Deselected);
        assert!(editor.borrow().has_changes());
        assert_eq!(
            editor.borrow().buttons(),
            vec![EditorButton::Save, EditorButton::Cancel]
        );

        assert_eq!(LinkEditor::toggle(editor, GROUP_A), ToggleOutcome::Selected);
        assert!(!editor.borrow().has_changes());
        assert_eq!(
            fixture.presentation.events(),
            vec![UiEvent::HasChanges(true), UiEvent::HasChanges(false)]
        );
    }

    #[test]
    fn test_structurally_denied_chat_shows_toast() {
        let filter = ChatFilter::new(10, "Folder").with_always([BOT, FRIEND, NEWS]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));
        let editor = &fixture.editor;

        {
            let editor = editor.borrow();
            let bot_row = editor.rows().iter().find(|row| row.chat_id == BOT).unwrap();
            assert_eq!(bot_row.status.as_deref(), Some(SharingError::Bot.status()));
        }

        assert_eq!(LinkEditor::toggle(editor, BOT), ToggleOutcome::Denied);
        assert_eq!(LinkEditor::toggle(editor, NEWS), ToggleOutcome::Denied);
        assert_eq!(editor.borrow().selected().len(), 1);
        assert!(!editor.borrow().has_changes());
        assert_eq!(
            fixture.presentation.toasts(),
            vec![
                SharingError::Bot.toast().to_string(),
                SharingError::NoAdminChannel.toast().to_string(),
            ]
        );
    }

    #[test]
    fn test_toggle_unknown_chat_is_ignored() {
        let filter = ChatFilter::new(10, "Folder");
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));
        let editor = &fixture.editor;
        assert_eq!(LinkEditor::toggle(editor, 999), ToggleOutcome::NotListed);
        assert_eq!(LinkEditor::toggle_row(editor, 5), None);
        assert_eq!(
            LinkEditor::toggle_row(editor, 0),
            Some(ToggleOutcome::Deselected)
        );
    }

    #[test]
    fn test_commit_with_empty_selection_never_calls_service() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));

        LinkEditor::toggle(&fixture.editor, GROUP_A);
        assert!(matches!(
            LinkEditor::commit(&fixture.editor),
            Err(LinkError::EmptySelection)
        ));
        assert_eq!(fixture.service.call_count(), 0);
        assert_eq!(
            fixture.presentation.toasts(),
            vec![EMPTY_SELECTION_TOAST.to_string()]
        );
    }

    #[test]
    fn test_commit_without_changes_is_rejected() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));
        assert!(matches!(
            LinkEditor::commit(&fixture.editor),
            Err(LinkError::NoChanges)
        ));
        assert_eq!(fixture.service.call_count(), 0);
    }

    #[test]
    fn test_commit_sends_selected_set_once() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A, GROUP_B, CHANNEL_X]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));

        LinkEditor::toggle(&fixture.editor, CHANNEL_X);
        LinkEditor::toggle(&fixture.editor, GROUP_B);
        LinkEditor::commit(&fixture.editor).unwrap();

        let mut calls = fixture.service.take_calls();
        assert_eq!(calls.len(), 1);
        match calls.pop() {
            Some(Call::EditChats {
                filter_id,
                url,
                chats,
                done,
            }) => {
                assert_eq!(filter_id, 10);
                assert_eq!(url, "https://t.me/addlist/editor");
                assert_eq!(chats, vec![GROUP_A, GROUP_B, CHANNEL_X]);
                done(Ok(make_test_link(chats.clone())));
            }
            _ => panic!("expected an edit call"),
        }

        let editor = fixture.editor.borrow();
        assert!(!editor.has_changes());
        assert_eq!(editor.buttons(), vec![EditorButton::Done]);
        assert_eq!(editor.data().chats, vec![GROUP_A, GROUP_B, CHANNEL_X]);
        assert_eq!(
            fixture.presentation.events(),
            vec![UiEvent::HasChanges(true), UiEvent::HasChanges(false)]
        );
    }

    #[test]
    fn test_commit_failure_keeps_pending_changes() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A, GROUP_B]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));
        LinkEditor::toggle(&fixture.editor, GROUP_B);
        LinkEditor::commit(&fixture.editor).unwrap();

        if let Some(Call::EditChats { done, .. }) = fixture.service.take_calls().pop() {
            done(Err(RemoteError::Rejected {
                message: "FLOOD_WAIT".to_string(),
            }));
        }

        let editor = fixture.editor.borrow();
        assert!(editor.has_changes());
        assert_eq!(editor.initial().len(), 1);
        assert_eq!(fixture.presentation.toasts().len(), 1);
    }

    #[test]
    fn test_response_after_close_is_dropped() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A, GROUP_B]);
        let Fixture {
            service,
            presentation,
            editor,
        } = open_editor(filter, make_test_link(vec![GROUP_A]));
        LinkEditor::toggle(&editor, GROUP_B);
        LinkEditor::commit(&editor).unwrap();
        let events_before = presentation.events().len();
        drop(editor);

        if let Some(Call::EditChats { done, chats, .. }) = service.take_calls().pop() {
            done(Ok(make_test_link(chats)));
        }
        assert_eq!(presentation.events().len(), events_before);
    }

    #[test]
    fn test_notifications_can_read_editor_back() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A, GROUP_B, BOT]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));
        fixture.presentation.watch_editor(&fixture.editor);

        LinkEditor::toggle(&fixture.editor, GROUP_B);
        LinkEditor::toggle(&fixture.editor, BOT);
        LinkEditor::commit(&fixture.editor).unwrap();
        if let Some(Call::EditChats { done, chats, .. }) = fixture.service.take_calls().pop() {
            done(Ok(make_test_link(chats)));
        }

        assert_eq!(
            fixture.presentation.renders(),
            vec![
                "has_changes=true selected=2",
                "has_changes=true selected=2",
                "has_changes=false selected=2",
            ]
        );
    }

    #[test]
    fn test_commit_failure_toast_can_read_editor_back() {
        let filter = ChatFilter::new(10, "Folder").with_always([GROUP_A, GROUP_B]);
        let fixture = open_editor(filter, make_test_link(vec![GROUP_A]));
        fixture.presentation.watch_editor(&fixture.editor);

        LinkEditor::toggle(&fixture.editor, GROUP_B);
        LinkEditor::commit(&fixture.editor).unwrap();
        if let Some(Call::EditChats { done, .. }) = fixture.service.take_calls().pop() {
            done(Err(RemoteError::Transport {
                message: "offline".to_string(),
            }));
        }

        assert_eq!(
            fixture.presentation.renders(),
            vec!["has_changes=true selected=2", "has_changes=true selected=2"]
        );
    }

    #[test]
    fn test_link_block() {
        let mut link = make_test_link(vec![GROUP_A]);
        link.title = "Team".to_string();
        let fixture = open_editor(ChatFilter::new(10, "Folder"), link);
        let editor = fixture.editor.borrow();

        assert_eq!(editor.title(), "Team");
        assert_eq!(editor.link_label(), "t.me/addlist/editor");
        let menu = editor.menu();
        assert_eq!(menu.len(), 5);
        assert_eq!(menu[3].action, MenuAction::Rename);

        editor.perform(&menu[0]);
        editor.share_link();
        assert_eq!(
            fixture.presentation.events(),
            vec![
                UiEvent::Copied("https://t.me/addlist/editor".to_string()),
                UiEvent::Shared("https://t.me/addlist/editor".to_string()),
            ]
        );
    }

    #[test]
    fn test_placeholder_has_no_link_block() {
        let fixture = open_editor(ChatFilter::new(10, "Folder"), InviteLinkData::placeholder(10));
        let editor = fixture.editor.borrow();
        assert!(editor.menu().is_empty());
        assert_eq!(editor.title(), DEFAULT_EDITOR_TITLE);
        editor.copy_link();
        assert!(fixture.presentation.events().is_empty());
    }

    #[test]
    fn test_link_chats_lists_known_members() {
        let session = make_test_session();
        let link = make_test_link(vec![GROUP_A, 999, CHANNEL_X]);
        let names: Vec<&str> = link_chats(&session, &link)
            .into_iter()
            .map(|chat| chat.name.as_str())
            .collect();
        assert_eq!(names, vec!["Group A", "Channel X"]);
    }
}
