use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use filterlink_core::editor::{link_chats, EditorButton, EditorMode, EditorRow, SelectionSummary, ToggleOutcome};
use filterlink_core::menu::MenuAction;
use filterlink_core::models::{ChatId, FilterId};
use filterlink_core::{
    CoreConfig, LinkEditor, LinkError, LinkListController, LinkRuntime, MemoryBackend,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::console::ConsolePresentation;
use super::fixture::Fixture;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// One scripted interaction with the link list of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    List {
        filter_id: FilterId,
    },
    Export {
        filter_id: FilterId,
    },
    Edit {
        filter_id: FilterId,
        row: usize,
        toggles: Vec<ChatId>,
        commit: bool,
    },
    Rename {
        filter_id: FilterId,
        row: usize,
        title: String,
    },
    Delete {
        filter_id: FilterId,
        row: usize,
        confirm: bool,
    },
    Menu {
        filter_id: FilterId,
        row: usize,
        pick: Option<usize>,
    },
    Chats {
        filter_id: FilterId,
        row: usize,
    },
}

#[derive(Debug, Serialize)]
struct RowView {
    index: usize,
    id: String,
    name: String,
    status: String,
    url: String,
    title: String,
    chats: Vec<ChatId>,
}

#[derive(Debug, Serialize)]
struct EditorView {
    title: String,
    filter_title: String,
    link: String,
    mode: EditorMode,
    summary: SelectionSummary,
    has_changes: bool,
    buttons: Vec<EditorButton>,
    rows: Vec<EditorRow>,
}

impl EditorView {
    fn of(editor: &LinkEditor) -> Self {
        Self {
            title: editor.title().to_string(),
            filter_title: editor.filter_title().to_string(),
            link: editor.link_label().to_string(),
            mode: editor.mode(),
            summary: editor.summary(),
            has_changes: editor.has_changes(),
            buttons: editor.buttons(),
            rows: editor.rows().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ToggleView {
    chat_id: ChatId,
    outcome: ToggleOutcome,
}

/// Runs commands against a fixture through the link runtime, playing the
/// presentation side itself.
pub struct Driver {
    runtime: LinkRuntime,
    backend: Arc<MemoryBackend>,
    console: Rc<ConsolePresentation>,
    fixture: Fixture,
}

impl Driver {
    pub fn start(config: CoreConfig, fixture: Fixture) -> Result<Self> {
        let backend = Arc::new(fixture.backend(&config));
        let session = fixture.session(config);
        let runtime =
            LinkRuntime::new(session, backend.clone()).context("Failed to start link runtime")?;
        Ok(Self {
            runtime,
            backend,
            console: ConsolePresentation::new(),
            fixture,
        })
    }

    /// The fixture with the backend's current filters and links.
    pub fn fixture(&self) -> Fixture {
        self.fixture.refreshed(&self.backend)
    }

    pub fn execute(&self, command: CliCommand) -> Result<Value> {
        info!(?command, "Executing command");
        let result = match command {
            CliCommand::List { filter_id } => {
                let list = self.open_list(filter_id)?;
                json!({ "rows": rows_view(&list) })
            }
            CliCommand::Export { filter_id } => self.export(filter_id)?,
            CliCommand::Edit {
                filter_id,
                row,
                toggles,
                commit,
            } => self.edit(filter_id, row, &toggles, commit)?,
            CliCommand::Rename {
                filter_id,
                row,
                title,
            } => self.rename(filter_id, row, &title)?,
            CliCommand::Delete {
                filter_id,
                row,
                confirm,
            } => self.delete(filter_id, row, confirm)?,
            CliCommand::Menu {
                filter_id,
                row,
                pick,
            } => self.menu(filter_id, row, pick)?,
            CliCommand::Chats { filter_id, row } => self.chats(filter_id, row)?,
        };
        Ok(json!({ "result": result, "events": self.console.events() }))
    }

    fn export(&self, filter_id: FilterId) -> Result<Value> {
        let list = self.open_list(filter_id)?;
        list.borrow().create_link()?;
        self.settle()?;
        let editor = self
            .console
            .take_editor()
            .context("Export finished without opening an editor")?;
        let editor_view = EditorView::of(&editor.borrow());
        Ok(json!({ "editor": editor_view, "rows": rows_view(&list) }))
    }

    fn edit(&self, filter_id: FilterId, row: usize, toggles: &[ChatId], commit: bool) -> Result<Value> {
        let list = self.open_list(filter_id)?;
        let editor = list.borrow().open(row)?;

        let outcomes: Vec<ToggleView> = toggles
            .iter()
            .map(|&chat_id| ToggleView {
                chat_id,
                outcome: LinkEditor::toggle(&editor, chat_id),
            })
            .collect();

        if commit {
            LinkEditor::commit(&editor)?;
            self.settle()?;
        }

        let editor_view = EditorView::of(&editor.borrow());
        Ok(json!({
            "toggles": outcomes,
            "editor": editor_view,
            "rows": rows_view(&list),
        }))
    }

    fn rename(&self, filter_id: FilterId, row: usize, title: &str) -> Result<Value> {
        let list = self.open_list(filter_id)?;
        let entry = list
            .borrow()
            .context_menu(row)?
            .into_iter()
            .find(|entry| entry.action == MenuAction::Rename)
            .context("Link menu has no rename entry")?;
        list.borrow().perform(&entry);

        let mut form = self
            .console
            .take_rename()
            .context("Rename form was not opened")?;
        form.set_title(title)?;
        form.submit(self.runtime.service().as_ref())?;
        self.settle()?;
        Ok(json!({ "rows": rows_view(&list) }))
    }

    fn delete(&self, filter_id: FilterId, row: usize, confirm: bool) -> Result<Value> {
        let list = self.open_list(filter_id)?;
        list.borrow().request_delete(row)?;
        let link = self
            .console
            .take_pending_delete()
            .context("Delete was not confirmed by the list")?;
        if !confirm {
            return Ok(json!({ "deleted": false, "url": link.url }));
        }

        list.borrow().delete_confirmed(&link);
        self.settle()?;
        Ok(json!({ "deleted": true, "url": link.url, "rows": rows_view(&list) }))
    }

    fn menu(&self, filter_id: FilterId, row: usize, pick: Option<usize>) -> Result<Value> {
        let list = self.open_list(filter_id)?;
        list.borrow().row_right_action_clicked(row)?;
        let entries = self.console.take_menu().context("Menu was not shown")?;
        let labels: Vec<&str> = entries.iter().map(|entry| entry.label).collect();

        if let Some(pick) = pick {
            let Some(entry) = entries.get(pick) else {
                bail!("Menu has {} entries, no entry {}", entries.len(), pick);
            };
            debug!(label = entry.label, "Picking menu entry");
            list.borrow().perform(entry);
        }
        Ok(json!({ "entries": labels }))
    }

    fn chats(&self, filter_id: FilterId, row: usize) -> Result<Value> {
        let list = self.open_list(filter_id)?;
        let data = list
            .borrow()
            .rows()
            .row_at(row)
            .ok_or(LinkError::RowOutOfRange(row))?
            .data()
            .clone();
        let session = self.runtime.session();
        let chats: Vec<Value> = link_chats(&session, &data)
            .into_iter()
            .map(|chat| json!({ "id": chat.id, "name": chat.name }))
            .collect();
        Ok(json!({ "url": data.url, "chats": chats }))
    }

    /// Create the list for a filter and wait for its first server push.
    fn open_list(&self, filter_id: FilterId) -> Result<Rc<RefCell<LinkListController>>> {
        if self.runtime.session().filter(filter_id).is_none() {
            return Err(LinkError::UnknownFilter(filter_id).into());
        }
        let list = self.runtime.controller(self.console.clone(), filter_id)?;
        if self.runtime.wait_for_changes(SETTLE_TIMEOUT) == 0 {
            bail!("Timed out waiting for the links of filter {}", filter_id);
        }
        Ok(list)
    }

    /// Drain the runtime until every dispatched request has completed.
    fn settle(&self) -> Result<()> {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        while self.runtime.pending_requests() > 0 {
            let now = Instant::now();
            if now >= deadline {
                bail!(
                    "Timed out with {} link requests pending",
                    self.runtime.pending_requests()
                );
            }
            self.runtime.wait_for_changes(deadline - now);
        }
        Ok(())
    }
}

fn rows_view(list: &Rc<RefCell<LinkListController>>) -> Vec<RowView> {
    list.borrow()
        .rows()
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| RowView {
            index,
            id: format!("{:016x}", row.id()),
            name: row.name().to_string(),
            status: row.status().to_string(),
            url: row.data().url.clone(),
            title: row.data().title.clone(),
            chats: row.data().chats.clone(),
        })
        .collect()
}

/// Where the CLI looks for a config file when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("filterlink")
        .join("config.json")
}

/// Load the given config file, else the default one if present, else the
/// built-in defaults.
pub fn load_core_config(path: Option<&Path>) -> Result<CoreConfig> {
    if let Some(path) = path {
        return CoreConfig::load(path);
    }
    let default_path = default_config_path();
    if default_path.exists() {
        return CoreConfig::load(&default_path);
    }
    Ok(CoreConfig::default())
}
