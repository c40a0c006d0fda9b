use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use crate::backend::LinkBackend;
use crate::models::{ChatFilter, ChatId, FilterId, InviteLinkData};
use crate::service::RemoteError;

pub type RequestId = u64;

/// Commands sent from the event loop to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCommand {
    /// Push the current links of a filter.
    Subscribe { filter_id: FilterId },
    Export {
        request_id: RequestId,
        filter_id: FilterId,
        chats: Vec<ChatId>,
    },
    EditChats {
        request_id: RequestId,
        filter_id: FilterId,
        url: String,
        chats: Vec<ChatId>,
    },
    Rename {
        request_id: RequestId,
        filter_id: FilterId,
        url: String,
        title: String,
    },
    Delete {
        request_id: RequestId,
        filter_id: FilterId,
        url: String,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Link(InviteLinkData),
    Deleted,
}

/// Updates sent from the worker back to the event loop.
///
/// For one request the worker sends the data changes it caused before the
/// `Completed` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataChange {
    LinksChanged {
        filter_id: FilterId,
        links: Vec<InviteLinkData>,
    },
    FilterChanged(ChatFilter),
    Completed {
        request_id: RequestId,
        result: Result<Outcome, RemoteError>,
    },
}

pub struct LinkWorker {
    backend: Arc<dyn LinkBackend>,
    data_tx: Sender<DataChange>,
    command_rx: Receiver<LinkCommand>,
    latency: Duration,
}

impl LinkWorker {
    pub fn new(
        backend: Arc<dyn LinkBackend>,
        data_tx: Sender<DataChange>,
        command_rx: Receiver<LinkCommand>,
        latency: Duration,
    ) -> Self {
        Self {
            backend,
            data_tx,
            command_rx,
            latency,
        }
    }

    pub fn run(self) {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(err) => {
                error!(error = %err, "Failed to create link worker runtime");
                return;
            }
        };
        info!("Link worker thread started");

        while let Ok(command) = self.command_rx.recv() {
            if command == LinkCommand::Shutdown {
                break;
            }
            rt.block_on(self.handle_command(command));
        }

        info!("Link worker thread stopped");
    }

    async fn handle_command(&self, command: LinkCommand) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match command {
            LinkCommand::Subscribe { filter_id } => {
                debug!(filter_id, "Worker: subscribing to links");
                self.push_links(filter_id);
            }
            LinkCommand::Export {
                request_id,
                filter_id,
                chats,
            } => {
                let result = self.backend.export(filter_id, &chats).map(|exported| {
                    self.send(DataChange::FilterChanged(exported.filter));
                    self.push_links(filter_id);
                    Outcome::Link(exported.link)
                });
                self.complete(request_id, result);
            }
            LinkCommand::EditChats {
                request_id,
                filter_id,
                url,
                chats,
            } => {
                let result = self.backend.edit_chats(filter_id, &url, &chats).map(|link| {
                    self.push_links(filter_id);
                    Outcome::Link(link)
                });
                self.complete(request_id, result);
            }
            LinkCommand::Rename {
                request_id,
                filter_id,
                url,
                title,
            } => {
                let result = self.backend.rename(filter_id, &url, &title).map(|link| {
                    if link.is_exported() {
                        self.push_links(filter_id);
                    }
                    Outcome::Link(link)
                });
                self.complete(request_id, result);
            }
            LinkCommand::Delete {
                request_id,
                filter_id,
                url,
            } => {
                let result = self.backend.delete(filter_id, &url).map(|()| {
                    self.push_links(filter_id);
                    Outcome::Deleted
                });
                self.complete(request_id, result);
            }
            LinkCommand::Shutdown => {}
        }
    }

    fn push_links(&self, filter_id: FilterId) {
        let links = self.backend.links(filter_id);
        self.send(DataChange::LinksChanged { filter_id, links });
    }

    fn complete(&self, request_id: RequestId, result: Result<Outcome, RemoteError>) {
        if let Err(err) = &result {
            warn!(request_id, error = %err, "Worker: request failed");
        }
        self.send(DataChange::Completed { request_id, result });
    }

    fn send(&self, change: DataChange) {
        if self.data_tx.send(change).is_err() {
            debug!("Worker: event loop gone, dropping data change");
        }
    }
}
