use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::backend::LinkBackend;
use crate::controller::LinkListController;
use crate::error::LinkError;
use crate::models::{ChatId, FilterId, InviteLinkData};
use crate::presentation::Presentation;
use crate::service::{Completion, RemoteError, RemoteLinkService};
use crate::session::Session;
use crate::worker::{DataChange, LinkCommand, LinkWorker, Outcome, RequestId};

#[derive(Clone)]
struct LinkHandle {
    command_tx: Sender<LinkCommand>,
}

impl LinkHandle {
    fn send(&self, command: LinkCommand) -> Result<(), LinkError> {
        self.command_tx
            .send(command)
            .map_err(|_| LinkError::WorkerGone)
    }
}

enum PendingCompletion {
    Link(Completion<InviteLinkData>),
    Deleted(Completion<()>),
}

impl PendingCompletion {
    fn resolve(self, result: Result<Outcome, RemoteError>) {
        match (self, result) {
            (PendingCompletion::Link(done), Ok(Outcome::Link(link))) => done(Ok(link)),
            (PendingCompletion::Deleted(done), Ok(Outcome::Deleted)) => done(Ok(())),
            (PendingCompletion::Link(done), Err(err)) => done(Err(err)),
            (PendingCompletion::Deleted(done), Err(err)) => done(Err(err)),
            (PendingCompletion::Link(done), Ok(Outcome::Deleted)) => {
                done(Err(RemoteError::Rejected {
                    message: "unexpected delete outcome".to_string(),
                }))
            }
            (PendingCompletion::Deleted(done), Ok(Outcome::Link(_))) => {
                done(Err(RemoteError::Rejected {
                    message: "unexpected link outcome".to_string(),
                }))
            }
        }
    }
}

/// Continuations waiting for the worker, keyed by request id.
#[derive(Default)]
struct Completions {
    next_id: Cell<RequestId>,
    pending: RefCell<HashMap<RequestId, PendingCompletion>>,
    // Requests that never reached the worker; failed on the next drain.
    undelivered: RefCell<VecDeque<RequestId>>,
}

impl Completions {
    fn register(&self, completion: PendingCompletion) -> RequestId {
        let request_id = self.next_id.get() + 1;
        self.next_id.set(request_id);
        self.pending.borrow_mut().insert(request_id, completion);
        request_id
    }

    fn take(&self, request_id: RequestId) -> Option<PendingCompletion> {
        self.pending.borrow_mut().remove(&request_id)
    }

    fn len(&self) -> usize {
        self.pending.borrow().len()
    }
}

/// `RemoteLinkService` backed by the worker thread. Completions run from
/// `LinkRuntime::process_pending`.
struct RuntimeService {
    handle: LinkHandle,
    completions: Rc<Completions>,
}

impl RuntimeService {
    fn dispatch(
        &self,
        completion: PendingCompletion,
        command: impl FnOnce(RequestId) -> LinkCommand,
    ) {
        let request_id = self.completions.register(completion);
        let command = command(request_id);
        debug!(request_id, ?command, "dispatching link command");
        if let Err(err) = self.handle.send(command) {
            warn!(request_id, error = %err, "link command not delivered");
            self.completions
                .undelivered
                .borrow_mut()
                .push_back(request_id);
        }
    }
}

impl RemoteLinkService for RuntimeService {
    fn export(&self, filter_id: FilterId, chats: Vec<ChatId>, done: Completion<InviteLinkData>) {
        debug_assert!(!chats.is_empty(), "export requires at least one chat");
        self.dispatch(PendingCompletion::Link(done), |request_id| {
            LinkCommand::Export {
                request_id,
                filter_id,
                chats,
            }
        });
    }

    fn edit_chats(
        &self,
        filter_id: FilterId,
        url: &str,
        chats: Vec<ChatId>,
        done: Completion<InviteLinkData>,
    ) {
        debug_assert!(!url.is_empty(), "edit requires an exported link");
        debug_assert!(!chats.is_empty(), "edit requires at least one chat");
        let url = url.to_string();
        self.dispatch(PendingCompletion::Link(done), |request_id| {
            LinkCommand::EditChats {
                request_id,
                filter_id,
                url,
                chats,
            }
        });
    }

    fn rename(&self, filter_id: FilterId, url: &str, title: &str, done: Completion<InviteLinkData>) {
        let url = url.to_string();
        let title = title.to_string();
        self.dispatch(PendingCompletion::Link(done), |request_id| {
            LinkCommand::Rename {
                request_id,
                filter_id,
                url,
                title,
            }
        });
    }

    fn delete(&self, filter_id: FilterId, url: &str, done: Completion<()>) {
        let url = url.to_string();
        self.dispatch(PendingCompletion::Deleted(done), |request_id| {
            LinkCommand::Delete {
                request_id,
                filter_id,
                url,
            }
        });
    }
}

/// Owns the worker thread and delivers its results on the event loop.
///
/// The owner calls `process_pending` (or `wait_for_changes`) from its loop.
/// Data changes are applied to the session and to every subscribed link list;
/// completions of remote requests run right after.
pub struct LinkRuntime {
    session: Rc<Session>,
    handle: LinkHandle,
    data_rx: Receiver<DataChange>,
    completions: Rc<Completions>,
    service: Rc<RuntimeService>,
    subscribers: RefCell<Vec<(FilterId, Weak<RefCell<LinkListController>>)>>,
    worker_handle: Option<JoinHandle<()>>,
}

impl LinkRuntime {
    pub fn new(session: Session, backend: Arc<dyn LinkBackend>) -> Result<Self> {
        let latency = Duration::from_millis(session.config().simulated_latency_ms);
        let (command_tx, command_rx) = mpsc::channel::<LinkCommand>();
        let (data_tx, data_rx) = mpsc::channel::<DataChange>();

        let worker = LinkWorker::new(backend, data_tx, command_rx, latency);
        let worker_handle = std::thread::Builder::new()
            .name("filterlink-worker".to_string())
            .spawn(move || worker.run())
            .context("Failed to spawn link worker thread")?;

        let handle = LinkHandle { command_tx };
        let completions = Rc::new(Completions::default());
        let service = Rc::new(RuntimeService {
            handle: handle.clone(),
            completions: completions.clone(),
        });

        Ok(Self {
            session: Rc::new(session),
            handle,
            data_rx,
            completions,
            service,
            subscribers: RefCell::new(Vec::new()),
            worker_handle: Some(worker_handle),
        })
    }

    pub fn session(&self) -> Rc<Session> {
        self.session.clone()
    }

    pub fn service(&self) -> Rc<dyn RemoteLinkService> {
        self.service.clone()
    }

    /// Create the link list of a filter and subscribe it to server pushes.
    pub fn controller(
        &self,
        presentation: Rc<dyn Presentation>,
        filter_id: FilterId,
    ) -> Result<Rc<RefCell<LinkListController>>, LinkError> {
        let controller = LinkListController::new(
            self.session.clone(),
            self.service(),
            presentation,
            filter_id,
        );
        self.subscribe(&controller)?;
        Ok(controller)
    }

    pub fn subscribe(&self, controller: &Rc<RefCell<LinkListController>>) -> Result<(), LinkError> {
        let filter_id = controller.borrow().filter_id();
        self.subscribers
            .borrow_mut()
            .push((filter_id, Rc::downgrade(controller)));
        self.handle.send(LinkCommand::Subscribe { filter_id })
    }

    /// Requests dispatched but not yet completed.
    pub fn pending_requests(&self) -> usize {
        self.completions.len()
    }

    /// Apply every change the worker has sent so far. Returns how many were
    /// handled.
    pub fn process_pending(&self) -> usize {
        let mut handled = self.fail_undelivered();
        while let Ok(change) = self.data_rx.try_recv() {
            self.apply_change(change);
            handled += 1;
        }
        handled
    }

    /// Block up to `timeout` for the next change, then drain the rest.
    pub fn wait_for_changes(&self, timeout: Duration) -> usize {
        let mut handled = self.fail_undelivered();
        match self.data_rx.recv_timeout(timeout) {
            Ok(change) => {
                self.apply_change(change);
                handled += 1;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                debug!("link worker disconnected");
            }
        }
        handled + self.process_pending()
    }

    fn fail_undelivered(&self) -> usize {
        let undelivered: Vec<RequestId> =
            self.completions.undelivered.borrow_mut().drain(..).collect();
        let count = undelivered.len();
        for request_id in undelivered {
            if let Some(completion) = self.completions.take(request_id) {
                completion.resolve(Err(RemoteError::Disconnected));
            }
        }
        count
    }

    fn apply_change(&self, change: DataChange) {
        match change {
            DataChange::LinksChanged { filter_id, links } => self.publish_links(filter_id, &links),
            DataChange::FilterChanged(filter) => {
                debug!(filter_id = filter.id, "filter updated");
                self.session.apply_filter(filter);
            }
            DataChange::Completed { request_id, result } => {
                match self.completions.take(request_id) {
                    Some(completion) => completion.resolve(result),
                    None => debug!(request_id, "no continuation for completed request"),
                }
            }
        }
    }

    fn publish_links(&self, filter_id: FilterId, links: &[InviteLinkData]) {
        let targets: Vec<Rc<RefCell<LinkListController>>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|(_, weak)| weak.strong_count() > 0);
            subscribers
                .iter()
                .filter(|(id, _)| *id == filter_id)
                .filter_map(|(_, weak)| weak.upgrade())
                .collect()
        };
        debug!(filter_id, links = links.len(), subscribers = targets.len(), "publishing links");
        for controller in targets {
            LinkListController::apply_links(&controller, links);
        }
    }

    pub fn shutdown(&mut self) {
        let _ = self.handle.send(LinkCommand::Shutdown);
        if let Some(worker_handle) = self.worker_handle.take() {
            let _ = worker_handle.join();
        }
    }
}

impl Drop for LinkRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
