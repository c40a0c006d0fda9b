pub mod backend;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod menu;
pub mod models;
pub mod presentation;
pub mod rename;
pub mod runtime;
pub mod service;
pub mod session;
pub mod sharing;
pub mod store;
pub mod tracing_setup;
pub mod worker;

pub use backend::{BackendOp, LinkBackend, MemoryBackend};
pub use config::{CoreConfig, MAX_LINK_TITLE_LENGTH};
pub use controller::LinkListController;
pub use editor::LinkEditor;
pub use error::LinkError;
pub use presentation::Presentation;
pub use rename::RenameForm;
pub use runtime::LinkRuntime;
pub use service::{RemoteError, RemoteLinkService};
pub use session::Session;
