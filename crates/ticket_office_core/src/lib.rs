//! Core of the ticket office record keeper: storage, model, forms.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use form::descriptor::{
    descriptor, parse_integer_or_zero, FieldKind, FieldSpec, RecordDescriptor,
};
pub use form::state::{FieldInput, Form, FormError, FormField};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, Fields};
pub use model::entity::{EntityKind, Record, RecordId, ID_KEY};
pub use model::records::{Post, Route, Station, Ticket, Train};
pub use repo::record_store::{RecordStore, RepoError, RepoResult, SqliteRecordStore};
pub use service::form_controller::{ControllerError, ControllerResult, FormController};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
