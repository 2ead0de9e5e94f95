//! Form controller for the kind selector, input form and record table.
//!
//! # Responsibility
//! - Track the selected entity kind and its form and rows.
//! - Insert submitted forms and delete rows through the record store.
//! - Refresh form and rows after every mutation.
//!
//! # Invariants
//! - Switching kinds discards unsaved input.
//! - Delete failures are logged and swallowed; all others propagate.

use crate::form::descriptor::RecordDescriptor;
use crate::form::state::{Form, FormError};
use crate::model::document::Document;
use crate::model::entity::{EntityKind, RecordId};
use crate::repo::record_store::{RecordStore, RepoError, RepoResult};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug)]
pub enum ControllerError {
    Repo(RepoError),
    Form(FormError),
    UnknownCollection(String),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Form(err) => write!(f, "{err}"),
            Self::UnknownCollection(name) => write!(f, "no entity kind is stored in `{name}`"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Form(err) => Some(err),
            Self::UnknownCollection(_) => None,
        }
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<FormError> for ControllerError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

/// Selected kind, its input form and its listed rows.
pub struct FormController<S: RecordStore> {
    store: S,
    selected: EntityKind,
    form: Form,
    rows: Vec<Document>,
}

impl<S: RecordStore> FormController<S> {
    /// Selects the first kind and loads its form and rows.
    pub fn new(store: S) -> RepoResult<Self> {
        let selected = EntityKind::ALL[0];
        let form = Form::build(&store, selected)?;
        let rows = store.list_documents(selected.collection_name())?;
        Ok(Self {
            store,
            selected,
            form,
            rows,
        })
    }

    /// Kinds offered by the selector, in order.
    pub fn kinds(&self) -> &'static [EntityKind] {
        &EntityKind::ALL
    }

    pub fn selected_kind(&self) -> EntityKind {
        self.selected
    }

    pub fn descriptor(&self) -> &'static RecordDescriptor {
        self.form.descriptor()
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Rows of the selected kind as of the last refresh.
    pub fn rows(&self) -> &[Document] {
        &self.rows
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Switches to `kind`, discarding unsaved input, and refreshes.
    pub fn select_kind(&mut self, kind: EntityKind) -> RepoResult<()> {
        debug!(
            "event=kind_select module=service status=ok from={} to={}",
            self.selected, kind
        );
        self.selected = kind;
        self.refresh()
    }

    /// Switches by selector text. Empty text leaves the selection as is.
    pub fn select_collection(&mut self, name: &str) -> ControllerResult<()> {
        if name.is_empty() {
            return Ok(());
        }
        let kind = EntityKind::from_collection_name(name)
            .ok_or_else(|| ControllerError::UnknownCollection(name.to_string()))?;
        self.select_kind(kind)?;
        Ok(())
    }

    /// Rebuilds the form with fresh choice lists and reloads the rows.
    pub fn refresh(&mut self) -> RepoResult<()> {
        let form = Form::build(&self.store, self.selected)?;
        let rows = self.store.list_documents(self.selected.collection_name())?;
        self.form = form;
        self.rows = rows;
        Ok(())
    }

    /// Inserts the current form as a new record and refreshes.
    pub fn submit(&mut self) -> RepoResult<RecordId> {
        let fields = self.form.to_fields();
        let id = self
            .store
            .insert_document(self.selected.collection_name(), &fields)?;
        info!(
            "event=record_insert module=service status=ok collection={} id={id}",
            self.selected
        );
        self.refresh()?;
        Ok(id)
    }

    /// Deletes a row of the selected kind and refreshes.
    ///
    /// Returns `false` when the delete or the refresh failed; the failure is
    /// logged and the view keeps its previous state when the delete itself
    /// failed.
    pub fn delete_row(&mut self, id: RecordId) -> bool {
        let collection = self.selected.collection_name();
        let outcome = self
            .store
            .delete_document(collection, id)
            .and_then(|()| self.refresh());
        match outcome {
            Ok(()) => {
                info!("event=record_delete module=service status=ok collection={collection} id={id}");
                true
            }
            Err(err) => {
                error!(
                    "event=record_delete module=service status=error collection={collection} id={id} error={err}"
                );
                false
            }
        }
    }
}
