//! Live form state for the selected entity kind.

use crate::form::descriptor::{descriptor, FieldKind, FieldSpec, RecordDescriptor};
use crate::model::document::Fields;
use crate::model::entity::EntityKind;
use crate::repo::record_store::{RecordStore, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Misuse of a form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    FieldOutOfRange { index: usize, len: usize },
    NotEditableText { key: &'static str },
    NotAChoice { key: &'static str },
    OptionOutOfRange { key: &'static str, index: usize, len: usize },
    UnknownOption { key: &'static str, value: String },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldOutOfRange { index, len } => {
                write!(f, "field #{index} does not exist; form has {len} fields")
            }
            Self::NotEditableText { key } => write!(f, "field `{key}` is a selector, not text"),
            Self::NotAChoice { key } => write!(f, "field `{key}` is not a selector"),
            Self::OptionOutOfRange { key, index, len } => write!(
                f,
                "option #{index} does not exist for `{key}`; {len} options available"
            ),
            Self::UnknownOption { key, value } => {
                write!(f, "`{value}` is not an option of `{key}`")
            }
        }
    }
}

impl Error for FormError {}

/// Current input of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Raw text of a text or integer field.
    Text(String),
    /// Choice list snapshot and the selected option, if any.
    Choice {
        options: Vec<String>,
        selected: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub spec: &'static FieldSpec,
    pub input: FieldInput,
}

impl FormField {
    /// Raw submitted value; an unselected choice yields an empty string.
    pub fn value(&self) -> &str {
        match &self.input {
            FieldInput::Text(text) => text.as_str(),
            FieldInput::Choice {
                options,
                selected: Some(index),
            } => options.get(*index).map_or("", String::as_str),
            FieldInput::Choice { selected: None, .. } => "",
        }
    }

    /// Choice options, empty for text fields.
    pub fn options(&self) -> &[String] {
        match &self.input {
            FieldInput::Choice { options, .. } => options.as_slice(),
            FieldInput::Text(_) => &[],
        }
    }
}

/// Input form of one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    descriptor: &'static RecordDescriptor,
    fields: Vec<FormField>,
}

impl Form {
    /// Builds an empty form for `kind`, loading every choice list fresh.
    ///
    /// A choice over an empty collection has no options and no placeholder.
    pub fn build<S: RecordStore>(store: &S, kind: EntityKind) -> RepoResult<Self> {
        let descriptor = descriptor(kind);
        let mut fields = Vec::with_capacity(descriptor.fields.len());
        for spec in descriptor.fields {
            let input = match spec.kind {
                FieldKind::Text | FieldKind::Integer => FieldInput::Text(String::new()),
                FieldKind::Choice {
                    source,
                    source_field,
                } => FieldInput::Choice {
                    options: store.project_field(source, source_field)?,
                    selected: None,
                },
            };
            fields.push(FormField { spec, input });
        }
        Ok(Self { descriptor, fields })
    }

    pub fn kind(&self) -> EntityKind {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &'static RecordDescriptor {
        self.descriptor
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Replaces the text of a text or integer field.
    pub fn set_text(&mut self, index: usize, value: impl Into<String>) -> Result<(), FormError> {
        let field = self.field_mut(index)?;
        match &mut field.input {
            FieldInput::Text(text) => {
                *text = value.into();
                Ok(())
            }
            FieldInput::Choice { .. } => Err(FormError::NotEditableText {
                key: field.spec.key,
            }),
        }
    }

    /// Selects a choice option by position.
    pub fn select_option(&mut self, index: usize, option: usize) -> Result<(), FormError> {
        let field = self.field_mut(index)?;
        let key = field.spec.key;
        match &mut field.input {
            FieldInput::Choice { options, selected } => {
                if option >= options.len() {
                    return Err(FormError::OptionOutOfRange {
                        key,
                        index: option,
                        len: options.len(),
                    });
                }
                *selected = Some(option);
                Ok(())
            }
            FieldInput::Text(_) => Err(FormError::NotAChoice { key }),
        }
    }

    /// Selects the first option equal to `value`.
    pub fn select_value(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        let field = self.field_mut(index)?;
        let key = field.spec.key;
        let position = match &field.input {
            FieldInput::Choice { options, .. } => options.iter().position(|option| option == value),
            FieldInput::Text(_) => return Err(FormError::NotAChoice { key }),
        };
        match position {
            Some(option) => self.select_option(index, option),
            None => Err(FormError::UnknownOption {
                key,
                value: value.to_string(),
            }),
        }
    }

    /// Returns a choice field to the unselected state.
    pub fn clear_selection(&mut self, index: usize) -> Result<(), FormError> {
        let field = self.field_mut(index)?;
        match &mut field.input {
            FieldInput::Choice { selected, .. } => {
                *selected = None;
                Ok(())
            }
            FieldInput::Text(_) => Err(FormError::NotAChoice {
                key: field.spec.key,
            }),
        }
    }

    /// Raw values in declared field order.
    pub fn values(&self) -> Vec<&str> {
        self.fields.iter().map(FormField::value).collect()
    }

    /// Runs the descriptor builder over the current values.
    pub fn to_fields(&self) -> Fields {
        self.descriptor.build(self.values().as_slice())
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut FormField, FormError> {
        let len = self.fields.len();
        self.fields
            .get_mut(index)
            .ok_or(FormError::FieldOutOfRange { index, len })
    }
}
