//! Static record descriptor table.

use crate::model::document::Fields;
use crate::model::entity::EntityKind;
use serde_json::Value;

/// Input behavior of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, stored verbatim.
    Text,
    /// Integer text; parse failure stores `0`.
    Integer,
    /// Single choice among `source_field` values of the `source` collection.
    Choice {
        source: EntityKind,
        source_field: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Document key the value is stored under.
    pub key: &'static str,
    /// Caption shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Form layout and record builder for one entity kind.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordDescriptor {
    pub kind: EntityKind,
    pub fields: &'static [FieldSpec],
}

const fn text(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Text,
    }
}

const fn integer(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Integer,
    }
}

const fn choice(
    key: &'static str,
    label: &'static str,
    source: EntityKind,
    source_field: &'static str,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Choice {
            source,
            source_field,
        },
    }
}

static STATION: RecordDescriptor = RecordDescriptor {
    kind: EntityKind::Station,
    fields: &[
        text("Name", "Name"),
        integer("Railways", "Railway count"),
        integer("Staff", "Staff count"),
    ],
};

static POST: RecordDescriptor = RecordDescriptor {
    kind: EntityKind::Post,
    fields: &[
        text("Cashier", "Cashier"),
        choice("Station", "Station", EntityKind::Station, "Name"),
    ],
};

static TICKET: RecordDescriptor = RecordDescriptor {
    kind: EntityKind::Ticket,
    fields: &[
        choice("Cashier", "Cashier", EntityKind::Post, "Cashier"),
        choice("From", "From", EntityKind::Station, "Name"),
        choice("To", "To", EntityKind::Station, "Name"),
    ],
};

static TRAIN: RecordDescriptor = RecordDescriptor {
    kind: EntityKind::Train,
    fields: &[
        text("Driver", "Driver"),
        integer("Length", "Length"),
        choice("PathCode", "Path", EntityKind::Route, "Code"),
    ],
};

static ROUTE: RecordDescriptor = RecordDescriptor {
    kind: EntityKind::Route,
    fields: &[text("Code", "Code"), text("Path", "Path")],
};

/// Returns the descriptor of `kind`.
pub fn descriptor(kind: EntityKind) -> &'static RecordDescriptor {
    match kind {
        EntityKind::Station => &STATION,
        EntityKind::Post => &POST,
        EntityKind::Ticket => &TICKET,
        EntityKind::Train => &TRAIN,
        EntityKind::Route => &ROUTE,
    }
}

impl RecordDescriptor {
    /// Document keys in declared order, for table columns.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().map(|field| field.key)
    }

    /// Builds document fields from positional raw values.
    ///
    /// Missing trailing values are treated as empty input; extra values are
    /// ignored.
    pub fn build<S: AsRef<str>>(&self, values: &[S]) -> Fields {
        let mut fields = Fields::new();
        for (index, spec) in self.fields.iter().enumerate() {
            let raw = values.get(index).map_or("", |value| value.as_ref());
            let value = match spec.kind {
                FieldKind::Integer => Value::from(parse_integer_or_zero(raw)),
                FieldKind::Text | FieldKind::Choice { .. } => Value::String(raw.to_string()),
            };
            fields.insert(spec.key.to_string(), value);
        }
        fields
    }
}

/// Parses a 32-bit integer, surrounding whitespace allowed. Anything else is `0`.
pub fn parse_integer_or_zero(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}
