//! Untyped document shape shared by every collection.

use crate::model::entity::{RecordId, ID_KEY};
use serde_json::{Map, Value};

/// Field map of a document, excluding its identifier.
pub type Fields = Map<String, Value>;

/// One stored document: identifier plus untyped key/value fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: RecordId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the string value under `key`, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Returns the integer value under `key`, if it fits `i64`.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }

    /// Renders the value under `key` for display; missing keys render empty.
    pub fn display_value(&self, key: &str) -> String {
        if key == ID_KEY {
            return self.id.to_string();
        }
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Full JSON object including the identifier under [`ID_KEY`].
    pub fn to_json(&self) -> Value {
        let mut object = self.fields.clone();
        object.insert(ID_KEY.to_string(), Value::String(self.id.to_string()));
        Value::Object(object)
    }
}
