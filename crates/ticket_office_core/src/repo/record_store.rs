//! Document collections over SQLite.
//!
//! # Invariants
//! - Listing returns documents in insertion order, unfiltered.
//! - Deleting an unknown identifier is a silent no-op.
//! - Read paths reject bodies that are not JSON objects.

use crate::db::DbError;
use crate::model::document::{Document, Fields};
use crate::model::entity::{EntityKind, Record, RecordId, ID_KEY};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static COLLECTION_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid collection name regex"));

pub type RepoResult<T> = Result<T, RepoError>;

/// Record store failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidCollectionName(String),
    UnknownCollection(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidCollectionName(name) => write!(f, "invalid collection name `{name}`"),
            Self::UnknownCollection(name) => write!(f, "collection not found: {name}"),
            Self::InvalidData(message) => write!(f, "invalid stored document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Collection-level access to stored documents.
pub trait RecordStore {
    /// Names of every existing collection, sorted.
    fn collection_names(&self) -> RepoResult<Vec<String>>;

    /// Every document of `collection`, in insertion order.
    fn list_documents(&self, collection: &str) -> RepoResult<Vec<Document>>;

    /// Appends a document under a freshly generated identifier.
    fn insert_document(&self, collection: &str, fields: &Fields) -> RepoResult<RecordId>;

    /// Removes the document with `id`, if any.
    fn delete_document(&self, collection: &str, id: RecordId) -> RepoResult<()>;

    /// Lists the collection of `T` decoded into typed records.
    fn list<T: Record>(&self) -> RepoResult<Vec<T>>
    where
        Self: Sized,
    {
        let collection = T::KIND.collection_name();
        self.list_documents(collection)?
            .into_iter()
            .map(|doc| {
                serde_json::from_value(doc.to_json()).map_err(|err| {
                    RepoError::InvalidData(format!(
                        "document {} in {collection} does not decode as {}: {err}",
                        doc.id,
                        T::KIND.label()
                    ))
                })
            })
            .collect()
    }

    /// Inserts a typed record. Its own identifier is ignored.
    fn insert<T: Record>(&self, record: &T) -> RepoResult<RecordId>
    where
        Self: Sized,
    {
        let mut fields = match serde_json::to_value(record) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(RepoError::InvalidData(format!(
                    "{} does not serialize as an object",
                    T::KIND.label()
                )))
            }
            Err(err) => return Err(RepoError::InvalidData(err.to_string())),
        };
        fields.remove(ID_KEY);
        self.insert_document(T::KIND.collection_name(), &fields)
    }

    /// Projects one field of every `kind` document into display strings.
    ///
    /// Documents lacking the field contribute an empty string. Duplicates
    /// and order are kept as stored.
    fn project_field(&self, kind: EntityKind, field: &str) -> RepoResult<Vec<String>> {
        Ok(self
            .list_documents(kind.collection_name())?
            .iter()
            .map(|doc| doc.display_value(field))
            .collect())
    }
}

/// SQLite-backed record store owning its connection.
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Takes ownership of a migrated connection and ensures each named
    /// collection exists, creating the missing ones.
    ///
    /// Idempotent: existing collections and their documents are untouched.
    pub fn bootstrap<S: AsRef<str>>(conn: Connection, collections: &[S]) -> RepoResult<Self> {
        for name in collections {
            validate_collection_name(name.as_ref())?;
        }

        let existing = list_collection_names(&conn)?;
        for name in collections {
            let name: &str = name.as_ref();
            if existing.iter().any(|known| known == name) {
                continue;
            }
            conn.execute(
                "INSERT OR IGNORE INTO collections (name) VALUES (?1);",
                [name],
            )?;
            info!("event=collection_create module=repo status=ok collection={name}");
        }

        Ok(Self { conn })
    }

    /// Shared connection handle, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the owned connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn ensure_collection(&self, collection: &str) -> RepoResult<()> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM collections WHERE name = ?1;",
                [collection],
                |row| row.get(0),
            )
            .optional()?;
        match found {
            Some(_) => Ok(()),
            None => Err(RepoError::UnknownCollection(collection.to_string())),
        }
    }
}

impl RecordStore for SqliteRecordStore {
    fn collection_names(&self) -> RepoResult<Vec<String>> {
        list_collection_names(&self.conn)
    }

    fn list_documents(&self, collection: &str) -> RepoResult<Vec<Document>> {
        self.ensure_collection(collection)?;

        let mut stmt = self.conn.prepare(
            "SELECT uuid, body
             FROM documents
             WHERE collection = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([collection])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get(0)?;
            let body: String = row.get(1)?;
            documents.push(parse_document(collection, &uuid_text, &body)?);
        }
        Ok(documents)
    }

    fn insert_document(&self, collection: &str, fields: &Fields) -> RepoResult<RecordId> {
        self.ensure_collection(collection)?;

        let id = Uuid::new_v4();
        let body = Value::Object(fields.clone()).to_string();
        self.conn.execute(
            "INSERT INTO documents (uuid, collection, body) VALUES (?1, ?2, ?3);",
            params![id.to_string(), collection, body],
        )?;
        debug!("event=record_insert module=repo status=ok collection={collection} id={id}");
        Ok(id)
    }

    fn delete_document(&self, collection: &str, id: RecordId) -> RepoResult<()> {
        self.ensure_collection(collection)?;

        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND uuid = ?2;",
            params![collection, id.to_string()],
        )?;
        debug!(
            "event=record_delete module=repo status=ok collection={collection} id={id} removed={changed}"
        );
        Ok(())
    }
}

fn validate_collection_name(name: &str) -> RepoResult<()> {
    if COLLECTION_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(RepoError::InvalidCollectionName(name.to_string()))
    }
}

fn list_collection_names(conn: &Connection) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM collections ORDER BY name ASC;")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

fn parse_document(collection: &str, uuid_text: &str, body: &str) -> RepoResult<Document> {
    let id = Uuid::parse_str(uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid `{uuid_text}` in {collection}"))
    })?;
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(Document::new(id, fields)),
        Ok(_) => Err(RepoError::InvalidData(format!(
            "document {id} in {collection} is not a JSON object"
        ))),
        Err(err) => Err(RepoError::InvalidData(format!(
            "document {id} in {collection} is not valid JSON: {err}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_document, validate_collection_name, RepoError};

    #[test]
    fn collection_names_must_be_identifiers() {
        assert!(validate_collection_name("Stations").is_ok());
        assert!(validate_collection_name("Night_Trains2").is_ok());
        assert!(matches!(
            validate_collection_name(""),
            Err(RepoError::InvalidCollectionName(_))
        ));
        assert!(matches!(
            validate_collection_name("2Stations"),
            Err(RepoError::InvalidCollectionName(_))
        ));
        assert!(matches!(
            validate_collection_name("Stations; DROP"),
            Err(RepoError::InvalidCollectionName(_))
        ));
    }

    #[test]
    fn parse_document_rejects_non_object_bodies() {
        let id = uuid::Uuid::new_v4().to_string();
        assert!(matches!(
            parse_document("Stations", &id, "[1, 2]"),
            Err(RepoError::InvalidData(_))
        ));
        assert!(matches!(
            parse_document("Stations", "not-a-uuid", "{}"),
            Err(RepoError::InvalidData(_))
        ));
        let doc = parse_document("Stations", &id, r#"{"Name":"Central"}"#).unwrap();
        assert_eq!(doc.get_str("Name"), Some("Central"));
    }
}
