//! Entity kinds and the identifier-bearing record contract.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Store-generated identifier of a persisted record.
pub type RecordId = Uuid;

/// Document key holding the record identifier.
pub const ID_KEY: &str = "_id";

/// One of the five record categories kept by the ticket office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Station,
    Post,
    Ticket,
    Train,
    Route,
}

impl EntityKind {
    /// Selector order; also the bootstrap order of collections.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Station,
        EntityKind::Post,
        EntityKind::Ticket,
        EntityKind::Train,
        EntityKind::Route,
    ];

    /// Name of the collection storing this kind.
    ///
    /// Routes live in `Paths`, matching existing databases.
    pub fn collection_name(self) -> &'static str {
        match self {
            Self::Station => "Stations",
            Self::Post => "Posts",
            Self::Ticket => "Tickets",
            Self::Train => "Trains",
            Self::Route => "Paths",
        }
    }

    /// Resolves a collection name back to its kind. Case-sensitive.
    pub fn from_collection_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection_name() == name)
    }

    /// Singular display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Station => "Station",
            Self::Post => "Post",
            Self::Ticket => "Ticket",
            Self::Train => "Train",
            Self::Route => "Route",
        }
    }

    /// All collection names in selector order.
    pub fn collection_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.collection_name()).collect()
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_name())
    }
}

/// A typed record of one entity kind.
///
/// Implementors serialize their identifier under [`ID_KEY`] and their
/// remaining fields under the collection's document keys.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> RecordId;
}
