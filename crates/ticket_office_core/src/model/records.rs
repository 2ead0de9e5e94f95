//! Typed records for each entity kind.

use crate::model::entity::{EntityKind, Record, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Station {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    pub railways: i32,
    pub staff: i32,
}

/// Cashier window at a station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub cashier: String,
    /// Informally a `Station::name`.
    pub station: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticket {
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// Informally a `Post::cashier`.
    pub cashier: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Train {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub driver: String,
    pub length: i32,
    /// Informally a `Route::code`.
    pub path_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub code: String,
    pub path: String,
}

macro_rules! impl_record {
    ($($ty:ty => $kind:expr),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: EntityKind = $kind;

                fn id(&self) -> RecordId {
                    self.id
                }
            }
        )+
    };
}

impl_record! {
    Station => EntityKind::Station,
    Post => EntityKind::Post,
    Ticket => EntityKind::Ticket,
    Train => EntityKind::Train,
    Route => EntityKind::Route,
}
