//! Ticket office domain model.
//!
//! # Responsibility
//! - Name the five entity kinds and their collections.
//! - Define the typed records and the untyped document shape they share.
//!
//! # Invariants
//! - Every persisted record carries a store-generated `RecordId`.
//! - Cross-entity references are plain strings; nothing enforces them.

pub mod document;
pub mod entity;
pub mod records;
