//! Record store contracts and the SQLite-backed implementation.
//!
//! # Responsibility
//! - Own the storage connection for the lifetime of the application.
//! - Expose per-collection list/insert/delete over untyped documents, plus
//!   typed helpers for each entity kind.
//!
//! # Invariants
//! - Collections must be bootstrapped before documents can be stored in them.
//! - Identifiers are generated by the store, never by callers.

pub mod record_store;
