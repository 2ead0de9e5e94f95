//! Use-case services driving the record store.
//!
//! # Responsibility
//! - Keep the front-end free of storage and form-building details.

pub mod form_controller;
