//! Descriptor-driven input forms.
//!
//! # Responsibility
//! - Declare, per entity kind, the ordered fields of its input form.
//! - Build forms with choice lists sourced from other collections.
//! - Turn submitted field values into document fields.
//!
//! # Invariants
//! - Field values are read positionally, in declared order.
//! - Integer fields never reject input; unparsable text becomes `0`.

pub mod descriptor;
pub mod state;
