//! Shared data model of the Portico form builder.
//!
//! Everything in this crate is plain data: form and field definitions, logic
//! rules and the persisted document records. Operations over these types live
//! in the `portico-builder` crate.

pub mod domain;
pub mod shared;
