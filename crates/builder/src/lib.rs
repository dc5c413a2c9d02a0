//! Editing operations, conditional-logic evaluation and persistence for
//! Portico form definitions.
//!
//! All operations take the form and the logic store explicitly; nothing reads
//! ambient state. [`session::BuilderSession`] bundles both for hosts that want
//! a single editing context.

pub mod config;
pub mod error;
pub mod form_model;
pub mod logging;
pub mod logic_engine;
pub mod persistence;
pub mod serialization;
pub mod session;
pub mod storage;
pub mod templates;
pub mod validation;

pub use error::{BuilderError, BuilderResult};
pub use form_model::{FieldOutcome, FieldRect, InsertPosition};
pub use logic_engine::{evaluate, evaluate_all, LogicStore, ValueLookup};
pub use persistence::Repository;
pub use session::BuilderSession;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
