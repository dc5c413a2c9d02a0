//! Common types shared by forms and logic rules

pub mod entity_id;
pub mod ids;

// Re-exports
pub use entity_id::EntityId;
pub use ids::{FieldId, FormId};
