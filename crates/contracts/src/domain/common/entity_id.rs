use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for opaque string identifiers of forms and fields
pub trait EntityId:
    Clone + PartialEq + Eq + Hash + Ord + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Convert the id to its wire string
    fn as_string(&self) -> String;

    /// Build an id from its wire string
    fn from_string(s: &str) -> Result<Self, String>;
}
