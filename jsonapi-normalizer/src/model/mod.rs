pub mod document;
pub mod normalized;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Meta-data object, can contain any data
pub type Meta = Value;
pub type Id = String;
pub type Attributes = Map<String, Value>;
/// Relationship descriptors by relationship name, the descriptors are never rewritten
pub type Relationships = Map<String, Value>;
/// Error objects, passed through untouched
pub type Errors = Vec<Value>;

/// Keeps an explicit `null` member as `Some(Value::Null)`, only an absent member becomes `None`
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
