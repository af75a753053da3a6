//! Normalizes JSON:API response documents into a flat store of resources, indexed by type and
//! then by id, plus the ordered list of the primary resources.
//!
//! ```
//! use serde_json::json;
//!
//! let normalized = jsonapi_normalizer::normalize(&json!({
//!     "data": { "type": "blog-posts", "id": "1", "attributes": { "created-at": "x" } }
//! }))
//! .unwrap()
//! .into_data()
//! .unwrap();
//!
//! let post = normalized.resources.get("blogPosts", "1").unwrap();
//! assert_eq!(post.ty, "blog-posts");
//! assert_eq!(post.attributes["createdAt"], "x");
//! ```

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use crate::error::NormalizeError;
use crate::model::normalized::NormalizedResponse;
use crate::normalizer::Normalizer;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, NormalizeError>;

pub mod case;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod settings;

/// Normalizes `document` with camel cased keys
pub fn normalize(document: &Value) -> Result<NormalizedResponse> {
    Normalizer::new().normalize_value(document)
}

/// Parses and normalizes `document` with camel cased keys
pub fn normalize_str(document: &str) -> Result<NormalizedResponse> {
    Normalizer::new().normalize_str(document)
}
