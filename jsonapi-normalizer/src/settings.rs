use crate::case::KeyCase;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizeSettings {
    /// Casing applied to type bucket keys, attribute keys and relationship names
    pub key_case: KeyCase,
    /// Also case the keys of objects nested inside attribute values
    pub deep_attribute_keys: bool,
}
