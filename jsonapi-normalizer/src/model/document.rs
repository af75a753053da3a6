use crate::error::NormalizeError;
use crate::model::{present, Attributes, Errors, Id, Meta, Relationships};
use crate::Result;
use core::fmt;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::convert::TryFrom;

/// JSON:API resource object, as found in `data` and `included`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub ty: String,
    pub id: Id,
    #[serde(default)]
    pub attributes: Option<Attributes>,
    #[serde(default)]
    pub relationships: Option<Relationships>,
    #[serde(default, deserialize_with = "present")]
    pub meta: Option<Meta>,
    #[serde(default, deserialize_with = "present")]
    pub links: Option<Value>,
}

/// The primary `data` member of a document
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryData {
    /// `data` is `null` or absent
    Null,
    Single(Box<ResourceObject>),
    Multiple(Vec<ResourceObject>),
}

impl Default for PrimaryData {
    fn default() -> Self { PrimaryData::Null }
}

impl PrimaryData {
    /// Coerces the primary data into a list
    pub fn resources(self) -> Vec<ResourceObject> {
        match self {
            PrimaryData::Null => Default::default(),
            PrimaryData::Single(res) => vec![*res],
            PrimaryData::Multiple(vec) => vec,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimaryData::Null => 0,
            PrimaryData::Single(_) => 1,
            PrimaryData::Multiple(vec) => vec.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// A response document, either an error document or a data document
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseDocument {
    Errors(Errors),
    Data { data: PrimaryData, included: Vec<ResourceObject> },
}

impl Default for ResponseDocument {
    fn default() -> Self {
        ResponseDocument::Data { data: Default::default(), included: Default::default() }
    }
}

/// Truthiness of a JSON value, as a JavaScript client sees it:
/// `null`, `false`, `0` and `""` are falsy, everything else (empty arrays and objects included) is truthy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_resource(member: &'static str, index: usize, value: Value) -> Result<ResourceObject> {
    serde_json::from_value(value)
        .map_err(|source| NormalizeError::InvalidResource { member, index, source })
}

fn parse_resources(member: &'static str, items: Vec<Value>) -> Result<Vec<ResourceObject>> {
    items.into_iter().enumerate().map(|(i, v)| parse_resource(member, i, v)).collect()
}

impl ResponseDocument {
    /// Takes the document apart without copying it
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut map) => {
                Self::classify(map.remove("errors"), map.remove("data"), map.remove("included"))
            },
            other => Err(NormalizeError::InvalidInput(kind_of(&other))),
        }
    }

    /// A document is an error document iff its `errors` member is truthy, in which case
    /// `data` and `included` are never looked at
    fn classify(
        errors: Option<Value>, data: Option<Value>, included: Option<Value>,
    ) -> Result<Self> {
        if let Some(errors) = errors.filter(is_truthy) {
            return match errors {
                Value::Array(errors) => Ok(ResponseDocument::Errors(errors)),
                _ => Err(NormalizeError::InvalidMember {
                    member: "errors",
                    expected: "an array of error objects",
                }),
            };
        }

        let data = match data {
            None | Some(Value::Null) => PrimaryData::Null,
            Some(Value::Array(items)) => PrimaryData::Multiple(parse_resources("data", items)?),
            Some(item @ Value::Object(_)) => {
                PrimaryData::Single(Box::new(parse_resource("data", 0, item)?))
            },
            Some(_) => {
                return Err(NormalizeError::InvalidMember {
                    member: "data",
                    expected: "a resource object, an array of resource objects or null",
                });
            },
        };

        let included = match included {
            None | Some(Value::Null) => Default::default(),
            Some(Value::Array(items)) => parse_resources("included", items)?,
            Some(_) => {
                return Err(NormalizeError::InvalidMember {
                    member: "included",
                    expected: "an array of resource objects",
                });
            },
        };

        Ok(ResponseDocument::Data { data, included })
    }

    pub fn is_error(&self) -> bool {
        match self {
            ResponseDocument::Errors(_) => true,
            ResponseDocument::Data { .. } => false,
        }
    }
}

impl TryFrom<&Value> for ResponseDocument {
    type Error = NormalizeError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => {
                let errors = map.get("errors").filter(|e| is_truthy(e)).cloned();
                if errors.is_some() {
                    Self::classify(errors, None, None)
                } else {
                    Self::classify(None, map.get("data").cloned(), map.get("included").cloned())
                }
            },
            other => Err(NormalizeError::InvalidInput(kind_of(other))),
        }
    }
}

struct ResponseDocumentVisitor;

impl<'de> Visitor<'de> for ResponseDocumentVisitor {
    type Value = ResponseDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a JSON Object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut data = None;
        let mut included = None;
        let mut errors = None;

        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            match key.as_str() {
                "data" if data.is_none() => data = Some(value),
                "data" => return Err(serde::de::Error::duplicate_field("data")),
                "included" if included.is_none() => included = Some(value),
                "included" => return Err(serde::de::Error::duplicate_field("included")),
                "errors" if errors.is_none() => errors = Some(value),
                "errors" => return Err(serde::de::Error::duplicate_field("errors")),
                _ => {},
            }
        }

        ResponseDocument::classify(errors, data, included).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ResponseDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResponseDocumentVisitor)
    }
}
