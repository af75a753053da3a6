use crate::case::Casing;
use crate::model::{present, Attributes, Errors, Id, Meta, Relationships};
use serde_json::Value;
use std::collections::HashMap;

/// Identifies a resource without its body
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub ty: String,
    pub id: Id,
}

impl ResourceRef {
    pub fn new(ty: impl ToString, id: impl ToString) -> Self {
        Self { ty: ty.to_string(), id: id.to_string() }
    }
}

/// The normalized form of one resource.
/// `ty` keeps the type as it was sent, only the store bucket key is cased.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub id: Id,
    #[serde(rename = "type")]
    pub ty: String,
    pub attributes: Attributes,
    pub relationships: Relationships,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl ResourceRecord {
    pub fn to_ref(&self) -> ResourceRef { ResourceRef::new(&self.ty, &self.id) }

    /// Resource identifiers named by the `data` of relationship `name`
    ///
    /// Returns:
    ///   1. `None`: no such relationship, or it has no `data` member (links-only relationships)
    ///   2. `Some(<empty>)`: an empty to-one (`null`) or to-many (`[]`) relationship
    ///   3. `Some(<refs>)`: every well-formed identifier, in order
    pub fn related(&self, name: &str) -> Option<Vec<ResourceRef>> {
        let data = self.relationships.get(name)?.get("data")?;
        let refs: Vec<ResourceRef> = match data {
            Value::Array(items) => items.iter().filter_map(identifier).collect(),
            item => identifier(item).into_iter().collect(),
        };
        Some(refs)
    }
}

fn identifier(value: &Value) -> Option<ResourceRef> {
    Some(ResourceRef::new(value.get("type")?.as_str()?, value.get("id")?.as_str()?))
}

/// All known resources, by cased type and then by raw id
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ResourceStore(HashMap<String, HashMap<Id, ResourceRecord>>);

impl ResourceStore {
    /// Inserts `record` into the bucket `type_key`, returning the record it replaced
    pub(crate) fn insert(&mut self, type_key: String, record: ResourceRecord) -> Option<ResourceRecord> {
        self.0.entry(type_key).or_default().insert(record.id.clone(), record)
    }

    pub fn get(&self, type_key: &str, id: &str) -> Option<&ResourceRecord> {
        self.0.get(type_key).and_then(|bucket| bucket.get(id))
    }

    pub fn bucket(&self, type_key: &str) -> Option<&HashMap<Id, ResourceRecord>> {
        self.0.get(type_key)
    }

    /// Looks `reference` up in the bucket its raw type cases to.
    /// `casing` must be the one the store was built with.
    pub fn find<C: Casing + ?Sized>(
        &self, reference: &ResourceRef, casing: &C,
    ) -> Option<&ResourceRecord> {
        self.get(&casing.convert(&reference.ty), &reference.id)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    /// Number of records over all the buckets
    pub fn len(&self) -> usize { self.0.values().map(HashMap::len).sum() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceRecord)> {
        self.0
            .iter()
            .flat_map(|(ty, bucket)| bucket.values().map(move |record| (ty.as_str(), record)))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NormalizedData {
    /// The primary resources, in the order of `data`
    pub result: Vec<ResourceRef>,
    pub resources: ResourceStore,
}

impl NormalizedData {
    /// Records of the primary resources, in the order of `result`.
    /// A primary resource overwritten by a later one of the same bucket and id yields the later record.
    pub fn primary<'a, C: Casing + ?Sized>(
        &'a self, casing: &'a C,
    ) -> impl Iterator<Item = &'a ResourceRecord> + 'a {
        self.result.iter().filter_map(move |r| self.resources.find(r, casing))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NormalizedErrors {
    pub errors: Errors,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NormalizedResponse {
    Errors(NormalizedErrors),
    Data(NormalizedData),
}

impl NormalizedResponse {
    pub fn is_error(&self) -> bool {
        match self {
            NormalizedResponse::Errors(_) => true,
            NormalizedResponse::Data(_) => false,
        }
    }

    pub fn errors(&self) -> Option<&Errors> {
        match self {
            NormalizedResponse::Errors(errors) => Some(&errors.errors),
            NormalizedResponse::Data(_) => None,
        }
    }

    pub fn into_data(self) -> Result<NormalizedData, Self> {
        if let NormalizedResponse::Data(data) = self {
            Ok(data)
        } else {
            Err(self)
        }
    }

    pub fn into_errors(self) -> Result<Errors, Self> {
        if let NormalizedResponse::Errors(errors) = self {
            Ok(errors.errors)
        } else {
            Err(self)
        }
    }
}
