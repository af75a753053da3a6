use crate::case::{convert_keys, deep_convert_keys, Casing, KeyCase};
use crate::model::document::{ResourceObject, ResponseDocument};
use crate::model::normalized::{
    NormalizedData, NormalizedErrors, NormalizedResponse, ResourceRecord, ResourceRef, ResourceStore,
};
use crate::model::Relationships;
use crate::settings::NormalizeSettings;
use crate::Result;
use serde_json::{Map, Value};
use std::convert::TryFrom;

/// Flattens response documents into a [`NormalizedResponse`].
///
/// Every call builds a fresh result, nothing is shared between two calls.
#[derive(Debug, Clone)]
pub struct Normalizer<C = KeyCase> {
    casing: C,
    deep_attribute_keys: bool,
}

impl Default for Normalizer {
    fn default() -> Self { Self::with_casing(KeyCase::default()) }
}

impl Normalizer {
    pub fn new() -> Self { Default::default() }

    pub fn from_settings(settings: &NormalizeSettings) -> Self {
        Self::with_casing(settings.key_case).deep_attribute_keys(settings.deep_attribute_keys)
    }
}

impl<C: Casing> Normalizer<C> {
    pub fn with_casing(casing: C) -> Self { Self { casing, deep_attribute_keys: false } }

    pub fn deep_attribute_keys(mut self, enabled: bool) -> Self {
        self.deep_attribute_keys = enabled;
        self
    }

    pub fn normalize(&self, document: ResponseDocument) -> NormalizedResponse {
        match document {
            ResponseDocument::Errors(errors) => {
                debug!("Error document with {} errors, passing them through", errors.len());
                NormalizedResponse::Errors(NormalizedErrors { errors })
            },
            ResponseDocument::Data { data, included } => {
                let mut builder = StoreBuilder::new(self);
                for resource in data.resources() {
                    builder.add_result(&resource);
                    builder.add_resource(resource);
                }
                for resource in included {
                    builder.add_resource(resource);
                }
                NormalizedResponse::Data(builder.finish())
            },
        }
    }

    pub fn normalize_value(&self, document: &Value) -> Result<NormalizedResponse> {
        Ok(self.normalize(ResponseDocument::try_from(document)?))
    }

    /// Only malformed JSON text is reported as `NormalizeError::Json`, shape errors keep their variant
    pub fn normalize_str(&self, document: &str) -> Result<NormalizedResponse> {
        let document = serde_json::from_str::<Value>(document)?;
        Ok(self.normalize(ResponseDocument::from_value(document)?))
    }

    /// Resolves `reference` to its record in `data`, casing its type the way this normalizer does
    pub fn lookup<'d>(
        &self, data: &'d NormalizedData, reference: &ResourceRef,
    ) -> Option<&'d ResourceRecord> {
        data.resources.find(reference, &self.casing)
    }

    fn attributes(&self, attributes: Option<Map<String, Value>>) -> Map<String, Value> {
        let attributes = convert_keys(attributes.unwrap_or_default(), &self.casing);
        if self.deep_attribute_keys {
            attributes.into_iter().map(|(k, v)| (k, deep_convert_keys(v, &self.casing))).collect()
        } else {
            attributes
        }
    }
}

/// Cases every relationship name, the descriptors themselves are kept as they are
pub fn extract_relationships<C: Casing + ?Sized>(
    relationships: Option<Relationships>, casing: &C,
) -> Option<Relationships> {
    relationships.map(|relationships| convert_keys(relationships, casing))
}

/// Owns the output for the duration of one `normalize` call
struct StoreBuilder<'a, C> {
    normalizer: &'a Normalizer<C>,
    result: Vec<ResourceRef>,
    resources: ResourceStore,
}

impl<'a, C: Casing> StoreBuilder<'a, C> {
    fn new(normalizer: &'a Normalizer<C>) -> Self {
        Self { normalizer, result: Default::default(), resources: Default::default() }
    }

    fn add_result(&mut self, resource: &ResourceObject) {
        self.result.push(ResourceRef::new(&resource.ty, &resource.id));
    }

    fn add_resource(&mut self, resource: ResourceObject) {
        let ResourceObject { ty, id, attributes, relationships, meta, links } = resource;
        let type_key = self.normalizer.casing.convert(&ty);
        let record = ResourceRecord {
            attributes: self.normalizer.attributes(attributes),
            relationships: extract_relationships(relationships, &self.normalizer.casing)
                .unwrap_or_default(),
            id,
            ty,
            meta,
            links,
        };

        trace!("Indexing `{}` resource `{}` under `{}`", record.ty, record.id, type_key);
        if let Some(previous) = self.resources.insert(type_key, record) {
            trace!("Replaced the earlier `{}` resource `{}`", previous.ty, previous.id);
        }
    }

    fn finish(self) -> NormalizedData {
        debug!(
            "Normalized {} primary resources into {} indexed resources of {} types",
            self.result.len(),
            self.resources.len(),
            self.resources.types().count()
        );
        NormalizedData { result: self.result, resources: self.resources }
    }
}
