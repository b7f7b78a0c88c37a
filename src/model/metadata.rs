use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::inflect::pluralize;
use super::parse::{parse_model, ParsedModel};
use super::property::{PropertyDescriptor, PropertyKind};
use crate::error::{Result, ScaffoldError};

/// Everything the generators need to know about a model class
///
/// Built once per run from the model source and read-only afterwards.
/// `properties` keeps declaration order and holds only members with a
/// supported type; the key always refers to one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    name: String,
    plural_name: String,
    namespace: String,
    properties: Vec<PropertyDescriptor>,
    key_index: usize,
}

impl ModelMetadata {
    /// Read and analyse the model file at `model_path`
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::Configuration`] if the path is blank
    /// - [`ScaffoldError::NotFound`] if the file does not exist
    /// - [`ScaffoldError::MalformedInput`] / [`ScaffoldError::KeyNotFound`] from [`ModelMetadata::from_source`]
    pub fn load(model_path: &str) -> Result<Self> {
        if model_path.trim().is_empty() {
            return Err(ScaffoldError::Configuration(
                "You must enter a model path.".to_string(),
            ));
        }
        let path = Path::new(model_path);
        if !path.is_file() {
            return Err(ScaffoldError::NotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        let metadata = Self::from_source(&source)?;
        debug!(
            model = %metadata.name,
            path = %path.display(),
            properties = metadata.properties.len(),
            key = %metadata.key_name(),
            "model metadata extracted"
        );
        Ok(metadata)
    }

    /// Analyse C# model source text
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::MalformedInput`] if no type or namespace is declared, or a
    ///   member name is declared twice
    /// - [`ScaffoldError::KeyNotFound`] if no key property can be resolved
    pub fn from_source(source: &str) -> Result<Self> {
        Self::from_parsed(parse_model(source)?)
    }

    fn from_parsed(parsed: ParsedModel) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut properties = Vec::new();
        let mut explicit_key = None;

        for member in &parsed.members {
            if !seen.insert(member.name.as_str()) {
                return Err(ScaffoldError::MalformedInput(format!(
                    "member `{}` is declared more than once in `{}`",
                    member.name, parsed.name
                )));
            }
            let Some(property) = PropertyDescriptor::classify(&member.name, &member.type_text)
            else {
                warn!(
                    model = %parsed.name,
                    member = %member.name,
                    ty = %member.type_text,
                    "skipping member with unsupported type"
                );
                continue;
            };
            if explicit_key.is_none() && member.is_key() {
                explicit_key = Some(properties.len());
            }
            properties.push(property);
        }

        let key_index = explicit_key
            .or_else(|| {
                properties
                    .iter()
                    .position(|p| p.name().eq_ignore_ascii_case("id"))
            })
            .ok_or_else(|| ScaffoldError::KeyNotFound {
                model: parsed.name.clone(),
            })?;

        Ok(ModelMetadata {
            plural_name: pluralize(&parsed.name),
            name: parsed.name,
            namespace: parsed.namespace,
            properties,
            key_index,
        })
    }

    /// Model type name, e.g. `Post`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plural model name, e.g. `Posts`
    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    /// Namespace the model is declared in
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Classified properties in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Look up a property by exact name
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// The key property
    pub fn key(&self) -> &PropertyDescriptor {
        &self.properties[self.key_index]
    }

    /// Name of the key property
    pub fn key_name(&self) -> &str {
        self.key().name()
    }

    /// Declared type of the key property
    pub fn key_type(&self) -> &str {
        self.key().declared_type()
    }

    /// Properties other than the key
    pub fn non_key_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        let key = self.key_index;
        self.properties
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != key)
            .map(|(_, p)| p)
    }

    /// User-editable properties: everything except the key and auto timestamps
    pub fn filled_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.non_key_properties().filter(|p| !p.is_auto_timestamp())
    }

    /// All string-kind properties, key included
    pub fn string_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties
            .iter()
            .filter(|p| p.kind() == PropertyKind::String)
    }

    /// String-kind filled properties
    pub fn filled_string_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.filled_properties()
            .filter(|p| p.kind() == PropertyKind::String)
    }

    /// True when search methods should be generated
    pub fn has_string_property(&self) -> bool {
        self.string_properties().next().is_some()
    }

    /// True when the model has an auto-stamped `CreatedAt`
    pub fn has_created_at(&self) -> bool {
        self.property("CreatedAt")
            .is_some_and(PropertyDescriptor::is_auto_timestamp)
    }

    /// True when the model has an auto-stamped `UpdatedAt`
    pub fn has_updated_at(&self) -> bool {
        self.property("UpdatedAt")
            .is_some_and(PropertyDescriptor::is_auto_timestamp)
    }
}
