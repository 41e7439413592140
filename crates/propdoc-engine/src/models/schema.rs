//! Declarative schema descriptions.
//!
//! Provider schemas are normally walked by an external builder; this TOML form
//! lets the CLI and tests describe the same shape by hand:
//!
//! ```toml
//! resource = "azurerm_example"
//!
//! [[field]]
//! name = "identity"
//! optional = true
//!
//! [[field.field]]
//! name = "type"
//! required = true
//! ```

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::property::{BlockBody, Property, RequirementStatus};
use super::tree::PropertyTree;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse schema description: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SchemaDescription {
    #[serde(default)]
    pub resource: String,
    #[serde(default, rename = "field")]
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub force_new: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "field")]
    pub fields: Vec<SchemaField>,
}

impl SchemaDescription {
    pub fn from_toml_str(input: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(input)?)
    }

    pub fn into_tree(self) -> PropertyTree {
        fields_to_tree(self.fields, "")
    }
}

impl SchemaField {
    fn requirement(&self) -> RequirementStatus {
        let mut status = RequirementStatus::DEFAULT;
        if self.required {
            status |= RequirementStatus::REQUIRED;
        }
        if self.optional {
            status |= RequirementStatus::OPTIONAL;
        }
        if self.computed {
            status |= RequirementStatus::COMPUTED;
        }
        status
    }

    fn into_property(self, parent: &str) -> Property {
        let path = if parent.is_empty() {
            self.name.clone()
        } else {
            format!("{parent}.{}", self.name)
        };
        let requirement = self.requirement();
        let mut property = Property {
            requirement,
            force_new: self.force_new,
            deprecated: self.deprecated,
            description: self.description,
            ..Property::new(self.name)
        };
        if !self.fields.is_empty() {
            property.block = true;
            property.block_type_name = property.name.clone();
            property.nested = Some(BlockBody::Defined(Arc::new(fields_to_tree(
                self.fields,
                &path,
            ))));
        }
        property.path = path;
        property
    }
}

fn fields_to_tree(fields: Vec<SchemaField>, parent: &str) -> PropertyTree {
    fields
        .into_iter()
        .map(|field| field.into_property(parent))
        .collect()
}
