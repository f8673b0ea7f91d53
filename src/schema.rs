// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Terraform schema model.
//!
//! A [`Schema`] is the attribute table of one resource type: a tree of
//! [`Attribute`]s keyed by Terraform attribute name. Besides the Terraform
//! metadata (type, required/optional/computed, validators) every attribute that
//! ends up in the Kubernetes manifest records its manifest field name, which is
//! what lets state values be converted into manifests without a second,
//! hand-maintained model.
//!
//! # Example
//!
//! ```rust
//! use terraform_provider_k8s::schema::{Attribute, AttributeKind, Schema};
//!
//! let schema = Schema::new("Example")
//!     .with_attribute("id", Attribute::computed(AttributeKind::String))
//!     .with_attribute(
//!         "spec",
//!         Attribute::optional(AttributeKind::SingleNested(
//!             [(
//!                 "display_name".to_string(),
//!                 Attribute::optional(AttributeKind::String).with_manifest_name("displayName"),
//!             )]
//!             .into(),
//!         ))
//!         .with_manifest_name("spec"),
//!     );
//!
//! assert_eq!(schema.leaf_paths(), vec!["id", "spec.display_name"]);
//! ```

use crate::validators::Validator;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Attributes keyed by Terraform attribute name.
pub type Attributes = BTreeMap<String, Attribute>;

/// Element type of primitive collections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementType {
    /// UTF-8 string
    String,
    /// Integer or string; a Terraform string in state
    IntOrString,
    /// 64-bit integer
    Int64,
    /// 64-bit float
    Float64,
    /// Boolean
    Bool,
    /// List of elements
    List(Box<ElementType>),
    /// Map of elements keyed by string
    Map(Box<ElementType>),
    /// Arbitrary JSON value
    Dynamic,
}

impl ElementType {
    /// cty type JSON encoding used in `providers schema -json`.
    #[must_use]
    pub fn cty_type(&self) -> Value {
        match self {
            Self::String | Self::IntOrString => json!("string"),
            Self::Int64 | Self::Float64 => json!("number"),
            Self::Bool => json!("bool"),
            Self::List(element) => json!(["list", element.cty_type()]),
            Self::Map(element) => json!(["map", element.cty_type()]),
            Self::Dynamic => json!("dynamic"),
        }
    }
}

/// Shape of an attribute's value.
#[derive(Clone, Debug)]
pub enum AttributeKind {
    /// UTF-8 string
    String,
    /// Kubernetes `IntOrString`; a Terraform string in state
    IntOrString,
    /// 64-bit integer
    Int64,
    /// 64-bit float
    Float64,
    /// Boolean
    Bool,
    /// List of primitive elements
    List(ElementType),
    /// Map of primitive elements
    Map(ElementType),
    /// A single nested object
    SingleNested(Attributes),
    /// A list of nested objects
    ListNested(Attributes),
    /// A map of nested objects
    MapNested(Attributes),
    /// Arbitrary JSON value passed through unchanged
    Dynamic,
}

impl AttributeKind {
    /// Nested attributes of object-like kinds.
    #[must_use]
    pub fn nested(&self) -> Option<&Attributes> {
        match self {
            Self::SingleNested(attrs) | Self::ListNested(attrs) | Self::MapNested(attrs) => {
                Some(attrs)
            }
            _ => None,
        }
    }

    /// Short name of the kind used in messages and docs.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::String | Self::IntOrString => "string".to_string(),
            Self::Int64 => "number".to_string(),
            Self::Float64 => "number".to_string(),
            Self::Bool => "bool".to_string(),
            Self::List(element) => format!("list({})", element_type_name(element)),
            Self::Map(element) => format!("map({})", element_type_name(element)),
            Self::SingleNested(_) => "object".to_string(),
            Self::ListNested(_) => "list(object)".to_string(),
            Self::MapNested(_) => "map(object)".to_string(),
            Self::Dynamic => "dynamic".to_string(),
        }
    }
}

fn element_type_name(element: &ElementType) -> String {
    match element {
        ElementType::String | ElementType::IntOrString => "string".to_string(),
        ElementType::Int64 | ElementType::Float64 => "number".to_string(),
        ElementType::Bool => "bool".to_string(),
        ElementType::List(inner) => format!("list({})", element_type_name(inner)),
        ElementType::Map(inner) => format!("map({})", element_type_name(inner)),
        ElementType::Dynamic => "dynamic".to_string(),
    }
}

/// One entry of the schema table.
#[derive(Clone, Debug)]
pub struct Attribute {
    /// Value shape
    pub kind: AttributeKind,
    /// Description shown in docs and `terraform providers schema`
    pub description: String,
    /// Must be set in configuration
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Set by the provider
    pub computed: bool,
    /// Hidden from CLI output
    pub sensitive: bool,
    /// Field name in the Kubernetes manifest; `None` for provider-only attributes
    pub manifest_name: Option<String>,
    /// Validators run against configured values
    pub validators: Vec<Arc<dyn Validator>>,
}

impl Attribute {
    fn new(kind: AttributeKind, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            kind,
            description: String::new(),
            required,
            optional,
            computed,
            sensitive: false,
            manifest_name: None,
            validators: Vec::new(),
        }
    }

    /// An attribute the user must set.
    #[must_use]
    pub fn required(kind: AttributeKind) -> Self {
        Self::new(kind, true, false, false)
    }

    /// An attribute the user may set.
    #[must_use]
    pub fn optional(kind: AttributeKind) -> Self {
        Self::new(kind, false, true, false)
    }

    /// An attribute only the provider sets.
    #[must_use]
    pub fn computed(kind: AttributeKind) -> Self {
        Self::new(kind, false, false, true)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the manifest field name.
    #[must_use]
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = Some(name.into());
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Marks the attribute as sensitive.
    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Whether only the provider may set this attribute.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    /// JSON block representation used by `providers schema -json`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        match &self.kind {
            AttributeKind::String | AttributeKind::IntOrString => {
                out.insert("type".to_string(), json!("string"));
            }
            AttributeKind::Int64 | AttributeKind::Float64 => {
                out.insert("type".to_string(), json!("number"));
            }
            AttributeKind::Bool => {
                out.insert("type".to_string(), json!("bool"));
            }
            AttributeKind::List(element) => {
                out.insert("type".to_string(), json!(["list", element.cty_type()]));
            }
            AttributeKind::Map(element) => {
                out.insert("type".to_string(), json!(["map", element.cty_type()]));
            }
            AttributeKind::Dynamic => {
                out.insert("type".to_string(), json!("dynamic"));
            }
            AttributeKind::SingleNested(attrs) => {
                out.insert("nested_type".to_string(), nested_type_json(attrs, "single"));
            }
            AttributeKind::ListNested(attrs) => {
                out.insert("nested_type".to_string(), nested_type_json(attrs, "list"));
            }
            AttributeKind::MapNested(attrs) => {
                out.insert("nested_type".to_string(), nested_type_json(attrs, "map"));
            }
        }
        if !self.description.is_empty() {
            out.insert("description".to_string(), json!(self.description));
            out.insert("description_kind".to_string(), json!("plain"));
        }
        for (flag, set) in [
            ("required", self.required),
            ("optional", self.optional),
            ("computed", self.computed),
            ("sensitive", self.sensitive),
        ] {
            if set {
                out.insert(flag.to_string(), json!(true));
            }
        }
        Value::Object(out)
    }
}

fn attributes_json(attrs: &Attributes) -> Value {
    Value::Object(
        attrs
            .iter()
            .map(|(name, attr)| (name.clone(), attr.to_json()))
            .collect(),
    )
}

fn nested_type_json(attrs: &Attributes, nesting_mode: &str) -> Value {
    json!({
        "attributes": attributes_json(attrs),
        "nesting_mode": nesting_mode,
    })
}

/// Attribute table of one resource type (or of the provider itself).
#[derive(Clone, Debug, Default)]
pub struct Schema {
    /// Description of the resource
    pub description: String,
    /// Schema version, bumped on incompatible state changes
    pub version: i64,
    /// Top-level attributes
    pub attributes: Attributes,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            version: 0,
            attributes: Attributes::new(),
        }
    }

    /// Adds a top-level attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Looks up an attribute by dotted path (`spec.realm.display_name`).
    ///
    /// List and map nesting is transparent: `spec.realm.users.username` finds
    /// the `username` attribute of every element of `users`.
    #[must_use]
    pub fn attribute_at(&self, path: &str) -> Option<&Attribute> {
        let mut parts = path.split('.');
        let mut current = self.attributes.get(parts.next()?)?;
        for part in parts {
            current = current.kind.nested()?.get(part)?;
        }
        Some(current)
    }

    /// All dotted paths that end in a non-object attribute, sorted.
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaf_paths(&self.attributes, "", &mut paths);
        paths
    }

    /// JSON block representation used by `providers schema -json`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut block = Map::new();
        block.insert("attributes".to_string(), attributes_json(&self.attributes));
        if !self.description.is_empty() {
            block.insert("description".to_string(), json!(self.description));
            block.insert("description_kind".to_string(), json!("plain"));
        }
        json!({
            "version": self.version,
            "block": Value::Object(block),
        })
    }
}

fn collect_leaf_paths(attrs: &Attributes, prefix: &str, out: &mut Vec<String>) {
    for (name, attr) in attrs {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match attr.kind.nested() {
            Some(nested) => collect_leaf_paths(nested, &path, out),
            None => out.push(path),
        }
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod schema_tests;
