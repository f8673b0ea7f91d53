// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Derivation of Terraform schemas from CRD OpenAPI v3 schemas.
//!
//! Every resource's attribute table is generated from the OpenAPI schema of
//! its [`CustomResourceDefinition`], so the typed CRD struct is the only model
//! that has to be maintained by hand.
//!
//! # Type mapping
//!
//! | OpenAPI                              | Terraform                    |
//! | ------------------------------------ | ---------------------------- |
//! | `x-kubernetes-int-or-string`         | string (`IntOrString`)       |
//! | `string`                             | string                       |
//! | `integer`                            | number (`Int64`)             |
//! | `number`                             | number (`Float64`)           |
//! | `boolean`                            | bool                         |
//! | `object` with `properties`           | single nested attribute      |
//! | `object` with `additionalProperties` | map / map nested attribute   |
//! | `array` of objects                   | list nested attribute        |
//! | `array` of scalars                   | list                         |
//! | anything else                        | dynamic                      |

use crate::constants::{
    ATTR_ANNOTATIONS, ATTR_API_VERSION, ATTR_ID, ATTR_KIND, ATTR_LABELS, ATTR_METADATA,
    ATTR_NAME, ATTR_NAMESPACE, ATTR_SPEC, ATTR_YAML,
};
use crate::errors::{ProviderError, Result};
use crate::schema::{Attribute, AttributeKind, Attributes, ElementType, Schema};
use crate::utilities::{sanitize_attribute_name, to_snake_case};
use crate::validators::{
    AnnotationValidator, LabelValidator, LengthValidator, NameValidator, OneOfValidator,
    PatternValidator, RangeValidator, Validator,
};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returns the OpenAPI schema of the storage version (or the first version).
///
/// # Errors
///
/// Returns [`ProviderError::MissingSchema`] if the CRD carries no schema.
pub fn root_schema(crd: &CustomResourceDefinition) -> Result<&JSONSchemaProps> {
    let versions = &crd.spec.versions;
    versions
        .iter()
        .find(|v| v.storage)
        .or_else(|| versions.first())
        .and_then(|v| v.schema.as_ref())
        .and_then(|s| s.open_api_v3_schema.as_ref())
        .ok_or_else(|| ProviderError::MissingSchema {
            kind: crd.spec.names.kind.clone(),
        })
}

/// Builds the full resource schema for `crd`.
///
/// The schema always contains the computed `id`, `yaml`, `api_version` and
/// `kind` attributes and the `metadata` block; `spec` mirrors the CRD.
///
/// # Errors
///
/// Returns [`ProviderError::MissingSchema`] if the CRD carries no schema.
pub fn resource_schema(crd: &CustomResourceDefinition) -> Result<Schema> {
    let kind = &crd.spec.names.kind;
    let root = root_schema(crd)?;
    let namespaced = crd.spec.scope == "Namespaced";

    let description = root
        .description
        .clone()
        .unwrap_or_else(|| format!("{kind} manifest"));

    let mut schema = Schema::new(description)
        .with_attribute(
            ATTR_ID,
            Attribute::computed(AttributeKind::String)
                .with_description("Time-based identifier of this manifest, in Unix nanoseconds."),
        )
        .with_attribute(
            ATTR_YAML,
            Attribute::computed(AttributeKind::String)
                .with_description("The generated manifest in YAML format."),
        )
        .with_attribute(
            ATTR_API_VERSION,
            Attribute::computed(AttributeKind::String)
                .with_description("The API group and version of the resource."),
        )
        .with_attribute(
            ATTR_KIND,
            Attribute::computed(AttributeKind::String)
                .with_description("The kind of the resource."),
        )
        .with_attribute(ATTR_METADATA, metadata_attribute(namespaced));

    if let Some(spec) = root.properties.as_ref().and_then(|p| p.get("spec")) {
        let required = root
            .required
            .as_ref()
            .is_some_and(|r| r.iter().any(|name| name == "spec"));
        schema = schema.with_attribute(ATTR_SPEC, attribute_from_prop("spec", spec, required));
    }

    debug!(
        "Derived schema for {kind} with {} leaf attributes",
        schema.leaf_paths().len()
    );
    Ok(schema)
}

/// The `metadata` block shared by all resources.
#[must_use]
pub fn metadata_attribute(namespaced: bool) -> Attribute {
    let mut attrs = Attributes::new();
    attrs.insert(
        ATTR_NAME.to_string(),
        Attribute::required(AttributeKind::String)
            .with_description("Unique identifier for this object within its scope.")
            .with_manifest_name("name")
            .with_validator(NameValidator),
    );
    if namespaced {
        attrs.insert(
            ATTR_NAMESPACE.to_string(),
            Attribute::required(AttributeKind::String)
                .with_description("The namespace the object is placed in.")
                .with_manifest_name("namespace")
                .with_validator(NameValidator),
        );
    }
    attrs.insert(
        ATTR_LABELS.to_string(),
        Attribute::optional(AttributeKind::Map(ElementType::String))
            .with_description("Map of string keys and values used to organize and categorize objects.")
            .with_manifest_name("labels")
            .with_validator(LabelValidator),
    );
    attrs.insert(
        ATTR_ANNOTATIONS.to_string(),
        Attribute::optional(AttributeKind::Map(ElementType::String))
            .with_description("Unstructured key value map stored with the object.")
            .with_manifest_name("annotations")
            .with_validator(AnnotationValidator),
    );

    Attribute::required(AttributeKind::SingleNested(attrs))
        .with_description("Data that helps uniquely identify this object.")
        .with_manifest_name("metadata")
}

/// Converts the `properties` of an object schema into attributes.
///
/// Attribute names are the snake_case form of the property names. When two
/// properties map to the same name, the later one (in property order) gets
/// its sanitized property name instead, numbered if that is taken as well.
#[must_use]
pub fn attributes_from_props(
    props: &BTreeMap<String, JSONSchemaProps>,
    required: &[String],
) -> Attributes {
    let mut attrs = Attributes::new();
    for (json_name, prop) in props {
        let mut name = to_snake_case(json_name);
        if name.is_empty() || attrs.contains_key(&name) {
            let base = sanitize_attribute_name(json_name);
            let mut fallback = base.clone();
            let mut counter = 2;
            while fallback.is_empty() || attrs.contains_key(&fallback) {
                fallback = format!("{base}_{counter}");
                counter += 1;
            }
            warn!("Attribute name '{name}' for property '{json_name}' is taken, using '{fallback}'");
            name = fallback;
        }
        let is_required = required.iter().any(|r| r == json_name);
        attrs.insert(name, attribute_from_prop(json_name, prop, is_required));
    }
    attrs
}

/// Converts one property schema into an attribute named `json_name` in manifests.
#[must_use]
pub fn attribute_from_prop(json_name: &str, prop: &JSONSchemaProps, required: bool) -> Attribute {
    let effective = effective(prop);
    let kind = kind_from_prop(effective);

    let mut attribute = if required {
        Attribute::required(kind)
    } else {
        Attribute::optional(kind)
    };
    attribute.manifest_name = Some(json_name.to_string());
    attribute.description = prop
        .description
        .clone()
        .or_else(|| effective.description.clone())
        .unwrap_or_default();
    attribute.validators = validators_for(json_name, effective);
    attribute
}

/// Collapses `anyOf`/`oneOf` schemas without an own type to their first
/// non-null branch.
pub(crate) fn effective(prop: &JSONSchemaProps) -> &JSONSchemaProps {
    if prop.type_.is_some() || prop.properties.is_some() || is_int_or_string(prop) {
        return prop;
    }
    prop.any_of
        .iter()
        .chain(prop.one_of.iter())
        .flatten()
        .find(|branch| branch.type_.as_deref() != Some("null") && !is_null_enum(branch))
        .unwrap_or(prop)
}

pub(crate) fn is_int_or_string(prop: &JSONSchemaProps) -> bool {
    prop.x_kubernetes_int_or_string == Some(true)
}

fn is_null_enum(prop: &JSONSchemaProps) -> bool {
    prop.enum_
        .as_ref()
        .is_some_and(|values| values.iter().all(|v| v.0.is_null()))
}

fn has_properties(prop: &JSONSchemaProps) -> bool {
    prop.properties.as_ref().is_some_and(|p| !p.is_empty())
}

fn nested_attributes(prop: &JSONSchemaProps) -> Attributes {
    match &prop.properties {
        Some(props) => attributes_from_props(props, prop.required.as_deref().unwrap_or_default()),
        None => Attributes::new(),
    }
}

pub(crate) fn items_schema(prop: &JSONSchemaProps) -> Option<&JSONSchemaProps> {
    match &prop.items {
        Some(JSONSchemaPropsOrArray::Schema(schema)) => Some(effective(schema)),
        Some(JSONSchemaPropsOrArray::Schemas(schemas)) => schemas.first().map(effective),
        None => None,
    }
}

pub(crate) fn additional_properties_schema(prop: &JSONSchemaProps) -> Option<&JSONSchemaProps> {
    match &prop.additional_properties {
        Some(JSONSchemaPropsOrBool::Schema(schema)) => Some(effective(schema)),
        _ => None,
    }
}

fn kind_from_prop(prop: &JSONSchemaProps) -> AttributeKind {
    if is_int_or_string(prop) {
        return AttributeKind::IntOrString;
    }
    match prop.type_.as_deref() {
        Some("string") => AttributeKind::String,
        Some("integer") => AttributeKind::Int64,
        Some("number") => AttributeKind::Float64,
        Some("boolean") => AttributeKind::Bool,
        Some("array") => match items_schema(prop) {
            Some(items) if has_properties(items) => {
                AttributeKind::ListNested(nested_attributes(items))
            }
            Some(items) => AttributeKind::List(element_type(items)),
            None => AttributeKind::List(ElementType::Dynamic),
        },
        Some("object") | None if has_properties(prop) => {
            AttributeKind::SingleNested(nested_attributes(prop))
        }
        Some("object") => match additional_properties_schema(prop) {
            Some(values) if has_properties(values) => {
                AttributeKind::MapNested(nested_attributes(values))
            }
            Some(values) => AttributeKind::Map(element_type(values)),
            None => AttributeKind::Dynamic,
        },
        _ => AttributeKind::Dynamic,
    }
}

fn element_type(prop: &JSONSchemaProps) -> ElementType {
    if is_int_or_string(prop) {
        return ElementType::IntOrString;
    }
    match prop.type_.as_deref() {
        Some("string") => ElementType::String,
        Some("integer") => ElementType::Int64,
        Some("number") => ElementType::Float64,
        Some("boolean") => ElementType::Bool,
        Some("array") => ElementType::List(Box::new(
            items_schema(prop).map_or(ElementType::Dynamic, element_type),
        )),
        Some("object") if !has_properties(prop) => match additional_properties_schema(prop) {
            Some(values) => ElementType::Map(Box::new(element_type(values))),
            None => ElementType::Dynamic,
        },
        _ => ElementType::Dynamic,
    }
}

fn validators_for(json_name: &str, prop: &JSONSchemaProps) -> Vec<Arc<dyn Validator>> {
    let mut validators: Vec<Arc<dyn Validator>> = Vec::new();

    if let Some(values) = &prop.enum_ {
        let allowed: Vec<_> = values
            .iter()
            .map(|v| v.0.clone())
            .filter(|v| !v.is_null())
            .collect();
        if !allowed.is_empty() {
            validators.push(Arc::new(OneOfValidator::new(allowed)));
        }
    }

    if let Some(pattern) = &prop.pattern {
        match PatternValidator::new(pattern) {
            Ok(validator) => validators.push(Arc::new(validator)),
            Err(e) => warn!("Skipping pattern of property '{json_name}': {e}"),
        }
    }

    let (minimum, maximum) = integer_bounds(prop);
    if minimum.is_some() || maximum.is_some() {
        validators.push(Arc::new(RangeValidator::new(minimum, maximum)));
    }

    if prop.min_length.is_some() || prop.max_length.is_some() {
        let min = prop.min_length.and_then(|n| usize::try_from(n).ok());
        let max = prop.max_length.and_then(|n| usize::try_from(n).ok());
        validators.push(Arc::new(LengthValidator::new(min, max)));
    }

    validators
}

/// Declared bounds, narrowed to the value range of sized integer formats.
fn integer_bounds(prop: &JSONSchemaProps) -> (Option<f64>, Option<f64>) {
    let limits = match (prop.type_.as_deref(), prop.format.as_deref()) {
        (Some("integer"), Some("int32")) => Some((f64::from(i32::MIN), f64::from(i32::MAX))),
        (Some("integer"), Some("uint32")) => Some((0.0, f64::from(u32::MAX))),
        _ => None,
    };
    match limits {
        Some((low, high)) => (
            Some(prop.minimum.map_or(low, |min| min.max(low))),
            Some(prop.maximum.map_or(high, |max| max.min(high))),
        ),
        None => (prop.minimum, prop.maximum),
    }
}

#[cfg(test)]
#[path = "crd_schema_tests.rs"]
mod crd_schema_tests;
