// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Conversion between Terraform state values and Kubernetes manifest values.
//!
//! Terraform state objects use snake_case attribute names and carry every
//! attribute of the schema (unset ones as `null`). Manifests use the CRD's
//! camelCase field names and omit unset fields. Both directions are driven by
//! the schema table: each [`Attribute`](crate::schema::Attribute) knows its
//! manifest field name.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use terraform_provider_k8s::diagnostics::AttributePath;
//! use terraform_provider_k8s::schema::{Attribute, AttributeKind, Attributes};
//! use terraform_provider_k8s::values::object_to_manifest;
//!
//! let attrs: Attributes = [(
//!     "display_name".to_string(),
//!     Attribute::optional(AttributeKind::String).with_manifest_name("displayName"),
//! )]
//! .into();
//!
//! let manifest = object_to_manifest(
//!     &attrs,
//!     &json!({"display_name": "Example"}),
//!     &AttributePath::empty(),
//! )
//! .unwrap();
//! assert_eq!(manifest, json!({"displayName": "Example"}));
//! ```

use crate::constants::SUMMARY_INCORRECT_TYPE;
use crate::diagnostics::{AttributePath, Diagnostics};
use crate::errors::{json_type_name, ProviderError, Result};
use crate::schema::{AttributeKind, Attributes, ElementType};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

impl From<&ElementType> for AttributeKind {
    fn from(element: &ElementType) -> Self {
        match element {
            ElementType::String => Self::String,
            ElementType::IntOrString => Self::IntOrString,
            ElementType::Int64 => Self::Int64,
            ElementType::Float64 => Self::Float64,
            ElementType::Bool => Self::Bool,
            ElementType::List(inner) => Self::List((**inner).clone()),
            ElementType::Map(inner) => Self::Map((**inner).clone()),
            ElementType::Dynamic => Self::Dynamic,
        }
    }
}

fn mismatch(path: &AttributePath, expected: &str, actual: &Value) -> ProviderError {
    ProviderError::TypeMismatch {
        path: path.clone(),
        expected: expected.to_string(),
        actual: json_type_name(actual).to_string(),
    }
}

/// Converts a state object into the corresponding manifest object.
///
/// Attributes without a manifest name (`id`, `yaml`, ...) and `null` values
/// are skipped.
///
/// # Errors
///
/// Returns [`ProviderError::TypeMismatch`] when a value does not have the
/// type its attribute declares.
pub fn object_to_manifest(
    attributes: &Attributes,
    value: &Value,
    path: &AttributePath,
) -> Result<Value> {
    let object = value
        .as_object()
        .ok_or_else(|| mismatch(path, "object", value))?;

    let mut out = Map::new();
    for (name, attribute) in attributes {
        let Some(manifest_name) = &attribute.manifest_name else {
            continue;
        };
        let Some(v) = object.get(name).filter(|v| !v.is_null()) else {
            continue;
        };
        out.insert(
            manifest_name.clone(),
            value_to_manifest(&attribute.kind, v, &path.attribute(name))?,
        );
    }
    Ok(Value::Object(out))
}

fn value_to_manifest(kind: &AttributeKind, value: &Value, path: &AttributePath) -> Result<Value> {
    match kind {
        AttributeKind::String => match value {
            Value::String(_) => Ok(value.clone()),
            _ => Err(mismatch(path, "string", value)),
        },
        AttributeKind::IntOrString => int_or_string_to_manifest(value, path),
        AttributeKind::Int64 => integer(value).ok_or_else(|| mismatch(path, "integer", value)),
        AttributeKind::Float64 => match value {
            Value::Number(_) => Ok(value.clone()),
            _ => Err(mismatch(path, "number", value)),
        },
        AttributeKind::Bool => match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err(mismatch(path, "bool", value)),
        },
        AttributeKind::List(element) => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(path, "list", value))?;
            let kind = AttributeKind::from(element);
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| !item.is_null())
                .map(|(i, item)| value_to_manifest(&kind, item, &path.index(i)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        AttributeKind::Map(element) => {
            let entries = value
                .as_object()
                .ok_or_else(|| mismatch(path, "map", value))?;
            let kind = AttributeKind::from(element);
            entries
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| Ok((k.clone(), value_to_manifest(&kind, v, &path.key(k))?)))
                .collect::<Result<Map<_, _>>>()
                .map(Value::Object)
        }
        AttributeKind::SingleNested(attrs) => object_to_manifest(attrs, value, path),
        AttributeKind::ListNested(attrs) => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(path, "list", value))?;
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| !item.is_null())
                .map(|(i, item)| object_to_manifest(attrs, item, &path.index(i)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        AttributeKind::MapNested(attrs) => {
            let entries = value
                .as_object()
                .ok_or_else(|| mismatch(path, "map", value))?;
            entries
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| Ok((k.clone(), object_to_manifest(attrs, v, &path.key(k))?)))
                .collect::<Result<Map<_, _>>>()
                .map(Value::Object)
        }
        AttributeKind::Dynamic => Ok(prune_nulls(value.clone())),
    }
}

/// Integers pass through; floats without a fractional part become integers.
///
/// Floats of 9e15 or more are rejected as they may not hold an exact integer.
pub(crate) fn integer(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
            .map(|f| Value::from(f as i64)),
        _ => None,
    }
}

/// `"8080"` becomes `8080`; any other string stays a string.
fn int_or_string_to_manifest(value: &Value, path: &AttributePath) -> Result<Value> {
    match value {
        Value::String(s) => Ok(s
            .parse::<i64>()
            .map_or_else(|_| value.clone(), Value::from)),
        Value::Number(_) => integer(value).ok_or_else(|| mismatch(path, "integer or string", value)),
        _ => Err(mismatch(path, "integer or string", value)),
    }
}

/// Converts a manifest object back into a state object.
///
/// Every attribute of the schema appears in the result; fields missing from
/// the manifest become `null`. Manifest fields unknown to the schema are
/// dropped with a warning, type mismatches become errors.
pub fn object_from_manifest(
    attributes: &Attributes,
    manifest: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> Value {
    let Some(object) = manifest.as_object() else {
        report_mismatch(diagnostics, path, "object", manifest);
        return Value::Null;
    };

    let mut known = BTreeSet::new();
    let mut out = Map::new();
    for (name, attribute) in attributes {
        let value = match &attribute.manifest_name {
            Some(manifest_name) => {
                known.insert(manifest_name.as_str());
                match object.get(manifest_name).filter(|v| !v.is_null()) {
                    Some(v) => value_from_manifest(&attribute.kind, v, &path.attribute(name), diagnostics),
                    None => Value::Null,
                }
            }
            None => Value::Null,
        };
        out.insert(name.clone(), value);
    }

    for field in object.keys().filter(|k| !known.contains(k.as_str())) {
        diagnostics.add_attribute_warning(
            path,
            "Unknown manifest field",
            format!("Field '{field}' is not part of the schema and was dropped."),
        );
    }

    Value::Object(out)
}

fn report_mismatch(
    diagnostics: &mut Diagnostics,
    path: &AttributePath,
    expected: &str,
    actual: &Value,
) {
    diagnostics.add_attribute_error(
        path,
        SUMMARY_INCORRECT_TYPE,
        format!("expected {expected}, got {}", json_type_name(actual)),
    );
}

fn value_from_manifest(
    kind: &AttributeKind,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> Value {
    let expected = match kind {
        AttributeKind::String if value.is_string() => return value.clone(),
        AttributeKind::IntOrString => match value {
            Value::String(_) => return value.clone(),
            Value::Number(n) => return Value::String(n.to_string()),
            _ => "integer or string",
        },
        AttributeKind::Int64 => match integer(value) {
            Some(v) => return v,
            None => "integer",
        },
        AttributeKind::Float64 if value.is_number() => return value.clone(),
        AttributeKind::Bool if value.is_boolean() => return value.clone(),
        AttributeKind::List(element) => match value.as_array() {
            Some(items) => {
                let kind = AttributeKind::from(element);
                return Value::Array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| value_from_manifest(&kind, item, &path.index(i), diagnostics))
                        .collect(),
                );
            }
            None => "list",
        },
        AttributeKind::Map(element) => match value.as_object() {
            Some(entries) => {
                let kind = AttributeKind::from(element);
                return Value::Object(
                    entries
                        .iter()
                        .map(|(k, v)| (k.clone(), value_from_manifest(&kind, v, &path.key(k), diagnostics)))
                        .collect(),
                );
            }
            None => "map",
        },
        AttributeKind::SingleNested(attrs) => {
            return object_from_manifest(attrs, value, path, diagnostics)
        }
        AttributeKind::ListNested(attrs) => match value.as_array() {
            Some(items) => {
                return Value::Array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| object_from_manifest(attrs, item, &path.index(i), diagnostics))
                        .collect(),
                );
            }
            None => "list",
        },
        AttributeKind::MapNested(attrs) => match value.as_object() {
            Some(entries) => {
                return Value::Object(
                    entries
                        .iter()
                        .map(|(k, v)| (k.clone(), object_from_manifest(attrs, v, &path.key(k), diagnostics)))
                        .collect(),
                );
            }
            None => "map",
        },
        AttributeKind::Dynamic => return value.clone(),
        AttributeKind::String => "string",
        AttributeKind::Float64 => "number",
        AttributeKind::Bool => "bool",
    };

    report_mismatch(diagnostics, path, expected, value);
    Value::Null
}

/// Removes `null` object members and list elements, recursively.
#[must_use]
pub fn prune_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(prune_nulls)
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
#[path = "values_tests.rs"]
mod values_tests;
