// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Configuration validation against a resource schema.
//!
//! Mirrors what Terraform reports for a resource block before any lifecycle
//! method runs: unknown arguments, missing required arguments, values set on
//! read-only attributes and type mismatches. Attribute validators run last,
//! and only on values of the right type.

use crate::constants::{
    SUMMARY_INCORRECT_TYPE, SUMMARY_MISSING_ARGUMENT, SUMMARY_READ_ONLY_ATTRIBUTE,
    SUMMARY_UNSUPPORTED_ARGUMENT,
};
use crate::diagnostics::{AttributePath, Diagnostics};
use crate::errors::json_type_name;
use crate::schema::{AttributeKind, Attributes, Schema};
use crate::values::integer;
use serde_json::Value;

/// Validates a resource configuration object against `schema`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use terraform_provider_k8s::schema::{Attribute, AttributeKind, Schema};
/// use terraform_provider_k8s::validation::validate_config;
///
/// let schema = Schema::new("Example")
///     .with_attribute("name", Attribute::required(AttributeKind::String));
///
/// assert!(!validate_config(&schema, &json!({"name": "ok"})).has_error());
/// assert!(validate_config(&schema, &json!({})).has_error());
/// ```
#[must_use]
pub fn validate_config(schema: &Schema, config: &Value) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    validate_object(
        &schema.attributes,
        config,
        &AttributePath::empty(),
        &mut diagnostics,
    );
    diagnostics
}

fn validate_object(
    attributes: &Attributes,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) {
    let Some(object) = value.as_object() else {
        type_error(diagnostics, path, "object", value);
        return;
    };

    for key in object.keys().filter(|k| !attributes.contains_key(*k)) {
        diagnostics.add_attribute_error(
            &path.attribute(key),
            SUMMARY_UNSUPPORTED_ARGUMENT,
            format!("An argument named \"{key}\" is not expected here."),
        );
    }

    for (name, attribute) in attributes {
        let attribute_path = path.attribute(name);
        let value = object.get(name).unwrap_or(&Value::Null);

        if value.is_null() {
            if attribute.required {
                diagnostics.add_attribute_error(
                    &attribute_path,
                    SUMMARY_MISSING_ARGUMENT,
                    format!("The argument \"{attribute_path}\" is required, but no definition was found."),
                );
            }
            continue;
        }

        if attribute.is_read_only() {
            diagnostics.add_attribute_error(
                &attribute_path,
                SUMMARY_READ_ONLY_ATTRIBUTE,
                format!("\"{attribute_path}\" is computed by the provider and cannot be configured."),
            );
            continue;
        }

        if validate_value(&attribute.kind, value, &attribute_path, diagnostics) {
            for validator in &attribute.validators {
                validator.validate(&attribute_path, value, diagnostics);
            }
        }
    }
}

/// Type-checks `value`, recursing into collections. Returns whether the value
/// itself has the expected shape.
fn validate_value(
    kind: &AttributeKind,
    value: &Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> bool {
    let matches = match kind {
        AttributeKind::String => value.is_string(),
        AttributeKind::IntOrString => value.is_string() || is_integer(value),
        AttributeKind::Int64 => is_integer(value),
        AttributeKind::Float64 => value.is_number(),
        AttributeKind::Bool => value.is_boolean(),
        AttributeKind::Dynamic => true,
        AttributeKind::List(element) => match value.as_array() {
            Some(items) => {
                let element_kind = AttributeKind::from(element);
                for (i, item) in items.iter().enumerate().filter(|(_, v)| !v.is_null()) {
                    validate_value(&element_kind, item, &path.index(i), diagnostics);
                }
                true
            }
            None => false,
        },
        AttributeKind::Map(element) => match value.as_object() {
            Some(entries) => {
                let element_kind = AttributeKind::from(element);
                for (k, v) in entries.iter().filter(|(_, v)| !v.is_null()) {
                    validate_value(&element_kind, v, &path.key(k), diagnostics);
                }
                true
            }
            None => false,
        },
        AttributeKind::SingleNested(attrs) => {
            if value.is_object() {
                validate_object(attrs, value, path, diagnostics);
            }
            value.is_object()
        }
        AttributeKind::ListNested(attrs) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate().filter(|(_, v)| !v.is_null()) {
                    validate_object(attrs, item, &path.index(i), diagnostics);
                }
                true
            }
            None => false,
        },
        AttributeKind::MapNested(attrs) => match value.as_object() {
            Some(entries) => {
                for (k, v) in entries.iter().filter(|(_, v)| !v.is_null()) {
                    validate_object(attrs, v, &path.key(k), diagnostics);
                }
                true
            }
            None => false,
        },
    };

    if !matches {
        type_error(diagnostics, path, &kind.type_name(), value);
    }
    matches
}

fn is_integer(value: &Value) -> bool {
    integer(value).is_some()
}

fn type_error(diagnostics: &mut Diagnostics, path: &AttributePath, expected: &str, actual: &Value) {
    let subject = if path.is_empty() {
        "resource".to_string()
    } else {
        format!("attribute \"{path}\"")
    };
    diagnostics.add_attribute_error(
        path,
        SUMMARY_INCORRECT_TYPE,
        format!(
            "Inappropriate value for {subject}: {expected} required, got {}.",
            json_type_name(actual)
        ),
    );
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
