// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Attribute validators.
//!
//! Validators run during configuration validation, after type checks. They
//! never see `null`: unset optional attributes are always valid.
//!
//! # Kubernetes validators
//!
//! - [`NameValidator`] - object names and namespaces (DNS-1123 subdomain)
//! - [`LabelValidator`] - label keys and values
//! - [`AnnotationValidator`] - annotation keys and total annotation size
//!
//! # Schema validators
//!
//! Derived from the CRD's OpenAPI schema:
//!
//! - [`OneOfValidator`] - `enum`
//! - [`PatternValidator`] - `pattern`
//! - [`RangeValidator`] - `minimum` / `maximum`
//! - [`LengthValidator`] - `minLength` / `maxLength`

use crate::constants::{
    DNS1123_SUBDOMAIN_MAX_LENGTH, LABEL_VALUE_MAX_LENGTH, QUALIFIED_NAME_MAX_LENGTH,
    SUMMARY_INVALID_VALUE, TOTAL_ANNOTATION_SIZE_LIMIT_BYTES,
};
use crate::diagnostics::{AttributePath, Diagnostics};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("DNS-1123 subdomain pattern is valid")
});

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$")
        .expect("qualified name pattern is valid")
});

/// Checks a single configuration value.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Human readable description, shown in generated documentation.
    fn description(&self) -> String;

    /// Validates `value` (never null), recording problems against `path`.
    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics);
}

/// Returns the problems with `name` as a DNS-1123 subdomain, if any.
#[must_use]
pub fn dns1123_subdomain_errors(name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push("must not be empty".to_string());
        return errors;
    }
    if name.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errors.push(format!(
            "must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"
        ));
    }
    if !DNS1123_SUBDOMAIN.is_match(name) {
        errors.push(
            "must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

/// Returns the problems with `key` as a qualified name (`[prefix/]name`), if any.
#[must_use]
pub fn qualified_name_errors(key: &str) -> Vec<String> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    let mut errors = Vec::new();
    if let Some(prefix) = prefix {
        errors.extend(
            dns1123_subdomain_errors(prefix)
                .into_iter()
                .map(|e| format!("prefix part {e}")),
        );
    }
    if name.is_empty() {
        errors.push("name part must be non-empty".to_string());
        return errors;
    }
    if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        errors.push(format!(
            "name part must be no more than {QUALIFIED_NAME_MAX_LENGTH} characters"
        ));
    }
    if !QUALIFIED_NAME.is_match(name) {
        errors.push(
            "name part must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

/// Returns the problems with `value` as a label value, if any.
#[must_use]
pub fn label_value_errors(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.is_empty() {
        return errors;
    }
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        errors.push(format!(
            "must be no more than {LABEL_VALUE_MAX_LENGTH} characters"
        ));
    }
    if !QUALIFIED_NAME.is_match(value) {
        errors.push(
            "must be empty or consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    errors
}

fn report(diagnostics: &mut Diagnostics, path: &AttributePath, subject: &str, errors: Vec<String>) {
    for error in errors {
        diagnostics.add_attribute_error(path, SUMMARY_INVALID_VALUE, format!("{subject} {error}"));
    }
}

fn expect_string<'a>(
    value: &'a Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> Option<&'a str> {
    let s = value.as_str();
    if s.is_none() {
        diagnostics.add_attribute_error(path, SUMMARY_INVALID_VALUE, "expected a string value");
    }
    s
}

fn expect_map<'a>(
    value: &'a Value,
    path: &AttributePath,
    diagnostics: &mut Diagnostics,
) -> Option<&'a serde_json::Map<String, Value>> {
    let map = value.as_object();
    if map.is_none() {
        diagnostics.add_attribute_error(path, SUMMARY_INVALID_VALUE, "expected a map value");
    }
    map
}

/// Validates object names and namespaces.
#[derive(Clone, Debug, Default)]
pub struct NameValidator;

impl Validator for NameValidator {
    fn description(&self) -> String {
        "must be a valid DNS-1123 subdomain".to_string()
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        if let Some(name) = expect_string(value, path, diagnostics) {
            report(
                diagnostics,
                path,
                &format!("name '{name}'"),
                dns1123_subdomain_errors(name),
            );
        }
    }
}

/// Validates a map of labels.
#[derive(Clone, Debug, Default)]
pub struct LabelValidator;

impl Validator for LabelValidator {
    fn description(&self) -> String {
        "keys must be qualified names and values valid label values".to_string()
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(labels) = expect_map(value, path, diagnostics) else {
            return;
        };
        for (key, label_value) in labels {
            let entry_path = path.key(key);
            report(
                diagnostics,
                &entry_path,
                &format!("label key '{key}'"),
                qualified_name_errors(key),
            );
            if let Some(v) = label_value.as_str() {
                report(
                    diagnostics,
                    &entry_path,
                    &format!("label value '{v}'"),
                    label_value_errors(v),
                );
            }
        }
    }
}

/// Validates a map of annotations.
#[derive(Clone, Debug, Default)]
pub struct AnnotationValidator;

impl Validator for AnnotationValidator {
    fn description(&self) -> String {
        "keys must be qualified names and the total size must not exceed 256 KiB".to_string()
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(annotations) = expect_map(value, path, diagnostics) else {
            return;
        };
        let mut total = 0usize;
        for (key, annotation_value) in annotations {
            report(
                diagnostics,
                &path.key(key),
                &format!("annotation key '{key}'"),
                qualified_name_errors(key),
            );
            total += key.len() + annotation_value.as_str().map_or(0, str::len);
        }
        if total > TOTAL_ANNOTATION_SIZE_LIMIT_BYTES {
            diagnostics.add_attribute_error(
                path,
                SUMMARY_INVALID_VALUE,
                format!(
                    "annotations may not exceed {TOTAL_ANNOTATION_SIZE_LIMIT_BYTES} bytes in total, got {total}"
                ),
            );
        }
    }
}

/// Accepts only one of a fixed set of values.
#[derive(Clone, Debug)]
pub struct OneOfValidator {
    allowed: Vec<Value>,
}

impl OneOfValidator {
    /// Creates a validator accepting exactly `allowed`.
    #[must_use]
    pub fn new(allowed: Vec<Value>) -> Self {
        Self { allowed }
    }

    fn allowed_list(&self) -> String {
        self.allowed
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Validator for OneOfValidator {
    fn description(&self) -> String {
        format!("value must be one of: [{}]", self.allowed_list())
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        if !self.allowed.contains(value) {
            diagnostics.add_attribute_error(
                path,
                SUMMARY_INVALID_VALUE,
                format!(
                    "Attribute {path} value must be one of: [{}], got: {value}",
                    self.allowed_list()
                ),
            );
        }
    }
}

/// Requires string values to match a regular expression.
#[derive(Clone, Debug)]
pub struct PatternValidator {
    pattern: Regex,
}

impl PatternValidator {
    /// Compiles `pattern`; fails for syntax the `regex` crate does not support.
    ///
    /// # Errors
    ///
    /// Returns the compile error for invalid or unsupported patterns.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Validator for PatternValidator {
    fn description(&self) -> String {
        format!("value must match pattern {}", self.pattern.as_str())
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        if let Some(s) = expect_string(value, path, diagnostics) {
            if !self.pattern.is_match(s) {
                diagnostics.add_attribute_error(
                    path,
                    SUMMARY_INVALID_VALUE,
                    format!(
                        "Attribute {path} value '{s}' must match pattern {}",
                        self.pattern.as_str()
                    ),
                );
            }
        }
    }
}

/// Bounds numeric values.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeValidator {
    /// Creates a validator with inclusive, optional bounds.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Validator for RangeValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("value must be between {min} and {max}"),
            (Some(min), None) => format!("value must be at least {min}"),
            (None, Some(max)) => format!("value must be at most {max}"),
            (None, None) => "any value".to_string(),
        }
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(n) = value.as_f64() else {
            diagnostics.add_attribute_error(path, SUMMARY_INVALID_VALUE, "expected a number");
            return;
        };
        let below = self.min.is_some_and(|min| n < min);
        let above = self.max.is_some_and(|max| n > max);
        if below || above {
            diagnostics.add_attribute_error(
                path,
                SUMMARY_INVALID_VALUE,
                format!("Attribute {path} {}, got: {value}", self.description()),
            );
        }
    }
}

/// Bounds the character length of string values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthValidator {
    min: Option<usize>,
    max: Option<usize>,
}

impl LengthValidator {
    /// Creates a validator with inclusive, optional bounds.
    #[must_use]
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }
}

impl Validator for LengthValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("string length must be between {min} and {max}"),
            (Some(min), None) => format!("string length must be at least {min}"),
            (None, Some(max)) => format!("string length must be at most {max}"),
            (None, None) => "any length".to_string(),
        }
    }

    fn validate(&self, path: &AttributePath, value: &Value, diagnostics: &mut Diagnostics) {
        let Some(s) = expect_string(value, path, diagnostics) else {
            return;
        };
        let length = s.chars().count();
        let short = self.min.is_some_and(|min| length < min);
        let long = self.max.is_some_and(|max| length > max);
        if short || long {
            diagnostics.add_attribute_error(
                path,
                SUMMARY_INVALID_VALUE,
                format!("Attribute {path} {}, got: {length}", self.description()),
            );
        }
    }
}

#[cfg(test)]
#[path = "validators_tests.rs"]
mod validators_tests;
