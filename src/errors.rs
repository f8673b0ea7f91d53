// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the Kubernetes manifest provider.
//!
//! Library functions return [`ProviderError`]. Lifecycle methods never fail
//! outright: they convert errors into [`Diagnostics`](crate::diagnostics::Diagnostics)
//! which Terraform shows to the user.

use crate::diagnostics::AttributePath;
use thiserror::Error;

/// Errors raised while building schemas, converting values, or rendering manifests.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The requested resource type is not registered with the provider.
    #[error("Resource type '{type_name}' is not supported by this provider")]
    UnknownResourceType {
        /// The Terraform resource type name that was requested
        type_name: String,
    },

    /// The CRD does not carry an OpenAPI v3 schema to derive attributes from.
    #[error("Custom resource '{kind}' has no OpenAPI v3 schema")]
    MissingSchema {
        /// Kind of the custom resource
        kind: String,
    },

    /// A value does not have the type the schema declares for it.
    #[error("Attribute '{path}' expected {expected}, got {actual}")]
    TypeMismatch {
        /// Attribute path of the offending value
        path: AttributePath,
        /// Type the schema declares
        expected: String,
        /// JSON type that was found
        actual: String,
    },

    /// The state or plan passed to a lifecycle method is not an object.
    #[error("Resource state must be an object, got {actual}")]
    InvalidState {
        /// JSON type that was found
        actual: String,
    },

    /// The converted manifest does not decode into the typed custom resource.
    #[error("Manifest is not a valid {kind}: {source}")]
    InvalidManifest {
        /// Kind of the custom resource
        kind: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// An imported manifest belongs to another resource type.
    #[error("Manifest has apiVersion '{found_api_version}' and kind '{found_kind}', expected '{api_version}' and '{kind}'")]
    ManifestTypeMismatch {
        /// Expected `apiVersion`
        api_version: String,
        /// Expected `kind`
        kind: String,
        /// `apiVersion` found in the manifest
        found_api_version: String,
        /// `kind` found in the manifest
        found_kind: String,
    },

    /// YAML serialization of the manifest failed.
    #[error("YAML Error: {0}")]
    Marshal(#[source] serde_yaml::Error),

    /// A YAML document could not be parsed.
    #[error("Unable to parse YAML: {0}")]
    ParseYaml(#[source] serde_yaml::Error),

    /// A JSON document could not be converted.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File that was accessed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

/// Returns the JSON type name of `value` for error messages.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
