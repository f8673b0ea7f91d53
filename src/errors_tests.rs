// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for provider error types.

use crate::diagnostics::AttributePath;
use crate::errors::{json_type_name, ProviderError};
use serde_json::json;

#[test]
fn test_unknown_resource_type_error() {
    let error = ProviderError::UnknownResourceType {
        type_name: "k8s_example_com_widget_v1_manifest".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Resource type 'k8s_example_com_widget_v1_manifest' is not supported by this provider"
    );
}

#[test]
fn test_type_mismatch_error() {
    let error = ProviderError::TypeMismatch {
        path: AttributePath::root("spec").attribute("replicas"),
        expected: "number".to_string(),
        actual: "string".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Attribute 'spec.replicas' expected number, got string"
    );
}

#[test]
fn test_manifest_type_mismatch_error() {
    let error = ProviderError::ManifestTypeMismatch {
        api_version: "keycloak.org/v1alpha1".to_string(),
        kind: "KeycloakRealm".to_string(),
        found_api_version: "v1".to_string(),
        found_kind: "ConfigMap".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Manifest has apiVersion 'v1' and kind 'ConfigMap', expected 'keycloak.org/v1alpha1' and 'KeycloakRealm'"
    );
}

#[test]
fn test_invalid_manifest_keeps_source() {
    let source = serde_json::from_value::<u8>(json!("nope")).unwrap_err();
    let error = ProviderError::InvalidManifest {
        kind: "KeycloakUser".to_string(),
        source,
    };

    assert!(error.to_string().starts_with("Manifest is not a valid KeycloakUser: "));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_json_type_names() {
    assert_eq!(json_type_name(&json!(null)), "null");
    assert_eq!(json_type_name(&json!(true)), "bool");
    assert_eq!(json_type_name(&json!(3)), "integer");
    assert_eq!(json_type_name(&json!(3.5)), "number");
    assert_eq!(json_type_name(&json!("x")), "string");
    assert_eq!(json_type_name(&json!([1])), "list");
    assert_eq!(json_type_name(&json!({"a": 1})), "object");
}
