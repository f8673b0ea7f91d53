// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `validation.rs`

use crate::constants::{
    SUMMARY_INCORRECT_TYPE, SUMMARY_INVALID_VALUE, SUMMARY_MISSING_ARGUMENT,
    SUMMARY_READ_ONLY_ATTRIBUTE, SUMMARY_UNSUPPORTED_ARGUMENT,
};
use crate::crd_schema::metadata_attribute;
use crate::schema::{Attribute, AttributeKind, Attributes, ElementType, Schema};
use crate::validation::validate_config;
use crate::diagnostics::AttributePath;
use crate::validators::OneOfValidator;
use crate::values::object_to_manifest;
use serde_json::json;

fn client_schema() -> Schema {
    let redirect: Attributes = [(
        "uri".to_string(),
        Attribute::required(AttributeKind::String).with_manifest_name("uri"),
    )]
    .into();

    let spec: Attributes = [
        (
            "client_id".to_string(),
            Attribute::required(AttributeKind::String).with_manifest_name("clientId"),
        ),
        (
            "access_type".to_string(),
            Attribute::optional(AttributeKind::String)
                .with_manifest_name("accessType")
                .with_validator(OneOfValidator::new(vec![json!("public"), json!("confidential")])),
        ),
        (
            "port".to_string(),
            Attribute::optional(AttributeKind::IntOrString).with_manifest_name("port"),
        ),
        (
            "timeout".to_string(),
            Attribute::optional(AttributeKind::Int64).with_manifest_name("timeout"),
        ),
        (
            "scopes".to_string(),
            Attribute::optional(AttributeKind::List(ElementType::String))
                .with_manifest_name("scopes"),
        ),
        (
            "redirects".to_string(),
            Attribute::optional(AttributeKind::ListNested(redirect)).with_manifest_name("redirects"),
        ),
    ]
    .into();

    Schema::new("Client")
        .with_attribute("id", Attribute::computed(AttributeKind::String))
        .with_attribute("yaml", Attribute::computed(AttributeKind::String))
        .with_attribute("metadata", metadata_attribute(true))
        .with_attribute(
            "spec",
            Attribute::required(AttributeKind::SingleNested(spec)).with_manifest_name("spec"),
        )
}

fn summaries(config: serde_json::Value) -> Vec<(String, String)> {
    validate_config(&client_schema(), &config)
        .iter()
        .map(|d| {
            (
                d.summary.clone(),
                d.attribute.as_ref().map(ToString::to_string).unwrap_or_default(),
            )
        })
        .collect()
}

#[test]
fn test_valid_config_has_no_diagnostics() {
    let diagnostics = validate_config(
        &client_schema(),
        &json!({
            "id": null,
            "metadata": { "name": "web", "namespace": "sso", "labels": { "app": "web" } },
            "spec": {
                "client_id": "web",
                "access_type": "public",
                "port": 8443,
                "scopes": ["openid", null],
                "redirects": [{ "uri": "https://example.com/*" }]
            }
        }),
    );

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn test_unsupported_argument() {
    let found = summaries(json!({
        "metadata": { "name": "web", "namespace": "sso" },
        "spec": { "client_id": "web", "clientId": "web" }
    }));

    assert_eq!(
        found,
        vec![(SUMMARY_UNSUPPORTED_ARGUMENT.to_string(), "spec.clientId".to_string())]
    );
}

#[test]
fn test_missing_required_arguments() {
    let found = summaries(json!({ "metadata": { "name": "web" } }));

    assert_eq!(
        found,
        vec![
            (SUMMARY_MISSING_ARGUMENT.to_string(), "metadata.namespace".to_string()),
            (SUMMARY_MISSING_ARGUMENT.to_string(), "spec".to_string()),
        ]
    );
}

#[test]
fn test_read_only_attribute() {
    let found = summaries(json!({
        "id": "123",
        "metadata": { "name": "web", "namespace": "sso" },
        "spec": { "client_id": "web" }
    }));

    assert_eq!(
        found,
        vec![(SUMMARY_READ_ONLY_ATTRIBUTE.to_string(), "id".to_string())]
    );
}

#[test]
fn test_incorrect_types_are_reported_per_element() {
    let diagnostics = validate_config(
        &client_schema(),
        &json!({
            "metadata": { "name": "web", "namespace": "sso" },
            "spec": {
                "client_id": 42,
                "port": true,
                "scopes": ["openid", 7],
                "redirects": [{ "uri": "ok" }, "not-an-object"]
            }
        }),
    );

    let paths: Vec<String> = diagnostics
        .errors()
        .inspect(|d| assert_eq!(d.summary, SUMMARY_INCORRECT_TYPE))
        .filter_map(|d| d.attribute.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(
        paths,
        vec![
            "spec.client_id",
            "spec.port",
            "spec.redirects[1]",
            "spec.scopes[1]",
        ]
    );
}

#[test]
fn test_type_error_detail() {
    let diagnostics = validate_config(
        &client_schema(),
        &json!({
            "metadata": { "name": "web", "namespace": "sso" },
            "spec": { "client_id": ["web"] }
        }),
    );

    let error = diagnostics.errors().next().unwrap();
    assert_eq!(
        error.detail,
        "Inappropriate value for attribute \"spec.client_id\": string required, got list."
    );
}

#[test]
fn test_validators_run_after_type_checks() {
    let found = summaries(json!({
        "metadata": { "name": "Not_A_Name", "namespace": "sso" },
        "spec": { "client_id": "web", "access_type": "bearer-only" }
    }));

    assert_eq!(
        found,
        vec![
            (SUMMARY_INVALID_VALUE.to_string(), "metadata.name".to_string()),
            (SUMMARY_INVALID_VALUE.to_string(), "spec.access_type".to_string()),
        ]
    );
}

#[test]
fn test_validators_skipped_on_wrong_type() {
    let found = summaries(json!({
        "metadata": { "name": "web", "namespace": "sso" },
        "spec": { "client_id": "web", "access_type": 1 }
    }));

    assert_eq!(
        found,
        vec![(SUMMARY_INCORRECT_TYPE.to_string(), "spec.access_type".to_string())]
    );
}

#[test]
fn test_non_object_config() {
    let diagnostics = validate_config(&client_schema(), &json!("nope"));
    let error = diagnostics.errors().next().unwrap();

    assert_eq!(error.summary, SUMMARY_INCORRECT_TYPE);
    assert!(error.detail.starts_with("Inappropriate value for resource"));
}

#[test]
fn test_integer_checks_agree_with_manifest_conversion() {
    let schema = client_schema();
    let config = |timeout: serde_json::Value| {
        json!({
            "metadata": { "name": "web", "namespace": "sso" },
            "spec": { "client_id": "web", "timeout": timeout }
        })
    };

    let whole = config(json!(30.0));
    assert!(validate_config(&schema, &whole).is_empty());
    assert!(object_to_manifest(&schema.attributes, &whole, &AttributePath::empty()).is_ok());

    let huge = config(json!(1.0e16));
    assert_eq!(
        summaries(huge.clone()),
        vec![(SUMMARY_INCORRECT_TYPE.to_string(), "spec.timeout".to_string())]
    );
    assert!(object_to_manifest(&schema.attributes, &huge, &AttributePath::empty()).is_err());
}
