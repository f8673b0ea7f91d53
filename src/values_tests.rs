// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `values.rs`

use crate::diagnostics::{AttributePath, Diagnostics};
use crate::schema::{Attribute, AttributeKind, Attributes, ElementType};
use crate::values::{object_from_manifest, object_to_manifest, prune_nulls};
use serde_json::json;

fn realm_attributes() -> Attributes {
    let user: Attributes = [
        (
            "username".to_string(),
            Attribute::required(AttributeKind::String).with_manifest_name("username"),
        ),
        (
            "realm_roles".to_string(),
            Attribute::optional(AttributeKind::List(ElementType::String))
                .with_manifest_name("realmRoles"),
        ),
    ]
    .into();

    [
        (
            "id".to_string(),
            Attribute::computed(AttributeKind::String),
        ),
        (
            "display_name".to_string(),
            Attribute::optional(AttributeKind::String).with_manifest_name("displayName"),
        ),
        (
            "enabled".to_string(),
            Attribute::optional(AttributeKind::Bool).with_manifest_name("enabled"),
        ),
        (
            "token_lifespan".to_string(),
            Attribute::optional(AttributeKind::Int64).with_manifest_name("tokenLifespan"),
        ),
        (
            "port".to_string(),
            Attribute::optional(AttributeKind::IntOrString).with_manifest_name("port"),
        ),
        (
            "users".to_string(),
            Attribute::optional(AttributeKind::ListNested(user)).with_manifest_name("users"),
        ),
        (
            "attributes".to_string(),
            Attribute::optional(AttributeKind::Map(ElementType::String))
                .with_manifest_name("attributes"),
        ),
        (
            "extra".to_string(),
            Attribute::optional(AttributeKind::Dynamic).with_manifest_name("extra"),
        ),
    ]
    .into()
}

#[test]
fn test_to_manifest_renames_and_skips_nulls() {
    let state = json!({
        "id": "123",
        "display_name": "Example Realm",
        "enabled": true,
        "token_lifespan": null,
        "port": null,
        "users": [
            { "username": "alice", "realm_roles": ["admin", "user"] },
            { "username": "bob", "realm_roles": null }
        ],
        "attributes": { "frontendUrl": "https://sso.example.com" },
        "extra": null
    });

    let manifest = object_to_manifest(&realm_attributes(), &state, &AttributePath::empty()).unwrap();

    assert_eq!(
        manifest,
        json!({
            "displayName": "Example Realm",
            "enabled": true,
            "users": [
                { "username": "alice", "realmRoles": ["admin", "user"] },
                { "username": "bob" }
            ],
            "attributes": { "frontendUrl": "https://sso.example.com" }
        })
    );
}

#[test]
fn test_to_manifest_int_or_string() {
    let attrs = realm_attributes();

    let numeric = object_to_manifest(&attrs, &json!({"port": "8080"}), &AttributePath::empty())
        .unwrap();
    assert_eq!(numeric, json!({"port": 8080}));

    let named = object_to_manifest(&attrs, &json!({"port": "http"}), &AttributePath::empty())
        .unwrap();
    assert_eq!(named, json!({"port": "http"}));
}

#[test]
fn test_to_manifest_whole_floats_become_integers() {
    let manifest = object_to_manifest(
        &realm_attributes(),
        &json!({"token_lifespan": 300.0}),
        &AttributePath::empty(),
    )
    .unwrap();

    assert_eq!(manifest, json!({"tokenLifespan": 300}));
}

#[test]
fn test_to_manifest_type_mismatch_reports_path() {
    let error = object_to_manifest(
        &realm_attributes(),
        &json!({"users": [{"username": 7}]}),
        &AttributePath::root("spec"),
    )
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "Attribute 'spec.users[0].username' expected string, got integer"
    );
}

#[test]
fn test_to_manifest_rejects_non_objects() {
    assert!(object_to_manifest(&realm_attributes(), &json!("x"), &AttributePath::empty()).is_err());
}

#[test]
fn test_to_manifest_dynamic_passthrough_prunes_nulls() {
    let manifest = object_to_manifest(
        &realm_attributes(),
        &json!({"extra": {"a": 1, "b": null, "c": [null, {"d": null}]}}),
        &AttributePath::empty(),
    )
    .unwrap();

    assert_eq!(manifest, json!({"extra": {"a": 1, "c": [{}]}}));
}

#[test]
fn test_from_manifest_fills_nulls() {
    let mut diagnostics = Diagnostics::new();
    let state = object_from_manifest(
        &realm_attributes(),
        &json!({
            "displayName": "Example",
            "port": 8443,
            "users": [{ "username": "alice" }]
        }),
        &AttributePath::empty(),
        &mut diagnostics,
    );

    assert!(diagnostics.is_empty());
    assert_eq!(
        state,
        json!({
            "id": null,
            "display_name": "Example",
            "enabled": null,
            "token_lifespan": null,
            "port": "8443",
            "users": [{ "username": "alice", "realm_roles": null }],
            "attributes": null,
            "extra": null
        })
    );
}

#[test]
fn test_from_manifest_warns_on_unknown_fields() {
    let mut diagnostics = Diagnostics::new();
    object_from_manifest(
        &realm_attributes(),
        &json!({"displayName": "x", "sslRequired": "external"}),
        &AttributePath::root("spec"),
        &mut diagnostics,
    );

    assert!(!diagnostics.has_error());
    let warning = diagnostics.warnings().next().unwrap();
    assert!(warning.detail.contains("'sslRequired'"));
}

#[test]
fn test_from_manifest_reports_type_errors() {
    let mut diagnostics = Diagnostics::new();
    let state = object_from_manifest(
        &realm_attributes(),
        &json!({"enabled": "yes"}),
        &AttributePath::empty(),
        &mut diagnostics,
    );

    assert!(diagnostics.has_error());
    assert_eq!(state["enabled"], json!(null));
}

#[test]
fn test_round_trip_preserves_configured_values() {
    let attrs = realm_attributes();
    let manifest = json!({
        "displayName": "Example",
        "enabled": false,
        "tokenLifespan": 60,
        "users": [{ "username": "alice", "realmRoles": ["admin"] }]
    });

    let mut diagnostics = Diagnostics::new();
    let state = object_from_manifest(&attrs, &manifest, &AttributePath::empty(), &mut diagnostics);
    let back = object_to_manifest(&attrs, &state, &AttributePath::empty()).unwrap();

    assert_eq!(back, manifest);
}

#[test]
fn test_prune_nulls_keeps_falsy_values() {
    let pruned = prune_nulls(json!({"a": 0, "b": "", "c": false, "d": null, "e": []}));
    assert_eq!(pruned, json!({"a": 0, "b": "", "c": false, "e": []}));
}
