// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `schema.rs`

use crate::schema::{Attribute, AttributeKind, Attributes, ElementType, Schema};
use crate::validators::NameValidator;
use serde_json::json;

fn sample_schema() -> Schema {
    let users: Attributes = [
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

    let spec: Attributes = [
        (
            "users".to_string(),
            Attribute::optional(AttributeKind::ListNested(users)).with_manifest_name("users"),
        ),
        (
            "enabled".to_string(),
            Attribute::optional(AttributeKind::Bool).with_manifest_name("enabled"),
        ),
    ]
    .into();

    Schema::new("Realm")
        .with_attribute(
            "id",
            Attribute::computed(AttributeKind::String).with_description("Unique ID"),
        )
        .with_attribute(
            "name",
            Attribute::required(AttributeKind::String).with_validator(NameValidator),
        )
        .with_attribute(
            "spec",
            Attribute::optional(AttributeKind::SingleNested(spec)).with_manifest_name("spec"),
        )
}

#[test]
fn test_attribute_flags() {
    let required = Attribute::required(AttributeKind::String);
    let optional = Attribute::optional(AttributeKind::String);
    let computed = Attribute::computed(AttributeKind::String);

    assert!(required.required && !required.optional && !required.computed);
    assert!(!optional.required && optional.optional && !optional.computed);
    assert!(computed.is_read_only());
    assert!(!optional.is_read_only());
}

#[test]
fn test_attribute_at_walks_nesting() {
    let schema = sample_schema();

    let username = schema.attribute_at("spec.users.username").unwrap();
    assert!(username.required);
    assert_eq!(username.manifest_name.as_deref(), Some("username"));

    assert!(schema.attribute_at("spec.enabled").is_some());
    assert!(schema.attribute_at("spec.missing").is_none());
    assert!(schema.attribute_at("id.anything").is_none());
    assert_eq!(schema.attribute_at("name").unwrap().validators.len(), 1);
}

#[test]
fn test_leaf_paths_are_sorted_table() {
    let schema = sample_schema();

    assert_eq!(
        schema.leaf_paths(),
        vec![
            "id",
            "name",
            "spec.enabled",
            "spec.users.realm_roles",
            "spec.users.username",
        ]
    );
}

#[test]
fn test_type_names() {
    assert_eq!(AttributeKind::String.type_name(), "string");
    assert_eq!(AttributeKind::IntOrString.type_name(), "string");
    assert_eq!(AttributeKind::Int64.type_name(), "number");
    assert_eq!(
        AttributeKind::Map(ElementType::List(Box::new(ElementType::String))).type_name(),
        "map(list(string))"
    );
    assert_eq!(
        AttributeKind::ListNested(Attributes::new()).type_name(),
        "list(object)"
    );
}

#[test]
fn test_cty_types() {
    assert_eq!(ElementType::Int64.cty_type(), json!("number"));
    assert_eq!(
        ElementType::Map(Box::new(ElementType::Bool)).cty_type(),
        json!(["map", "bool"])
    );
}

#[test]
fn test_schema_json_representation() {
    let json = sample_schema().to_json();

    assert_eq!(json["version"], 0);
    assert_eq!(json["block"]["description"], "Realm");

    let id = &json["block"]["attributes"]["id"];
    assert_eq!(id["type"], "string");
    assert_eq!(id["computed"], true);
    assert_eq!(id["description"], "Unique ID");
    assert!(id.get("optional").is_none());

    let spec = &json["block"]["attributes"]["spec"];
    assert_eq!(spec["optional"], true);
    assert_eq!(spec["nested_type"]["nesting_mode"], "single");

    let users = &spec["nested_type"]["attributes"]["users"];
    assert_eq!(users["nested_type"]["nesting_mode"], "list");
    assert_eq!(
        users["nested_type"]["attributes"]["realm_roles"]["type"],
        json!(["list", "string"])
    );
}

#[test]
fn test_sensitive_flag_serialized() {
    let attr = Attribute::optional(AttributeKind::String).sensitive();
    assert_eq!(attr.to_json()["sensitive"], true);
}
