// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `keycloak.rs`

use super::{KeycloakClient, KeycloakRealm, KeycloakUser};
use crate::crd_schema::resource_schema;
use crate::schema::{AttributeKind, ElementType};
use kube::CustomResourceExt;

#[test]
fn test_crd_names() {
    let realm = KeycloakRealm::crd();
    assert_eq!(realm.spec.group, "keycloak.org");
    assert_eq!(realm.spec.names.plural, "keycloakrealms");
    assert_eq!(realm.spec.scope, "Namespaced");
    assert_eq!(realm.spec.versions[0].name, "v1alpha1");

    assert_eq!(KeycloakClient::crd().spec.names.kind, "KeycloakClient");
    assert_eq!(KeycloakUser::crd().spec.names.kind, "KeycloakUser");
}

#[test]
fn test_realm_schema() {
    let schema = resource_schema(&KeycloakRealm::crd()).unwrap();

    assert!(schema.attribute_at("spec").unwrap().required);
    assert!(schema.attribute_at("spec.realm").unwrap().required);
    assert!(schema.attribute_at("spec.realm.realm").unwrap().required);
    assert!(schema.attribute_at("spec.realm.display_name").unwrap().optional);
    assert!(matches!(
        schema.attribute_at("spec.realm.users").unwrap().kind,
        AttributeKind::ListNested(_)
    ));
    assert!(matches!(
        schema.attribute_at("spec.realm.users.client_roles").unwrap().kind,
        AttributeKind::Map(ElementType::List(_))
    ));
    assert!(matches!(
        schema.attribute_at("spec.instance_selector.match_labels").unwrap().kind,
        AttributeKind::Map(ElementType::String)
    ));
    assert_eq!(
        schema
            .attribute_at("spec.realm.users.credentials.type")
            .unwrap()
            .manifest_name
            .as_deref(),
        Some("type")
    );
    assert!(!schema
        .attribute_at("spec.realm.ssl_required")
        .unwrap()
        .validators
        .is_empty());
}

#[test]
fn test_client_schema() {
    let schema = resource_schema(&KeycloakClient::crd()).unwrap();

    assert!(schema.attribute_at("spec.realm_selector").unwrap().required);
    assert!(schema.attribute_at("spec.client.client_id").unwrap().required);
    assert_eq!(
        schema
            .attribute_at("spec.client.redirect_uris")
            .unwrap()
            .manifest_name
            .as_deref(),
        Some("redirectUris")
    );
    assert!(matches!(
        schema.attribute_at("spec.client.access").unwrap().kind,
        AttributeKind::Map(ElementType::Bool)
    ));
    assert!(matches!(
        schema.attribute_at("spec.roles").unwrap().kind,
        AttributeKind::ListNested(_)
    ));
}

#[test]
fn test_user_schema() {
    let schema = resource_schema(&KeycloakUser::crd()).unwrap();

    assert!(schema.attribute_at("spec.user").unwrap().required);
    assert!(schema.attribute_at("spec.user.email_verified").is_some());
    assert!(schema.attribute_at("spec.realm_selector.match_expressions.operator").is_some());
}
