// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `utilities.rs`

use crate::utilities::{resource_type_name, sanitize_attribute_name, to_snake_case, unix_nano_id};

#[test]
fn test_snake_case_camel() {
    assert_eq!(to_snake_case("realm"), "realm");
    assert_eq!(to_snake_case("displayName"), "display_name");
    assert_eq!(to_snake_case("displayNameHtml"), "display_name_html");
    assert_eq!(to_snake_case("apiVersion"), "api_version");
}

#[test]
fn test_snake_case_acronyms() {
    assert_eq!(to_snake_case("targetCPUUtilization"), "target_cpu_utilization");
    assert_eq!(to_snake_case("hostIPC"), "host_ipc");
    assert_eq!(to_snake_case("OpenTelemetryCollector"), "open_telemetry_collector");
    assert_eq!(to_snake_case("URL"), "url");
}

#[test]
fn test_snake_case_digits_and_symbols() {
    assert_eq!(to_snake_case("x509Certificate"), "x509_certificate");
    assert_eq!(to_snake_case("$ref"), "ref");
    assert_eq!(to_snake_case("app.kubernetes.io/name"), "app_kubernetes_io_name");
    assert_eq!(to_snake_case("trailing-"), "trailing");
    assert_eq!(to_snake_case("already_snake"), "already_snake");
}

#[test]
fn test_sanitize_attribute_name() {
    assert_eq!(sanitize_attribute_name("keycloak.org"), "keycloak_org");
    assert_eq!(sanitize_attribute_name("Foo-Bar"), "foo_bar");
    assert_eq!(sanitize_attribute_name("v1alpha1"), "v1alpha1");
}

#[test]
fn test_resource_type_name() {
    assert_eq!(
        resource_type_name("k8s", "keycloak.org", "KeycloakRealm", "v1alpha1"),
        "k8s_keycloak_org_keycloak_realm_v1alpha1_manifest"
    );
    assert_eq!(
        resource_type_name("k8s", "opentelemetry.io", "OpenTelemetryCollector", "v1alpha1"),
        "k8s_opentelemetry_io_open_telemetry_collector_v1alpha1_manifest"
    );
}

#[test]
fn test_unix_nano_id_is_numeric_and_increasing() {
    let first = unix_nano_id();
    let second = unix_nano_id();

    let first: i64 = first.parse().expect("id must be numeric");
    let second: i64 = second.parse().expect("id must be numeric");
    assert!(first > 0);
    assert!(second >= first);
}
