// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use terraform_provider_k8s::provider::Provider;

pub const REALM: &str = "k8s_keycloak_org_keycloak_realm_v1alpha1_manifest";
pub const CLIENT: &str = "k8s_keycloak_org_keycloak_client_v1alpha1_manifest";

/// Provider serving every resource type
pub fn provider() -> Provider {
    Provider::new("0.0.0-test").expect("provider builds")
}

/// A realm configuration as Terraform would plan it
pub fn realm_plan(name: &str) -> Value {
    json!({
        "id": null,
        "yaml": null,
        "api_version": null,
        "kind": null,
        "metadata": {
            "name": name,
            "namespace": "sso",
            "labels": { "app.kubernetes.io/name": "keycloak" },
            "annotations": null
        },
        "spec": {
            "instance_selector": {
                "match_labels": { "app": "sso" },
                "match_expressions": null
            },
            "realm": {
                "realm": name,
                "enabled": true,
                "display_name": "Example Realm",
                "ssl_required": "external",
                "supported_locales": ["en", "de"],
                "smtp_server": { "host": "smtp.example.com", "port": "587" }
            }
        }
    })
}

/// A client configuration as Terraform would plan it
pub fn client_plan(name: &str) -> Value {
    json!({
        "metadata": { "name": name, "namespace": "sso" },
        "spec": {
            "realm_selector": { "match_labels": { "realm": "example" } },
            "client": {
                "client_id": name,
                "public_client": true,
                "redirect_uris": ["https://app.example.com/*"],
                "protocol_mappers": [{
                    "name": "groups",
                    "protocol": "openid-connect",
                    "protocol_mapper": "oidc-group-membership-mapper",
                    "config": { "claim.name": "groups", "full.path": "false" }
                }]
            }
        }
    })
}

/// Parses the `yaml` attribute of a state object
pub fn manifest_of(state: &Value) -> Value {
    serde_yaml::from_str(state["yaml"].as_str().expect("yaml is set")).expect("yaml parses")
}
