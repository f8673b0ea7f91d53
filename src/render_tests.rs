// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `render.rs`

use crate::constants::SUMMARY_MISSING_ARGUMENT;
use crate::provider::Provider;
use crate::render::{multi_document_yaml, render, write_manifests, RenderConfig, RenderedManifest};
use serde_json::json;

const CONFIG: &str = r#"
resources:
  - type: k8s_keycloak_org_keycloak_realm_v1alpha1_manifest
    name: example
    config:
      metadata:
        name: example
        namespace: sso
      spec:
        realm:
          realm: example
          enabled: true
  - type: k8s_keycloak_org_keycloak_user_v1alpha1_manifest
    name: alice
    config:
      metadata:
        name: alice
        namespace: sso
      spec:
        realm_selector:
          match_labels:
            app: sso
        user:
          username: alice
          email: alice@example.com
"#;

fn manifest(name: &str, yaml: &str) -> RenderedManifest {
    RenderedManifest {
        type_name: "k8s_example_widget_v1_manifest".to_string(),
        name: name.to_string(),
        state: json!({}),
        yaml: yaml.to_string(),
    }
}

#[test]
fn test_parse_config() {
    let config = RenderConfig::from_yaml(CONFIG).unwrap();

    assert_eq!(config.resources.len(), 2);
    assert_eq!(
        config.resources[1].address(),
        "k8s_keycloak_org_keycloak_user_v1alpha1_manifest.alice"
    );
    assert_eq!(config.resources[1].config["spec"]["user"]["username"], "alice");
}

#[test]
fn test_parse_config_rejects_malformed_yaml() {
    assert!(RenderConfig::from_yaml("resources: [").is_err());
}

#[tokio::test]
async fn test_render_all_resources() {
    let provider = Provider::new("0.0.0").unwrap();
    let config = RenderConfig::from_yaml(CONFIG).unwrap();

    let output = render(&provider, &config).await;

    assert!(!output.has_error(), "{:?}", output.diagnostics);
    assert_eq!(output.manifests.len(), 2);
    assert_eq!(output.manifests[0].name, "example");
    assert!(output.manifests[0].yaml.contains("kind: KeycloakRealm"));
    assert!(output.manifests[1].yaml.contains("email: alice@example.com"));
    assert_eq!(output.manifests[1].state["kind"], "KeycloakUser");
}

#[tokio::test]
async fn test_render_continues_after_failures() {
    let provider = Provider::new("0.0.0").unwrap();
    let mut config = RenderConfig::from_yaml(CONFIG).unwrap();
    config.resources[0].config["metadata"]["namespace"] = serde_json::Value::Null;
    config.resources.push(crate::render::RenderEntry {
        type_name: "k8s_unknown_manifest".to_string(),
        name: "nope".to_string(),
        config: json!({}),
    });

    let output = render(&provider, &config).await;

    assert!(output.has_error());
    assert_eq!(output.manifests.len(), 1);
    assert_eq!(output.manifests[0].name, "alice");

    assert_eq!(output.diagnostics.len(), 2);
    assert_eq!(
        output.diagnostics[0].address,
        "k8s_keycloak_org_keycloak_realm_v1alpha1_manifest.example"
    );
    assert_eq!(
        output.diagnostics[0].diagnostics.errors().next().unwrap().summary,
        SUMMARY_MISSING_ARGUMENT
    );
    assert_eq!(output.diagnostics[1].address, "k8s_unknown_manifest.nope");
}

#[test]
fn test_multi_document_yaml() {
    let joined = multi_document_yaml(&[manifest("a", "kind: A\n"), manifest("b", "kind: B\n")]);
    assert_eq!(joined, "---\nkind: A\n---\nkind: B\n");
    assert_eq!(multi_document_yaml(&[]), "");
}

#[tokio::test]
async fn test_write_manifests() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");

    let written = write_manifests(&target, &[manifest("a", "kind: A\n")])
        .await
        .unwrap();

    assert_eq!(
        written,
        vec![target.join("k8s_example_widget_v1_manifest.a.yaml")]
    );
    assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), "kind: A\n");
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let error = RenderConfig::load(&dir.path().join("missing.yaml"))
        .await
        .unwrap_err();
    assert!(error.to_string().contains("missing.yaml"));
}
