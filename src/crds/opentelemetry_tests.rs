// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `opentelemetry.rs`

use super::{Instrumentation, OpenTelemetryCollector};
use crate::crd_schema::resource_schema;
use crate::diagnostics::{AttributePath, Diagnostics};
use crate::manifest::ManifestResource;
use crate::resource::{CreateRequest, Resource};
use crate::schema::AttributeKind;
use kube::CustomResourceExt;
use serde_json::json;

#[test]
fn test_crd_names() {
    let collector = OpenTelemetryCollector::crd();
    assert_eq!(collector.spec.group, "opentelemetry.io");
    assert_eq!(collector.spec.names.plural, "opentelemetrycollectors");
    assert_eq!(collector.spec.scope, "Namespaced");

    assert_eq!(Instrumentation::crd().spec.names.plural, "instrumentations");
}

#[test]
fn test_collector_schema() {
    let schema = resource_schema(&OpenTelemetryCollector::crd()).unwrap();

    let cpu = schema
        .attribute_at("spec.autoscaler.target_cpu_utilization")
        .unwrap();
    assert!(matches!(cpu.kind, AttributeKind::Int64));
    assert_eq!(cpu.manifest_name.as_deref(), Some("targetCPUUtilization"));

    assert!(matches!(
        schema.attribute_at("spec.ports.target_port").unwrap().kind,
        AttributeKind::IntOrString
    ));
    assert!(schema.attribute_at("spec.ports.port").unwrap().required);
    assert!(matches!(
        schema.attribute_at("spec.env").unwrap().kind,
        AttributeKind::ListNested(_)
    ));
    assert!(schema
        .attribute_at("spec.env.value_from.secret_key_ref.key")
        .is_some());
    assert!(matches!(
        schema.attribute_at("spec.resources.limits").unwrap().kind,
        AttributeKind::Map(_)
    ));
    assert_eq!(
        schema
            .attribute_at("spec.target_allocator.prometheus_cr")
            .unwrap()
            .manifest_name
            .as_deref(),
        Some("prometheusCR")
    );
}

#[test]
fn test_collector_mode_validator() {
    let schema = resource_schema(&OpenTelemetryCollector::crd()).unwrap();
    let mode = schema.attribute_at("spec.mode").unwrap();
    let path = AttributePath::root("spec").attribute("mode");

    let mut diagnostics = Diagnostics::new();
    for validator in &mode.validators {
        validator.validate(&path, &json!("daemonset"), &mut diagnostics);
    }
    assert!(diagnostics.is_empty());

    for validator in &mode.validators {
        validator.validate(&path, &json!("replicaset"), &mut diagnostics);
    }
    assert!(diagnostics.has_error());
}

#[test]
fn test_instrumentation_schema() {
    let schema = resource_schema(&Instrumentation::crd()).unwrap();

    assert_eq!(
        schema
            .attribute_at("spec.nodejs")
            .unwrap()
            .manifest_name
            .as_deref(),
        Some("nodejs")
    );
    assert!(schema.attribute_at("spec.sampler.type").is_some());
    assert_eq!(
        schema
            .attribute_at("spec.resource.add_k8s_uid_attributes")
            .unwrap()
            .manifest_name
            .as_deref(),
        Some("addK8sUIDAttributes")
    );
    assert!(matches!(
        schema.attribute_at("spec.propagators").unwrap().kind,
        AttributeKind::List(_)
    ));
}

#[tokio::test]
async fn test_collector_manifest() {
    let resource = ManifestResource::<OpenTelemetryCollector>::new().unwrap();
    let plan = json!({
        "metadata": { "name": "otel", "namespace": "observability" },
        "spec": {
            "mode": "deployment",
            "config": "receivers:\n  otlp: {}\n",
            "replicas": 2,
            "ports": [
                { "name": "metrics", "port": 8888, "target_port": "8888" },
                { "name": "health", "port": 13133, "target_port": "health" }
            ],
            "env": [{ "name": "GOMEMLIMIT", "value": "400MiB" }],
            "autoscaler": { "max_replicas": 5, "target_cpu_utilization": 80 }
        }
    });

    let response = resource.create(CreateRequest { plan }).await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

    let state = response.state.unwrap();
    let manifest: serde_json::Value =
        serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();

    assert_eq!(manifest["apiVersion"], "opentelemetry.io/v1alpha1");
    assert_eq!(manifest["kind"], "OpenTelemetryCollector");
    assert_eq!(manifest["spec"]["mode"], "deployment");
    assert_eq!(manifest["spec"]["config"], "receivers:\n  otlp: {}\n");
    assert_eq!(manifest["spec"]["ports"][0]["targetPort"], 8888);
    assert_eq!(manifest["spec"]["ports"][1]["targetPort"], "health");
    assert_eq!(manifest["spec"]["env"][0]["value"], "400MiB");
    assert_eq!(manifest["spec"]["autoscaler"]["targetCPUUtilization"], 80);
    assert_eq!(
        resource.metadata("k8s"),
        "k8s_opentelemetry_io_open_telemetry_collector_v1alpha1_manifest"
    );
}

#[tokio::test]
async fn test_instrumentation_manifest() {
    let resource = ManifestResource::<Instrumentation>::new().unwrap();
    let plan = json!({
        "metadata": { "name": "auto", "namespace": "apps" },
        "spec": {
            "exporter": { "endpoint": "http://otel-collector:4317" },
            "propagators": ["tracecontext", "baggage"],
            "sampler": { "type": "parentbased_traceidratio", "argument": "0.25" },
            "nodejs": { "image": "ghcr.io/open-telemetry/autoinstrumentation-nodejs:latest" }
        }
    });

    let response = resource.create(CreateRequest { plan }).await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

    let state = response.state.unwrap();
    let manifest: serde_json::Value =
        serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();
    assert_eq!(manifest["spec"]["propagators"], json!(["tracecontext", "baggage"]));
    assert_eq!(manifest["spec"]["sampler"]["type"], "parentbased_traceidratio");
    assert!(manifest["spec"]["nodejs"]["image"].is_string());
}
