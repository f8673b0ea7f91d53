// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! OpenTelemetry operator resources (`opentelemetry.io/v1alpha1`).
//!
//! - [`OpenTelemetryCollector`] - a collector deployment and its pipeline configuration
//! - [`Instrumentation`] - auto-instrumentation settings injected into workloads

use k8s_openapi::api::core::v1::{
    EnvFromSource, EnvVar, ResourceRequirements, ServicePort, Toleration, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenTelemetryCollectorSpec defines the desired state of OpenTelemetryCollector.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "opentelemetry.io",
    version = "v1alpha1",
    kind = "OpenTelemetryCollector",
    namespaced,
    doc = "OpenTelemetryCollector is the Schema for the opentelemetrycollectors API."
)]
#[serde(rename_all = "camelCase")]
pub struct OpenTelemetryCollectorSpec {
    /// ManagementState defines if the CR should be managed by the operator or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_state: Option<ManagementState>,

    /// Mode represents how the collector should be deployed (deployment, daemonset, statefulset or sidecar).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<CollectorMode>,

    /// Config is the raw YAML to be used as the collector's configuration.
    /// Refer to the OpenTelemetry Collector documentation for details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    /// Replicas is the number of pod instances for the underlying OpenTelemetry Collector.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub replicas: Option<i32>,

    /// Autoscaler specifies the pod autoscaling configuration to use for the
    /// OpenTelemetryCollector workload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaler: Option<AutoscalerSpec>,

    /// Image indicates the container image to use for the OpenTelemetry Collector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// ImagePullPolicy indicates the pull policy to be used for retrieving the container image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,

    /// UpgradeStrategy represents how the operator will handle upgrades to the
    /// CR when a newer version of the operator is deployed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_strategy: Option<UpgradeStrategy>,

    /// ServiceAccount indicates the name of an existing service account to use with this instance.
    /// When set, the operator will not automatically create a ServiceAccount for the collector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,

    /// HostNetwork indicates if the pod should run in the host networking namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,

    /// Args is the set of arguments to pass to the OpenTelemetry Collector binary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<BTreeMap<String, String>>,

    /// ENV vars to set on the OpenTelemetry Collector's Pods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    /// List of sources to populate environment variables on the OpenTelemetry Collector's Pods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_from: Option<Vec<EnvFromSource>>,

    /// Resources to set on the OpenTelemetry Collector pods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// NodeSelector to schedule OpenTelemetry Collector pods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    /// Toleration to schedule OpenTelemetry Collector pods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,

    /// Ports allows a set of ports to be exposed by the underlying v1.Service.
    /// By default, the operator will attempt to infer the required ports by
    /// parsing the .Spec.Config property but this property can be used to
    /// open additional ports that can't be inferred by the operator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ServicePort>>,

    /// VolumeMounts represents the mount points to use in the underlying collector deployment(s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_mounts: Option<Vec<VolumeMount>>,

    /// If specified, indicates the pod's priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,

    /// PodAnnotations is the set of annotations that will be attached to
    /// Collector and Target Allocator pods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_annotations: Option<BTreeMap<String, String>>,

    /// TargetAllocator indicates a value which determines whether to spawn a
    /// target allocation resource or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_allocator: Option<TargetAllocatorSpec>,

    /// Ingress is used to specify how OpenTelemetry Collector is exposed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressSpec>,

    /// ObservabilitySpec defines how telemetry data gets handled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability: Option<ObservabilitySpec>,
}

/// Whether the operator manages a collector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ManagementState {
    /// Managed by the operator
    Managed,
    /// Left alone by the operator
    Unmanaged,
}

/// How a collector is deployed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CollectorMode {
    /// One collector per node
    DaemonSet,
    /// A deployment of collectors
    Deployment,
    /// A sidecar injected into workloads
    Sidecar,
    /// A stateful set of collectors
    StatefulSet,
}

/// Upgrade handling on operator upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeStrategy {
    /// Upgrade automatically
    Automatic,
    /// Never upgrade
    None,
}

/// Pod autoscaling configuration of a collector.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalerSpec {
    /// MinReplicas sets a lower bound to the autoscaling feature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,

    /// MaxReplicas sets an upper bound to the autoscaling feature. If
    /// MaxReplicas is set autoscaling is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i32>,

    /// TargetCPUUtilization sets the target average CPU used across all replicas.
    #[serde(
        rename = "targetCPUUtilization",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(range(min = 1, max = 99))]
    pub target_cpu_utilization: Option<i32>,

    /// TargetMemoryUtilization sets the target average memory utilization across all replicas.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 99))]
    pub target_memory_utilization: Option<i32>,
}

/// Target allocator settings of a collector.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetAllocatorSpec {
    /// Enabled indicates whether to use a target allocation mechanism for
    /// Prometheus targets or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Image indicates the container image to use for the OpenTelemetry TargetAllocator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Replicas is the number of pod instances for the underlying TargetAllocator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// AllocationStrategy determines which strategy the target allocator
    /// should use for allocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_strategy: Option<AllocationStrategy>,

    /// FilterStrategy determines how to filter targets before allocating them
    /// among the collectors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_strategy: Option<String>,

    /// ServiceAccount indicates the name of an existing service account to use
    /// with this instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,

    /// PrometheusCR defines the configuration for the retrieval of
    /// PrometheusOperator CRDs.
    #[serde(rename = "prometheusCR", skip_serializing_if = "Option::is_none")]
    pub prometheus_cr: Option<PrometheusCRSpec>,
}

/// How the target allocator distributes targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationStrategy {
    /// Assign targets to the collector with the fewest targets
    LeastWeighted,
    /// Assign targets by consistent hashing
    ConsistentHashing,
}

/// Retrieval of Prometheus operator resources by the target allocator.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusCRSpec {
    /// Enabled indicates whether to use a PrometheusOperator custom resources
    /// as targets or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Interval between consecutive scrapes. Equivalent to the same setting on
    /// the Prometheus CRD.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^([0-9]+(\.[0-9]+)?(ns|us|µs|ms|s|m|h))+$"))]
    pub scrape_interval: Option<String>,
}

/// How the collector is exposed outside the cluster.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    /// Type default value is: "" Supported types are: ingress, route
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Hostname by which the ingress proxy can be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Annotations to add to ingress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// IngressClassName is the name of an IngressClass cluster resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,

    /// Port of the backing service, by name or number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_port: Option<IntOrString>,
}

/// Telemetry of the collector itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilitySpec {
    /// Metrics defines the metrics configuration for operands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsConfigSpec>,
}

/// Metrics settings of the collector.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfigSpec {
    /// EnableMetrics specifies if ServiceMonitor should be created for the
    /// OpenTelemetry Collector and Prometheus Exporters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_metrics: Option<bool>,
}

/// InstrumentationSpec defines the desired state of OpenTelemetry SDK and instrumentation.
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "opentelemetry.io",
    version = "v1alpha1",
    kind = "Instrumentation",
    namespaced,
    doc = "Instrumentation is the spec for OpenTelemetry instrumentation."
)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentationSpec {
    /// Exporter defines exporter configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exporter: Option<Exporter>,

    /// Propagators defines inter-process context propagation configuration.
    /// Values in this list will be set in the OTEL_PROPAGATORS env var.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagators: Option<Vec<Propagator>>,

    /// Sampler defines sampling configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampler: Option<Sampler>,

    /// Resource defines the configuration for the resource attributes, as
    /// defined by the OpenTelemetry specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceAttributesSpec>,

    /// Env defines common env vars. There are four layers for env vars'
    /// definitions and the precedence order is: `original container env vars`
    /// > `language specific env vars` > `common env vars` > `instrument spec
    /// configs' vars`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    /// Java defines configuration for java auto-instrumentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java: Option<LanguageSpec>,

    /// NodeJS defines configuration for nodejs auto-instrumentation.
    #[serde(rename = "nodejs", skip_serializing_if = "Option::is_none")]
    pub node_js: Option<LanguageSpec>,

    /// Python defines configuration for python auto-instrumentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<LanguageSpec>,

    /// DotNet defines configuration for DotNet auto-instrumentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dotnet: Option<LanguageSpec>,

    /// Go defines configuration for Go auto-instrumentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go: Option<LanguageSpec>,
}

/// Where instrumented workloads send telemetry.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exporter {
    /// Endpoint is address of the collector with OTLP endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Context propagation format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Propagator {
    /// W3C Trace Context
    TraceContext,
    /// W3C Baggage
    Baggage,
    /// B3 single header
    B3,
    /// B3 multi header
    B3Multi,
    /// Jaeger
    Jaeger,
    /// AWS X-Ray
    XRay,
    /// OpenTracing
    OtTrace,
    /// No propagation
    None,
}

/// Sampling configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    /// Type defines sampler type. The value will be set in the
    /// OTEL_TRACES_SAMPLER env var.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<SamplerType>,

    /// Argument defines sampler argument. The value depends on the sampler
    /// type. For instance for parentbased_traceidratio sampler type it is a
    /// number in range [0..1] e.g. 0.25.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

/// Sampler kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SamplerType {
    /// Sample everything
    AlwaysOn,
    /// Sample nothing
    AlwaysOff,
    /// Sample a ratio of traces
    #[serde(rename = "traceidratio")]
    TraceIdRatio,
    /// Parent based, sample everything
    #[serde(rename = "parentbased_always_on")]
    ParentBasedAlwaysOn,
    /// Parent based, sample nothing
    #[serde(rename = "parentbased_always_off")]
    ParentBasedAlwaysOff,
    /// Parent based, sample a ratio of traces
    #[serde(rename = "parentbased_traceidratio")]
    ParentBasedTraceIdRatio,
}

/// Resource attributes added to telemetry.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAttributesSpec {
    /// Attributes defines attributes that are added to the resource. For
    /// example environment: dev
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_attributes: Option<BTreeMap<String, String>>,

    /// AddK8sUIDAttributes defines whether K8s UID attributes should be
    /// collected (e.g. k8s.deployment.uid).
    #[serde(rename = "addK8sUIDAttributes", skip_serializing_if = "Option::is_none")]
    pub add_k8s_uid_attributes: Option<bool>,
}

/// Per-language auto-instrumentation settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSpec {
    /// Image is a container image with the SDK and auto-instrumentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Env defines language specific env vars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    /// Resources describes the compute resource requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[cfg(test)]
#[path = "opentelemetry_tests.rs"]
mod opentelemetry_tests;
