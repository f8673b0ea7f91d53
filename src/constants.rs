// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the Kubernetes manifest provider.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Provider Constants
// ============================================================================

/// Terraform type name of this provider; prefixes every resource type name
pub const PROVIDER_TYPE_NAME: &str = "k8s";

/// Registry address used as key in `providers schema -json` output
pub const PROVIDER_REGISTRY_ADDRESS: &str = "registry.terraform.io/metio/k8s";

/// Suffix appended to every resource type name
pub const RESOURCE_TYPE_SUFFIX: &str = "manifest";

/// Format version of the JSON schema document emitted by `schema`
pub const SCHEMA_FORMAT_VERSION: &str = "1.0";

// ============================================================================
// Attribute Names
// ============================================================================

/// Computed resource identifier
pub const ATTR_ID: &str = "id";

/// Computed YAML manifest
pub const ATTR_YAML: &str = "yaml";

/// Computed `apiVersion` of the manifest
pub const ATTR_API_VERSION: &str = "api_version";

/// Computed `kind` of the manifest
pub const ATTR_KIND: &str = "kind";

/// Object metadata block
pub const ATTR_METADATA: &str = "metadata";

/// Resource specification block
pub const ATTR_SPEC: &str = "spec";

/// `metadata.name`
pub const ATTR_NAME: &str = "name";

/// `metadata.namespace`
pub const ATTR_NAMESPACE: &str = "namespace";

/// `metadata.labels`
pub const ATTR_LABELS: &str = "labels";

/// `metadata.annotations`
pub const ATTR_ANNOTATIONS: &str = "annotations";

// ============================================================================
// Manifest Field Names
// ============================================================================

/// Manifest field holding the group/version
pub const FIELD_API_VERSION: &str = "apiVersion";

/// Manifest field holding the kind
pub const FIELD_KIND: &str = "kind";

// ============================================================================
// Kubernetes Validation Limits
// https://kubernetes.io/docs/concepts/overview/working-with-objects/names/
// ============================================================================

/// Maximum length of a DNS-1123 subdomain (object names, label key prefixes)
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

/// Maximum length of the name part of a qualified name and of label values
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;

/// Maximum length of a label value
pub const LABEL_VALUE_MAX_LENGTH: usize = 63;

/// Maximum combined size of all annotation keys and values (256 KiB)
pub const TOTAL_ANNOTATION_SIZE_LIMIT_BYTES: usize = 256 * 1024;

// ============================================================================
// Diagnostic Summaries
// ============================================================================

/// Summary used when YAML serialization fails
pub const SUMMARY_MARSHAL_FAILED: &str = "Unable to marshal resource";

/// Summary used when the configured values do not form a valid custom resource
pub const SUMMARY_DECODE_FAILED: &str = "Unable to build manifest";

/// Summary used when a manifest passed to import cannot be used
pub const SUMMARY_IMPORT_FAILED: &str = "Unable to import manifest";

/// Summary for configuration keys absent from the schema
pub const SUMMARY_UNSUPPORTED_ARGUMENT: &str = "Unsupported argument";

/// Summary for absent required attributes
pub const SUMMARY_MISSING_ARGUMENT: &str = "Missing required argument";

/// Summary for values set on computed-only attributes
pub const SUMMARY_READ_ONLY_ATTRIBUTE: &str = "Invalid Configuration for Read-Only Attribute";

/// Summary for values whose type does not match the schema
pub const SUMMARY_INCORRECT_TYPE: &str = "Incorrect attribute value type";

/// Summary used by attribute validators
pub const SUMMARY_INVALID_VALUE: &str = "Invalid Attribute Value";

/// Detail appended to internal errors
pub const REPORT_ISSUE_DETAIL: &str =
    "Please report this issue to the provider developers.";

// ============================================================================
// Environment
// ============================================================================

/// Default output directory for rendered manifests
pub const ENV_OUTPUT_DIR: &str = "TF_K8S_OUTPUT_DIR";

/// YAML document separator used for multi-document output
pub const YAML_DOCUMENT_SEPARATOR: &str = "---\n";
