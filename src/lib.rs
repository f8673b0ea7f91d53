// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # terraform-provider-k8s - Kubernetes custom resources as Terraform resources
//!
//! Every supported Custom Resource Definition (CRD) is exposed as a Terraform
//! resource whose schema mirrors the CRD. Applying a resource does not contact
//! a cluster: the configuration is rendered into a YAML manifest that is
//! stored in the computed `yaml` attribute, ready to be handed to another
//! provider or written to disk.
//!
//! ## Overview
//!
//! - Typed custom resources are plain `kube` structs ([`crds`])
//! - Terraform schemas are derived from the generated CRDs ([`crd_schema`])
//! - One generic resource implements the lifecycle for all of them ([`manifest`])
//!
//! ## Modules
//!
//! - [`provider`] - Registry of resource types and the provider schema document
//! - [`resource`] - Lifecycle protocol shared by all resources
//! - [`manifest`] - Generic manifest resource
//! - [`crds`] - Supported custom resources
//! - [`schema`] - Terraform schema model
//! - [`crd_schema`] - Schema derivation from CRD OpenAPI schemas
//! - [`values`] - Conversion between state and manifest values
//! - [`validation`] - Configuration validation
//! - [`validators`] - Attribute validators
//! - [`render`] - Local apply driver used by the CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use terraform_provider_k8s::provider::Provider;
//! use terraform_provider_k8s::resource::CreateRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::new("0.1.0")?;
//! let realm = provider.resource("k8s_keycloak_org_keycloak_realm_v1alpha1_manifest")?;
//!
//! let response = realm
//!     .create(CreateRequest {
//!         plan: json!({
//!             "metadata": { "name": "example", "namespace": "sso" },
//!             "spec": { "realm": { "realm": "example", "enabled": true } }
//!         }),
//!     })
//!     .await;
//!
//! println!("{}", response.state.unwrap()["yaml"]);
//! # Ok(())
//! # }
//! ```

#![recursion_limit = "256"]

pub mod constants;
pub mod crd_schema;
pub mod crds;
pub mod diagnostics;
pub mod errors;
pub mod manifest;
pub mod provider;
pub mod render;
pub mod resource;
pub mod schema;
pub mod utilities;
pub mod validation;
pub mod validators;
pub mod values;
