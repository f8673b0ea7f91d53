// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom resources served by the provider.
//!
//! Each custom resource is a typed `kube` struct; its Terraform schema is
//! derived from the generated CRD, see [`crate::crd_schema`].
//!
//! # Resource Types
//!
//! ## Keycloak (`keycloak.org/v1alpha1`)
//!
//! - [`keycloak::KeycloakRealm`]
//! - [`keycloak::KeycloakClient`]
//! - [`keycloak::KeycloakUser`]
//!
//! ## OpenTelemetry (`opentelemetry.io/v1alpha1`)
//!
//! - [`opentelemetry::OpenTelemetryCollector`]
//! - [`opentelemetry::Instrumentation`]

pub mod keycloak;
pub mod opentelemetry;

use crate::errors::Result;
use crate::manifest::ManifestResource;
use crate::resource::Resource;
use std::sync::Arc;

/// All resources served by the provider.
///
/// # Errors
///
/// Returns an error if the schema of any CRD cannot be derived.
pub fn resources() -> Result<Vec<Arc<dyn Resource>>> {
    Ok(vec![
        Arc::new(ManifestResource::<keycloak::KeycloakRealm>::new()?),
        Arc::new(ManifestResource::<keycloak::KeycloakClient>::new()?),
        Arc::new(ManifestResource::<keycloak::KeycloakUser>::new()?),
        Arc::new(ManifestResource::<opentelemetry::OpenTelemetryCollector>::new()?),
        Arc::new(ManifestResource::<opentelemetry::Instrumentation>::new()?),
    ])
}
