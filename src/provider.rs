// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The provider: a registry of resource types.
//!
//! # Example
//!
//! ```rust,no_run
//! use terraform_provider_k8s::provider::Provider;
//!
//! let provider = Provider::new("0.1.0").unwrap();
//! for name in provider.resource_type_names() {
//!     println!("{name}");
//! }
//! ```

use crate::constants::{PROVIDER_REGISTRY_ADDRESS, PROVIDER_TYPE_NAME, SCHEMA_FORMAT_VERSION};
use crate::crds;
use crate::diagnostics::Diagnostics;
use crate::errors::{ProviderError, Result};
use crate::resource::Resource;
use crate::schema::Schema;
use crate::validation::validate_config;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Provider type name and version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    /// Type name used as prefix of every resource type (`k8s`)
    pub type_name: String,
    /// Provider version
    pub version: String,
}

/// Serves every registered resource type.
pub struct Provider {
    version: String,
    schema: Schema,
    resources: BTreeMap<String, Arc<dyn Resource>>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("version", &self.version)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Provider {
    /// Creates a provider serving all resources of [`crds::resources`].
    ///
    /// # Errors
    ///
    /// Returns an error if a resource schema cannot be derived.
    pub fn new(version: impl Into<String>) -> Result<Self> {
        Ok(Self::with_resources(version, crds::resources()?))
    }

    /// Creates a provider serving `resources`.
    #[must_use]
    pub fn with_resources(version: impl Into<String>, resources: Vec<Arc<dyn Resource>>) -> Self {
        let resources: BTreeMap<_, _> = resources
            .into_iter()
            .map(|resource| (resource.metadata(PROVIDER_TYPE_NAME), resource))
            .collect();
        debug!("Registered {} resource types", resources.len());

        Self {
            version: version.into(),
            schema: Schema::new("Provider for Kubernetes resources. Requires Terraform 1.0 or later."),
            resources,
        }
    }

    /// Type name and version.
    #[must_use]
    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    /// The provider configuration block. It has no attributes.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Checks the provider configuration. Any attribute is an error; `null`
    /// stands for an empty block.
    #[must_use]
    pub fn configure(&self, config: &Value) -> Diagnostics {
        let diagnostics = if config.is_null() {
            Diagnostics::new()
        } else {
            validate_config(&self.schema, config)
        };
        if !diagnostics.has_error() {
            info!("Configured provider {PROVIDER_TYPE_NAME} {}", self.version);
        }
        diagnostics
    }

    /// Sorted names of all resource types.
    #[must_use]
    pub fn resource_type_names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    /// Looks up a resource type.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownResourceType`] for unregistered names.
    pub fn resource(&self, type_name: &str) -> Result<Arc<dyn Resource>> {
        self.resources
            .get(type_name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownResourceType {
                type_name: type_name.to_string(),
            })
    }

    /// All resources, sorted by type name.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Arc<dyn Resource>)> {
        self.resources.iter().map(|(name, resource)| (name.as_str(), resource))
    }

    /// The document printed by `terraform providers schema -json`.
    #[must_use]
    pub fn schemas_json(&self) -> Value {
        let resource_schemas: Map<String, Value> = self
            .resources
            .iter()
            .map(|(name, resource)| (name.clone(), resource.schema().to_json()))
            .collect();

        json!({
            "format_version": SCHEMA_FORMAT_VERSION,
            "provider_schemas": {
                PROVIDER_REGISTRY_ADDRESS: {
                    "provider": self.schema.to_json(),
                    "resource_schemas": resource_schemas,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
