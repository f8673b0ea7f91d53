// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic manifest resource.
//!
//! [`ManifestResource`] serves one custom resource type as a Terraform
//! resource. Applying it does not talk to a cluster: the configuration is
//! turned into a Kubernetes manifest, checked by decoding it into the typed
//! custom resource, and stored as YAML in the computed `yaml` attribute.
//!
//! # Lifecycle
//!
//! | Operation | Behavior                                                   |
//! | --------- | ---------------------------------------------------------- |
//! | create    | plan → manifest → YAML; state gets `id`, `yaml`, `api_version`, `kind` |
//! | update    | same as create                                             |
//! | read      | prior state unchanged                                      |
//! | delete    | no-op, state removed                                       |
//! | import    | YAML manifest → state, then as create                      |

use crate::constants::{
    ATTR_API_VERSION, ATTR_ID, ATTR_KIND, ATTR_YAML, FIELD_API_VERSION, FIELD_KIND,
    REPORT_ISSUE_DETAIL, SUMMARY_IMPORT_FAILED, SUMMARY_MARSHAL_FAILED,
};
use crate::crd_schema::resource_schema;
use crate::diagnostics::{AttributePath, Diagnostics};
use crate::errors::{json_type_name, ProviderError, Result};
use crate::resource::{
    CreateRequest, DeleteRequest, ImportStateRequest, ReadRequest, Resource, StateResponse,
    UpdateRequest,
};
use crate::schema::Schema;
use crate::utilities::{resource_type_name, unix_nano_id};
use crate::validation::validate_config;
use crate::values::{object_from_manifest, object_to_manifest, prune_nulls};
use async_trait::async_trait;
use kube::CustomResourceExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Fields of an imported manifest that never map to configuration.
const IMPORT_IGNORED_FIELDS: [&str; 3] = [FIELD_API_VERSION, FIELD_KIND, "status"];

/// Terraform resource serving the custom resource `K`.
pub struct ManifestResource<K> {
    api_version: String,
    kind: String,
    group: String,
    version: String,
    schema: Schema,
    _marker: PhantomData<fn() -> K>,
}

impl<K> fmt::Debug for ManifestResource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestResource")
            .field("api_version", &self.api_version)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<K> ManifestResource<K>
where
    K: kube::Resource<DynamicType = ()>
        + CustomResourceExt
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static,
{
    /// Builds the resource, deriving its schema from `K::crd()`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingSchema`] if the CRD of `K` has no
    /// OpenAPI schema.
    pub fn new() -> Result<Self> {
        let schema = resource_schema(&K::crd())?;
        Ok(Self {
            api_version: K::api_version(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
            group: K::group(&()).into_owned(),
            version: K::version(&()).into_owned(),
            schema,
            _marker: PhantomData,
        })
    }

    /// `apiVersion` stamped into every manifest.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `kind` stamped into every manifest.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Converts a plan into the manifest of `K`.
    ///
    /// The result has `apiVersion` and `kind` set to the CRD constants and
    /// has passed a round trip through `K`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::TypeMismatch`] for mistyped plan values and
    /// [`ProviderError::InvalidManifest`] if the values do not form a `K`.
    pub fn manifest(&self, plan: &Value) -> Result<Value> {
        let mut manifest = object_to_manifest(&self.schema.attributes, plan, &AttributePath::empty())?;
        if let Some(object) = manifest.as_object_mut() {
            object.insert(FIELD_API_VERSION.to_string(), Value::from(self.api_version.clone()));
            object.insert(FIELD_KIND.to_string(), Value::from(self.kind.clone()));
        }

        let typed: K =
            serde_json::from_value(manifest).map_err(|source| ProviderError::InvalidManifest {
                kind: self.kind.clone(),
                source,
            })?;
        Ok(prune_nulls(serde_json::to_value(&typed)?))
    }

    /// Shared body of create and update.
    fn apply(&self, plan: &Value) -> StateResponse {
        let Some(object) = plan.as_object() else {
            return StateResponse::failed(
                ProviderError::InvalidState {
                    actual: json_type_name(plan).to_string(),
                }
                .into(),
            );
        };

        let manifest = match self.manifest(plan) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("Failed to build {} manifest: {e}", self.kind);
                return StateResponse::failed(e.into());
            }
        };

        let yaml = match serde_yaml::to_string(&manifest) {
            Ok(yaml) => yaml,
            Err(e) => {
                let mut diagnostics = Diagnostics::new();
                diagnostics.add_error(
                    SUMMARY_MARSHAL_FAILED,
                    format!(
                        "An unexpected error occurred while marshalling the resource. {REPORT_ISSUE_DETAIL}\n\n{}",
                        ProviderError::Marshal(e)
                    ),
                );
                return StateResponse::failed(diagnostics);
            }
        };

        let id = unix_nano_id();
        debug!("Rendered {} manifest {id} ({} bytes)", self.kind, yaml.len());

        let mut state = object.clone();
        state.insert(ATTR_ID.to_string(), Value::from(id));
        state.insert(ATTR_YAML.to_string(), Value::from(yaml));
        state.insert(ATTR_API_VERSION.to_string(), Value::from(self.api_version.clone()));
        state.insert(ATTR_KIND.to_string(), Value::from(self.kind.clone()));
        StateResponse::with_state(Value::Object(state))
    }

    /// Converts a YAML manifest of `K` into a state object without computed
    /// values, together with warnings about dropped fields.
    fn state_from_manifest(
        &self,
        manifest: &str,
    ) -> std::result::Result<(Value, Diagnostics), Diagnostics> {
        let parsed: Value = serde_yaml::from_str(manifest)
            .map_err(|e| import_failure(&ProviderError::ParseYaml(e)))?;
        let Some(object) = parsed.as_object() else {
            return Err(import_failure(&ProviderError::InvalidState {
                actual: json_type_name(&parsed).to_string(),
            }));
        };

        let found_api_version = object.get(FIELD_API_VERSION).and_then(Value::as_str).unwrap_or_default();
        let found_kind = object.get(FIELD_KIND).and_then(Value::as_str).unwrap_or_default();
        if found_api_version != self.api_version || found_kind != self.kind {
            return Err(import_failure(&ProviderError::ManifestTypeMismatch {
                api_version: self.api_version.clone(),
                kind: self.kind.clone(),
                found_api_version: found_api_version.to_string(),
                found_kind: found_kind.to_string(),
            }));
        }

        if let Err(source) = serde_json::from_value::<K>(parsed.clone()) {
            return Err(import_failure(&ProviderError::InvalidManifest {
                kind: self.kind.clone(),
                source,
            }));
        }

        let mut stripped = object.clone();
        for field in IMPORT_IGNORED_FIELDS {
            stripped.remove(field);
        }

        let mut diagnostics = Diagnostics::new();
        let state = object_from_manifest(
            &self.schema.attributes,
            &Value::Object(stripped),
            &AttributePath::empty(),
            &mut diagnostics,
        );
        if diagnostics.has_error() {
            return Err(diagnostics);
        }
        for warning in diagnostics.warnings() {
            debug!("Import of {}: {}", self.kind, warning.detail);
        }
        Ok((state, diagnostics))
    }
}

fn import_failure(error: &ProviderError) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_error(SUMMARY_IMPORT_FAILED, error.to_string());
    diagnostics
}

#[async_trait]
impl<K> Resource for ManifestResource<K>
where
    K: kube::Resource<DynamicType = ()>
        + CustomResourceExt
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static,
{
    fn metadata(&self, provider_type_name: &str) -> String {
        resource_type_name(provider_type_name, &self.group, &self.kind, &self.version)
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn validate_config(&self, config: &Value) -> Diagnostics {
        validate_config(&self.schema, config)
    }

    async fn create(&self, request: CreateRequest) -> StateResponse {
        info!("Creating {} manifest", self.kind);
        self.apply(&request.plan)
    }

    async fn read(&self, request: ReadRequest) -> StateResponse {
        StateResponse::with_state(request.state)
    }

    async fn update(&self, request: UpdateRequest) -> StateResponse {
        info!("Updating {} manifest", self.kind);
        self.apply(&request.plan)
    }

    async fn delete(&self, _request: DeleteRequest) -> StateResponse {
        debug!("Removing {} manifest from state", self.kind);
        StateResponse::default()
    }

    async fn import_state(&self, request: ImportStateRequest) -> StateResponse {
        info!("Importing {} manifest", self.kind);
        let (state, mut diagnostics) = match self.state_from_manifest(&request.manifest) {
            Ok(imported) => imported,
            Err(diagnostics) => return StateResponse::failed(diagnostics),
        };

        let mut response = self.apply(&state);
        diagnostics.extend(std::mem::take(&mut response.diagnostics));
        response.diagnostics = diagnostics;
        response
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod manifest_tests;
