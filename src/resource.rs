// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource lifecycle protocol.
//!
//! Every Terraform resource type served by the provider implements
//! [`Resource`]. Requests and responses carry state as JSON objects keyed by
//! Terraform attribute name; problems are reported as [`Diagnostics`] rather
//! than errors so that a single call can return several of them alongside a
//! (possibly partial) state.

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use async_trait::async_trait;
use serde_json::Value;

/// Input of [`Resource::create`].
#[derive(Clone, Debug)]
pub struct CreateRequest {
    /// Planned state (the configuration with unknown computed values)
    pub plan: Value,
}

/// Input of [`Resource::read`].
#[derive(Clone, Debug)]
pub struct ReadRequest {
    /// State as recorded after the last apply
    pub state: Value,
}

/// Input of [`Resource::update`].
#[derive(Clone, Debug)]
pub struct UpdateRequest {
    /// Planned state
    pub plan: Value,
    /// Prior state
    pub state: Value,
}

/// Input of [`Resource::delete`].
#[derive(Clone, Debug)]
pub struct DeleteRequest {
    /// State being destroyed
    pub state: Value,
}

/// Input of [`Resource::import_state`].
#[derive(Clone, Debug)]
pub struct ImportStateRequest {
    /// A single YAML manifest of the resource
    pub manifest: String,
}

/// Result of a lifecycle call.
///
/// `state` is `None` when the resource was removed (delete) or when the call
/// failed before any state could be produced.
#[derive(Clone, Debug, Default)]
pub struct StateResponse {
    /// New state
    pub state: Option<Value>,
    /// Problems found while handling the request
    pub diagnostics: Diagnostics,
}

impl StateResponse {
    /// A successful response carrying `state`.
    #[must_use]
    pub fn with_state(state: Value) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    /// A failed response carrying only `diagnostics`.
    #[must_use]
    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }
}

/// A Terraform resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full resource type name, given the provider's type name (`k8s`).
    fn metadata(&self, provider_type_name: &str) -> String;

    /// The attribute table of this resource type.
    fn schema(&self) -> &Schema;

    /// Checks a configuration before planning.
    fn validate_config(&self, config: &Value) -> Diagnostics;

    /// Creates the resource from the planned state.
    async fn create(&self, request: CreateRequest) -> StateResponse;

    /// Refreshes the state.
    async fn read(&self, request: ReadRequest) -> StateResponse;

    /// Updates the resource to the planned state.
    async fn update(&self, request: UpdateRequest) -> StateResponse;

    /// Destroys the resource. A successful response carries no state.
    async fn delete(&self, request: DeleteRequest) -> StateResponse;

    /// Builds state from an existing manifest.
    async fn import_state(&self, request: ImportStateRequest) -> StateResponse;
}
