// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Local apply driver.
//!
//! Runs validation and create for a list of resource configurations without
//! Terraform, which is what the `render` command uses. The input is a YAML
//! document:
//!
//! ```yaml
//! resources:
//!   - type: k8s_keycloak_org_keycloak_realm_v1alpha1_manifest
//!     name: example
//!     config:
//!       metadata:
//!         name: example
//!         namespace: sso
//!       spec:
//!         realm:
//!           realm: example
//! ```

use crate::constants::{ATTR_YAML, YAML_DOCUMENT_SEPARATOR};
use crate::diagnostics::Diagnostics;
use crate::errors::{ProviderError, Result};
use crate::provider::Provider;
use crate::resource::CreateRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A list of resource configurations to render.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Resources, rendered in order
    #[serde(default)]
    pub resources: Vec<RenderEntry>,
}

/// One resource block.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RenderEntry {
    /// Resource type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Local name, unique per type
    pub name: String,
    /// Configuration, keyed by attribute name
    #[serde(default)]
    pub config: Value,
}

impl RenderEntry {
    /// Terraform-style address `type.name`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}.{}", self.type_name, self.name)
    }
}

impl RenderConfig {
    /// Parses a render configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ParseYaml`] for malformed documents.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(ProviderError::ParseYaml)
    }

    /// Reads and parses a render configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Io`] if the file cannot be read and
    /// [`ProviderError::ParseYaml`] for malformed documents.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ProviderError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_yaml(&contents)
    }
}

/// A successfully created resource.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedManifest {
    /// Resource type name
    pub type_name: String,
    /// Local name
    pub name: String,
    /// Resulting state
    pub state: Value,
    /// The rendered manifest
    pub yaml: String,
}

/// Diagnostics of one resource block.
#[derive(Clone, Debug, Serialize)]
pub struct ResourceDiagnostics {
    /// Address of the resource block (`type.name`)
    pub address: String,
    /// Problems found
    pub diagnostics: Diagnostics,
}

impl fmt::Display for ResourceDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}\n  with {}", diagnostic, self.address)?;
        }
        Ok(())
    }
}

/// Outcome of [`render`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct RenderOutput {
    /// Manifests of the resources that were created
    pub manifests: Vec<RenderedManifest>,
    /// Diagnostics per resource block, in input order
    pub diagnostics: Vec<ResourceDiagnostics>,
}

impl RenderOutput {
    /// Whether any resource failed.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.diagnostics.iter().any(|d| d.diagnostics.has_error())
    }

    fn record(&mut self, address: String, diagnostics: Diagnostics) {
        if !diagnostics.is_empty() {
            self.diagnostics.push(ResourceDiagnostics {
                address,
                diagnostics,
            });
        }
    }
}

/// Validates and creates every resource of `config`.
///
/// A failing resource does not stop the others.
pub async fn render(provider: &Provider, config: &RenderConfig) -> RenderOutput {
    let mut output = RenderOutput::default();

    for entry in &config.resources {
        let address = entry.address();
        let resource = match provider.resource(&entry.type_name) {
            Ok(resource) => resource,
            Err(e) => {
                warn!("Skipping {address}: {e}");
                output.record(address, e.into());
                continue;
            }
        };

        let mut diagnostics = resource.validate_config(&entry.config);
        if diagnostics.has_error() {
            warn!("Configuration of {address} is invalid");
            output.record(address, diagnostics);
            continue;
        }

        let response = resource
            .create(CreateRequest {
                plan: entry.config.clone(),
            })
            .await;
        diagnostics.extend(response.diagnostics);

        if let Some(state) = response.state.filter(|_| !diagnostics.has_error()) {
            let yaml = state
                .get(ATTR_YAML)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            debug!("Rendered {address}");
            output.manifests.push(RenderedManifest {
                type_name: entry.type_name.clone(),
                name: entry.name.clone(),
                state,
                yaml,
            });
        }
        output.record(address, diagnostics);
    }

    info!(
        "Rendered {} of {} resources",
        output.manifests.len(),
        config.resources.len()
    );
    output
}

/// Joins manifests into one multi-document YAML stream.
#[must_use]
pub fn multi_document_yaml(manifests: &[RenderedManifest]) -> String {
    manifests
        .iter()
        .map(|m| format!("{YAML_DOCUMENT_SEPARATOR}{}", m.yaml))
        .collect()
}

/// Writes each manifest to `<dir>/<type>.<name>.yaml`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`ProviderError::Io`] if a directory or file cannot be written.
pub async fn write_manifests(dir: &Path, manifests: &[RenderedManifest]) -> Result<Vec<PathBuf>> {
    let io_error = |path: &Path| {
        let path = path.display().to_string();
        move |source| ProviderError::Io { path, source }
    };

    tokio::fs::create_dir_all(dir).await.map_err(io_error(dir))?;

    let mut written = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        let path = dir.join(format!("{}.{}.yaml", manifest.type_name, manifest.name));
        tokio::fs::write(&path, &manifest.yaml)
            .await
            .map_err(io_error(&path))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
