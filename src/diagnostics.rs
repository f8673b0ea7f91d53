// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Terraform diagnostics and attribute paths.
//!
//! Terraform reports problems as a list of diagnostics rather than a single
//! error. Each diagnostic has a severity, a short summary, a longer detail and
//! optionally the path of the attribute it refers to.
//!
//! # Example
//!
//! ```rust
//! use terraform_provider_k8s::diagnostics::{AttributePath, Diagnostics};
//!
//! let path = AttributePath::root("metadata").attribute("labels").key("app");
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.add_attribute_error(&path, "Invalid Attribute Value", "label value too long");
//!
//! assert!(diagnostics.has_error());
//! assert_eq!(path.to_string(), r#"metadata.labels["app"]"#);
//! ```

use crate::errors::ProviderError;
use serde::Serialize;
use std::fmt;

/// One step of an [`AttributePath`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    /// Named attribute of an object
    Attribute(String),
    /// Index into a list
    Index(usize),
    /// Key of a map
    Key(String),
}

/// Location of a value inside a resource configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// Path pointing at the resource itself.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Path pointing at a top-level attribute.
    #[must_use]
    pub fn root(name: &str) -> Self {
        Self::empty().attribute(name)
    }

    /// Extends the path with a nested attribute name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Self {
        self.with(PathStep::Attribute(name.to_string()))
    }

    /// Extends the path with a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.with(PathStep::Index(index))
    }

    /// Extends the path with a map key.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        self.with(PathStep::Key(key.to_string()))
    }

    /// Steps making up this path.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Whether this path points at the resource itself.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn with(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if position == 0 => write!(f, "{name}")?,
                PathStep::Attribute(name) => write!(f, ".{name}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Aborts the current operation
    Error,
    /// Shown to the user, operation continues
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single problem reported back to Terraform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// How severe the problem is
    pub severity: Severity,
    /// Short, one-line description
    pub summary: String,
    /// Longer explanation
    pub detail: String,
    /// Attribute the problem refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributePath>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)?;
        if let Some(path) = self.attribute.as_ref().filter(|p| !p.is_empty()) {
            write!(f, " (at {path})")?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n\n{}", self.detail)?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics produced by one operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error not tied to an attribute.
    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    /// Adds a warning not tied to an attribute.
    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, summary.into(), detail.into(), None);
    }

    /// Adds an error for the attribute at `path`.
    pub fn add_attribute_error(
        &mut self,
        path: &AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Error,
            summary.into(),
            detail.into(),
            Some(path.clone()),
        );
    }

    /// Adds a warning for the attribute at `path`.
    pub fn add_attribute_warning(
        &mut self,
        path: &AttributePath,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Warning,
            summary.into(),
            detail.into(),
            Some(path.clone()),
        );
    }

    /// Appends all diagnostics of `other`.
    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    /// Whether any diagnostic has [`Severity::Error`].
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    /// Iterates over error diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Iterates over warning diagnostics only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Iterates over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no diagnostics were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(
        &mut self,
        severity: Severity,
        summary: String,
        detail: String,
        attribute: Option<AttributePath>,
    ) {
        self.0.push(Diagnostic {
            severity,
            summary,
            detail,
            attribute,
        });
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(error: ProviderError) -> Self {
        let summary = match &error {
            ProviderError::UnknownResourceType { .. } => "Unknown resource type",
            ProviderError::TypeMismatch { .. } => crate::constants::SUMMARY_INCORRECT_TYPE,
            ProviderError::Marshal(_) => crate::constants::SUMMARY_MARSHAL_FAILED,
            _ => crate::constants::SUMMARY_DECODE_FAILED,
        };
        let attribute = match &error {
            ProviderError::TypeMismatch { path, .. } if !path.is_empty() => Some(path.clone()),
            _ => None,
        };
        Self {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: error.to_string(),
            attribute,
        }
    }
}

impl From<ProviderError> for Diagnostics {
    fn from(error: ProviderError) -> Self {
        Self(vec![error.into()])
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod diagnostics_tests;
