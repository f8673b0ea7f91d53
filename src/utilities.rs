// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Small naming and identifier helpers shared by schema derivation and resources.

use crate::constants::RESOURCE_TYPE_SUFFIX;
use chrono::Utc;

/// Converts a camelCase or PascalCase manifest field name into a Terraform
/// attribute name.
///
/// Acronyms stay together (`targetCPUUtilization` → `target_cpu_utilization`)
/// and any character outside `[A-Za-z0-9]` becomes a single underscore.
///
/// # Example
///
/// ```rust
/// use terraform_provider_k8s::utilities::to_snake_case;
///
/// assert_eq!(to_snake_case("displayNameHtml"), "display_name_html");
/// assert_eq!(to_snake_case("hostIPC"), "host_ipc");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Lowercases `name` and replaces every character outside `[a-z0-9_]` with `_`.
#[must_use]
pub fn sanitize_attribute_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Builds the Terraform resource type name for a custom resource.
///
/// # Example
///
/// ```rust
/// use terraform_provider_k8s::utilities::resource_type_name;
///
/// assert_eq!(
///     resource_type_name("k8s", "keycloak.org", "KeycloakRealm", "v1alpha1"),
///     "k8s_keycloak_org_keycloak_realm_v1alpha1_manifest"
/// );
/// ```
#[must_use]
pub fn resource_type_name(provider: &str, group: &str, kind: &str, version: &str) -> String {
    format!(
        "{provider}_{}_{}_{}_{RESOURCE_TYPE_SUFFIX}",
        sanitize_attribute_name(group),
        to_snake_case(kind),
        sanitize_attribute_name(version)
    )
}

/// Identifier for a freshly rendered resource: the current Unix time in nanoseconds.
#[must_use]
pub fn unix_nano_id() -> String {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
        .to_string()
}

#[cfg(test)]
#[path = "utilities_tests.rs"]
mod utilities_tests;
