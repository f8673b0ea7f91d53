// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource Markdown Documentation Generator
//!
//! Generates the Markdown reference of every resource type from the derived
//! Terraform schemas, so the docs always match what the provider serves.
//!
//! Usage:
//!   cargo run --bin resourcedoc > docs/resources.md

use anyhow::Result;
use terraform_provider_k8s::provider::Provider;
use terraform_provider_k8s::resource::Resource;
use terraform_provider_k8s::schema::{Attribute, Attributes};

fn main() -> Result<()> {
    let provider = Provider::new(env!("CARGO_PKG_VERSION"))?;

    println!("# Resource Reference");
    println!();
    println!("> **Note**: This file is AUTO-GENERATED from the custom resource types");
    println!("> DO NOT EDIT MANUALLY - Run `cargo run --bin resourcedoc` to regenerate");
    println!();

    println!("## Table of Contents");
    println!();
    for name in provider.resource_type_names() {
        println!("- [{name}](#{name})");
    }
    println!();

    for (name, resource) in provider.resources() {
        generate_resource_doc(name, resource.as_ref());
    }
    Ok(())
}

fn generate_resource_doc(name: &str, resource: &dyn Resource) {
    let schema = resource.schema();

    println!("## {name}");
    println!();
    println!("{}", escape(&schema.description));
    println!();
    println!("| Attribute | Type | Mode | Description |");
    println!("| --------- | ---- | ---- | ----------- |");
    print_attributes(&schema.attributes, "");
    println!();
    println!("---");
    println!();
}

fn print_attributes(attributes: &Attributes, prefix: &str) {
    for (name, attribute) in attributes {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        println!(
            "| `{path}` | {} | {} | {} |",
            attribute.kind.type_name(),
            mode(attribute),
            describe(attribute)
        );
        if let Some(nested) = attribute.kind.nested() {
            print_attributes(nested, &path);
        }
    }
}

fn mode(attribute: &Attribute) -> &'static str {
    if attribute.required {
        "Required"
    } else if attribute.optional {
        "Optional"
    } else {
        "Computed"
    }
}

fn describe(attribute: &Attribute) -> String {
    let mut description = escape(&attribute.description);
    for validator in &attribute.validators {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(&capitalize(&escape(&validator.description())));
        description.push('.');
    }
    description
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Pipes break Markdown tables.
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
