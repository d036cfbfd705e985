// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Avro naming rules.
//!
//! Names match `[A-Za-z_][A-Za-z0-9_]*`; namespaces are dot-separated names
//! (the empty namespace is allowed).

use crate::descriptor::TypeDescriptor;
use crate::error::{Result, SchemaError};

/// Check a simple name (record, enum, fixed, field or symbol).
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid(name, "name is empty"));
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(invalid(name, "must start with a letter or underscore"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(name, "only letters, digits and underscores are allowed"));
    }
    Ok(())
}

/// Check a namespace.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Ok(());
    }
    for part in namespace.split('.') {
        if part.is_empty() {
            return Err(invalid(namespace, "namespace has an empty component"));
        }
        validate_name(part).map_err(|_| invalid(namespace, "invalid namespace component"))?;
    }
    Ok(())
}

/// `namespace.name`, or `name` when there is no namespace.
pub fn full_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
        _ => name.to_string(),
    }
}

/// Schema name of a named type.
///
/// Type arguments are appended as `_<arg>` so that distinct
/// parametrizations of one generic type get distinct full names.
pub fn schema_name(ty: &TypeDescriptor) -> String {
    let mut name = ty.name().to_string();
    for param in ty.params() {
        name.push('_');
        name.push_str(&schema_name(param));
    }
    name
}

fn invalid(name: &str, reason: &'static str) -> SchemaError {
    SchemaError::InvalidName {
        name: name.to_string(),
        reason,
    }
}
