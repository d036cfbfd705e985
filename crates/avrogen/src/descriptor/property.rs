// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property descriptors and their annotations.

use super::TypeDescriptor;
use crate::derive::SchemaVisitable;
use std::fmt;
use std::sync::Arc;

/// Forces a property's schema to a fixed-width blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedSizeOverride {
    pub name: String,
    pub namespace: String,
    pub size: usize,
}

impl FixedSizeOverride {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            size,
        }
    }
}

/// A named, typed member of a record type.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    declared_type: TypeDescriptor,
    optional: bool,
    aliases: Vec<String>,
    fixed_size: Option<FixedSizeOverride>,
    encoder: Option<Arc<dyn SchemaVisitable>>,
}

impl PropertyDescriptor {
    /// Required property with no annotations.
    pub fn new(name: impl Into<String>, declared_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            declared_type,
            optional: false,
            aliases: Vec::new(),
            fixed_size: None,
            encoder: None,
        }
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Append an alternate name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Append several alternate names, preserving order.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Attach a fixed-size override.
    pub fn with_fixed_size(mut self, fixed: FixedSizeOverride) -> Self {
        self.fixed_size = Some(fixed);
        self
    }

    /// Attach a custom value encoder.
    pub fn with_encoder(mut self, encoder: Arc<dyn SchemaVisitable>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.declared_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether the declared type is an unboxed primitive.
    pub fn is_primitive(&self) -> bool {
        self.declared_type.is_primitive()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn fixed_size(&self) -> Option<&FixedSizeOverride> {
        self.fixed_size.as_ref()
    }

    pub fn encoder(&self) -> Option<&Arc<dyn SchemaVisitable>> {
        self.encoder.as_ref()
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type.canonical())
            .field("optional", &self.optional)
            .field("aliases", &self.aliases)
            .field("fixed_size", &self.fixed_size)
            .field("encoder", &self.encoder.is_some())
            .finish()
    }
}
