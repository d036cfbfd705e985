// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shape dispatcher: classifies a type and drives the matching builder.

use super::builders::{
    ArraySchemaBuilder, EnumSchemaBuilder, FixedSchemaBuilder, MapSchemaBuilder,
    ScalarSchemaBuilder,
};
use super::record::RecordSchemaBuilder;
use super::visitor::{EncoderRegistry, FormatVisitor, SchemaVisitable};
use super::SchemaBuilder;
use crate::config::GeneratorConfig;
use crate::descriptor::{TypeDescriptor, TypeIdentity, TypeIntrospector, TypeShape};
use crate::error::{Result, SchemaError};
use crate::registry::SchemaRegistry;
use crate::schema::Schema;
use std::collections::HashSet;

/// One derivation run over a caller-owned [`SchemaRegistry`].
///
/// Every recursive step completes before returning; the registry is
/// borrowed mutably for the whole run and must be discarded on error.
pub struct Derivation<'a> {
    registry: &'a mut SchemaRegistry,
    introspector: &'a dyn TypeIntrospector,
    encoders: &'a EncoderRegistry,
    config: &'a GeneratorConfig,
    // Types whose registered encoder is currently running.
    encoding: HashSet<TypeIdentity>,
}

impl<'a> Derivation<'a> {
    pub fn new(
        registry: &'a mut SchemaRegistry,
        introspector: &'a dyn TypeIntrospector,
        encoders: &'a EncoderRegistry,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            registry,
            introspector,
            encoders,
            config,
            encoding: HashSet::new(),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &*self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SchemaRegistry {
        &mut *self.registry
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    /// Derive the schema of `ty`.
    ///
    /// Already-registered named types resolve to their handle without
    /// rebuilding. Otherwise an encoder registered for the type takes
    /// precedence over structural classification. An encoder that asks for
    /// its own type again gets the structural schema.
    pub fn derive(&mut self, ty: &TypeDescriptor) -> Result<Schema> {
        let identity = ty.identity();
        if let Some(id) = self.registry.lookup(&identity) {
            log::trace!("[avrogen::derive] {} already registered", ty.canonical());
            return Ok(Schema::Named(id));
        }

        let encoders = self.encoders;
        if let Some(encoder) = encoders.find(ty) {
            if self.encoding.contains(&identity) {
                log::debug!(
                    "[avrogen::derive] {} re-entered from its encoder, using its shape",
                    ty.canonical()
                );
                return self.derive_structural(ty);
            }
            log::trace!("[avrogen::derive] {} resolved through encoder", ty.canonical());
            self.encoding.insert(identity.clone());
            let result = self.visit_with(encoder.as_ref(), ty);
            self.encoding.remove(&identity);
            return result;
        }

        self.derive_structural(ty)
    }

    /// Derive `ty` from its shape alone, ignoring registered encoders.
    pub fn derive_structural(&mut self, ty: &TypeDescriptor) -> Result<Schema> {
        if let Some(id) = self.registry.lookup(&ty.identity()) {
            return Ok(Schema::Named(id));
        }

        match ty.shape() {
            TypeShape::Record => self.derive_record(ty),
            TypeShape::Scalar(kind) => ScalarSchemaBuilder::new(*kind).built_schema(self),
            TypeShape::Array(item) => ArraySchemaBuilder::new(item).built_schema(self),
            TypeShape::Map { key, value } => MapSchemaBuilder::new(key, value).built_schema(self),
            TypeShape::Enum(symbols) => EnumSchemaBuilder::new(ty, symbols).built_schema(self),
            TypeShape::Fixed(size) => FixedSchemaBuilder::for_type(ty, *size).built_schema(self),
            TypeShape::Opaque => Err(SchemaError::unresolved(ty.canonical())),
        }
    }

    fn derive_record(&mut self, ty: &TypeDescriptor) -> Result<Schema> {
        let introspector = self.introspector;
        let properties = introspector
            .properties(ty)
            .ok_or_else(|| SchemaError::unresolved(ty.canonical()))?;

        let mut builder = RecordSchemaBuilder::new(self, ty)?;
        for property in &properties {
            builder.property(self, property)?;
        }
        builder.built_schema(self)
    }

    /// Run a fresh sub-derivation through a custom encoder.
    pub fn visit_with(
        &mut self,
        encoder: &dyn SchemaVisitable,
        ty: &TypeDescriptor,
    ) -> Result<Schema> {
        let mut visitor = FormatVisitor::new(self);
        encoder.accept_schema_visitor(&mut visitor, ty)?;
        visitor.into_schema(ty)
    }

    /// Namespace for a named type, falling back to the configured default.
    pub(crate) fn namespace_for(&self, namespace: &str) -> Option<String> {
        if namespace.is_empty() {
            self.config.default_namespace.clone()
        } else {
            Some(namespace.to_string())
        }
    }
}
