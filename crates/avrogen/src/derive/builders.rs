// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builders for the non-record shapes.

use super::{Derivation, SchemaBuilder};
use crate::descriptor::{FixedSizeOverride, PrimitiveKind, TypeDescriptor, TypeIdentity, TypeShape};
use crate::error::{Result, SchemaError};
use crate::schema::{naming, EnumSchema, FixedSchema, NamedSchema, ScalarKind, Schema};

/// Scalar types map directly onto Avro primitives.
pub struct ScalarSchemaBuilder {
    kind: PrimitiveKind,
}

impl ScalarSchemaBuilder {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self { kind }
    }
}

impl SchemaBuilder for ScalarSchemaBuilder {
    fn built_schema(&mut self, _cx: &mut Derivation<'_>) -> Result<Schema> {
        Ok(Schema::Scalar(self.kind.to_scalar_kind()))
    }
}

/// Collections; arrays of single bytes collapse to Avro `bytes`.
pub struct ArraySchemaBuilder<'t> {
    item: &'t TypeDescriptor,
}

impl<'t> ArraySchemaBuilder<'t> {
    pub fn new(item: &'t TypeDescriptor) -> Self {
        Self { item }
    }
}

impl SchemaBuilder for ArraySchemaBuilder<'_> {
    fn built_schema(&mut self, cx: &mut Derivation<'_>) -> Result<Schema> {
        if matches!(self.item.shape(), TypeShape::Scalar(PrimitiveKind::Int8)) {
            return Ok(Schema::Scalar(ScalarKind::Bytes));
        }
        Ok(Schema::array(cx.derive(self.item)?))
    }
}

/// Maps; Avro keys are always strings, so only the value type is derived.
pub struct MapSchemaBuilder<'t> {
    key: &'t TypeDescriptor,
    value: &'t TypeDescriptor,
}

impl<'t> MapSchemaBuilder<'t> {
    pub fn new(key: &'t TypeDescriptor, value: &'t TypeDescriptor) -> Self {
        Self { key, value }
    }

    fn key_is_stringable(&self) -> bool {
        matches!(self.key.shape(), TypeShape::Scalar(_) | TypeShape::Enum(_))
    }
}

impl SchemaBuilder for MapSchemaBuilder<'_> {
    fn built_schema(&mut self, cx: &mut Derivation<'_>) -> Result<Schema> {
        if !self.key_is_stringable() {
            if cx.config().strict_map_keys {
                return Err(SchemaError::unresolved(format!(
                    "map key {}",
                    self.key.canonical()
                )));
            }
            log::debug!(
                "[avrogen::map] ignoring non-string key type {}",
                self.key.canonical()
            );
        }
        Ok(Schema::map(cx.derive(self.value)?))
    }
}

/// Enumerations become named Avro enums.
pub struct EnumSchemaBuilder<'t> {
    ty: &'t TypeDescriptor,
    symbols: &'t [String],
}

impl<'t> EnumSchemaBuilder<'t> {
    pub fn new(ty: &'t TypeDescriptor, symbols: &'t [String]) -> Self {
        Self { ty, symbols }
    }
}

impl SchemaBuilder for EnumSchemaBuilder<'_> {
    fn built_schema(&mut self, cx: &mut Derivation<'_>) -> Result<Schema> {
        let node = NamedSchema::Enum(EnumSchema {
            name: naming::schema_name(self.ty),
            namespace: cx.namespace_for(self.ty.namespace()),
            symbols: self.symbols.to_vec(),
        });
        let id = cx.registry_mut().register(self.ty.identity(), node)?;
        Ok(Schema::Named(id))
    }
}

/// Fixed-width blobs, from a `Fixed` shape or a per-property override.
pub struct FixedSchemaBuilder {
    identity: TypeIdentity,
    name: String,
    namespace: String,
    size: usize,
}

impl FixedSchemaBuilder {
    pub fn for_type(ty: &TypeDescriptor, size: usize) -> Self {
        Self {
            identity: ty.identity(),
            name: naming::schema_name(ty),
            namespace: ty.namespace().to_string(),
            size,
        }
    }

    pub fn from_override(fixed: &FixedSizeOverride) -> Self {
        Self {
            identity: TypeIdentity::new(fixed.namespace.clone(), fixed.name.clone()),
            name: fixed.name.clone(),
            namespace: fixed.namespace.clone(),
            size: fixed.size,
        }
    }
}

impl SchemaBuilder for FixedSchemaBuilder {
    fn built_schema(&mut self, cx: &mut Derivation<'_>) -> Result<Schema> {
        // Several properties may share one override name.
        if let Some(id) = cx.registry().lookup(&self.identity) {
            return match cx.registry().get(id) {
                Some(NamedSchema::Fixed(existing)) if existing.size == self.size => {
                    Ok(Schema::Named(id))
                }
                _ => Err(SchemaError::DuplicateRegistration {
                    identity: self.identity.to_string(),
                }),
            };
        }

        let node = NamedSchema::Fixed(FixedSchema {
            name: self.name.clone(),
            namespace: cx.namespace_for(&self.namespace),
            size: self.size,
        });
        let id = cx.registry_mut().register(self.identity.clone(), node)?;
        Ok(Schema::Named(id))
    }
}
