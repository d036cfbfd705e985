// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record builder.
//!
//! The record is registered field-less at construction time, before any
//! property is visited. A property that refers back to the record (directly
//! or through other records) then resolves to the registered handle, and the
//! field list is assigned in place on finalization.

use super::builders::FixedSchemaBuilder;
use super::visitor::SchemaVisitable;
use super::{Derivation, SchemaBuilder};
use crate::descriptor::{PropertyDescriptor, TypeDescriptor};
use crate::error::{Result, SchemaError};
use crate::schema::{naming, Field, NamedSchema, RecordSchema, Schema, SchemaId};

/// Accumulates the fields of one record.
#[derive(Debug)]
pub struct RecordSchemaBuilder {
    id: SchemaId,
    full_name: String,
    fields: Vec<Field>,
    finalized: bool,
}

impl RecordSchemaBuilder {
    /// Register an empty record for `ty` and start accumulating fields.
    pub fn new(cx: &mut Derivation<'_>, ty: &TypeDescriptor) -> Result<Self> {
        let doc = cx
            .config()
            .record_doc
            .then(|| format!("Schema for {}", ty.canonical()));
        let record = RecordSchema::pending(
            naming::schema_name(ty),
            cx.namespace_for(ty.namespace()),
            doc,
        );
        let full_name = record.full_name();
        let id = cx
            .registry_mut()
            .register(ty.identity(), NamedSchema::Record(record))?;
        log::debug!(
            "[avrogen::record] registered {} (#{}) before visiting properties",
            full_name,
            id.index()
        );

        Ok(Self {
            id,
            full_name,
            fields: Vec::new(),
            finalized: false,
        })
    }

    /// Handle of the record being built.
    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Fields accumulated so far.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Add a field for an introspected property.
    ///
    /// Optional properties with a non-primitive declared type become a
    /// nullable union. Primitive properties always stay required because
    /// optionality cannot be told apart from a default there. Fixed-size
    /// overrides are never wrapped.
    pub fn property(&mut self, cx: &mut Derivation<'_>, prop: &PropertyDescriptor) -> Result<()> {
        let mut schema = self.schema_for_property(cx, prop)?;
        if prop.is_optional() && prop.fixed_size().is_none() && !prop.is_primitive() {
            schema = schema.union_with_null();
        }
        self.push(Field::new(prop.name(), schema).with_aliases(prop.aliases()))
    }

    /// Add a required field reported by name, encoder and type.
    ///
    /// No alias or fixed-size lookup happens on this path.
    pub fn property_with_handler(
        &mut self,
        cx: &mut Derivation<'_>,
        name: &str,
        handler: &dyn SchemaVisitable,
        ty: &TypeDescriptor,
    ) -> Result<()> {
        let schema = cx
            .visit_with(handler, ty)
            .map_err(|e| e.within(name, &self.full_name))?;
        self.push(Field::new(name, schema))
    }

    /// Optional counterpart of [`property_with_handler`](Self::property_with_handler).
    pub fn optional_property_with_handler(
        &mut self,
        cx: &mut Derivation<'_>,
        name: &str,
        handler: &dyn SchemaVisitable,
        ty: &TypeDescriptor,
    ) -> Result<()> {
        let mut schema = cx
            .visit_with(handler, ty)
            .map_err(|e| e.within(name, &self.full_name))?;
        if !ty.is_primitive() {
            schema = schema.union_with_null();
        }
        self.push(Field::new(name, schema))
    }

    fn schema_for_property(
        &self,
        cx: &mut Derivation<'_>,
        prop: &PropertyDescriptor,
    ) -> Result<Schema> {
        if let Some(fixed) = prop.fixed_size() {
            return FixedSchemaBuilder::from_override(fixed).built_schema(cx);
        }

        let ty = prop.declared_type();
        let schema = match prop.encoder() {
            Some(encoder) => cx.visit_with(encoder.as_ref(), ty),
            None => cx.derive(ty),
        };
        schema.map_err(|e| e.within(prop.name(), &self.full_name))
    }

    fn push(&mut self, field: Field) -> Result<()> {
        if self.finalized {
            return Err(SchemaError::Finalization {
                record: self.full_name.clone(),
                reason: "field added after finalization",
            });
        }
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(SchemaError::DuplicateField {
                record: self.full_name.clone(),
                field: field.name,
            });
        }
        log::trace!("[avrogen::record] {}.{}", self.full_name, field.name);
        self.fields.push(field);
        Ok(())
    }
}

impl SchemaBuilder for RecordSchemaBuilder {
    /// Assign the accumulated fields to the registered record.
    fn built_schema(&mut self, cx: &mut Derivation<'_>) -> Result<Schema> {
        if self.finalized {
            return Err(SchemaError::Finalization {
                record: self.full_name.clone(),
                reason: "builder already finalized",
            });
        }
        let fields = std::mem::take(&mut self.fields);
        log::debug!(
            "[avrogen::record] finalizing {} with {} field(s)",
            self.full_name,
            fields.len()
        );
        cx.registry_mut().finalize_record(self.id, fields)?;
        self.finalized = true;
        Ok(Schema::Named(self.id))
    }
}
