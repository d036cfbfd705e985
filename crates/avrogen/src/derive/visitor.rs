// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoder override protocol.
//!
//! A custom encoder describes its wire format by driving a [`FormatVisitor`]
//! scoped to the current registry. The visitor is re-entrant: any call that
//! needs another type resolved goes back through the dispatcher.
//!
//! ```rust
//! use avrogen::derive::{encoder_fn, EncoderRegistry};
//! use avrogen::descriptor::TypeDescriptor;
//! use avrogen::schema::ScalarKind;
//!
//! // Timestamps travel as epoch milliseconds.
//! let mut encoders = EncoderRegistry::new();
//! encoders.register(
//!     &TypeDescriptor::opaque("time.Instant"),
//!     encoder_fn(|visitor, _| visitor.expect_scalar(ScalarKind::Long)),
//! );
//! assert_eq!(encoders.len(), 1);
//! ```

use super::record::RecordSchemaBuilder;
use super::{Derivation, SchemaBuilder};
use crate::descriptor::{FixedSizeOverride, TypeDescriptor, TypeIdentity};
use crate::error::{Result, SchemaError};
use crate::schema::{ScalarKind, Schema};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::builders::{EnumSchemaBuilder, FixedSchemaBuilder};

/// A value encoder able to describe its own schema.
pub trait SchemaVisitable: Send + Sync {
    /// Describe the format used for values of `ty` by calling one of the
    /// `expect_*` methods on `visitor`.
    fn accept_schema_visitor(
        &self,
        visitor: &mut FormatVisitor<'_, '_>,
        ty: &TypeDescriptor,
    ) -> Result<()>;
}

struct FnEncoder<F>(F);

impl<F> SchemaVisitable for FnEncoder<F>
where
    F: Fn(&mut FormatVisitor<'_, '_>, &TypeDescriptor) -> Result<()> + Send + Sync,
{
    fn accept_schema_visitor(
        &self,
        visitor: &mut FormatVisitor<'_, '_>,
        ty: &TypeDescriptor,
    ) -> Result<()> {
        (self.0)(visitor, ty)
    }
}

/// Wrap a closure as a shared encoder.
pub fn encoder_fn<F>(f: F) -> Arc<dyn SchemaVisitable>
where
    F: Fn(&mut FormatVisitor<'_, '_>, &TypeDescriptor) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(FnEncoder(f))
}

/// Sub-derivation handed to a [`SchemaVisitable`].
pub struct FormatVisitor<'d, 'a> {
    cx: &'d mut Derivation<'a>,
    schema: Option<Schema>,
}

impl<'d, 'a> FormatVisitor<'d, 'a> {
    pub(crate) fn new(cx: &'d mut Derivation<'a>) -> Self {
        Self { cx, schema: None }
    }

    /// The underlying derivation, for encoders that resolve other types first.
    pub fn derivation(&mut self) -> &mut Derivation<'a> {
        self.cx
    }

    /// Full dispatch for `ty` (registered encoders included). Asking for the
    /// type this encoder is handling yields its structural schema.
    pub fn expect_type(&mut self, ty: &TypeDescriptor) -> Result<()> {
        let schema = self.cx.derive(ty)?;
        self.set(schema)
    }

    /// Structural dispatch for `ty`, bypassing registered encoders.
    pub fn expect_structure(&mut self, ty: &TypeDescriptor) -> Result<()> {
        let schema = self.cx.derive_structural(ty)?;
        self.set(schema)
    }

    pub fn expect_scalar(&mut self, kind: ScalarKind) -> Result<()> {
        self.set(Schema::Scalar(kind))
    }

    pub fn expect_array(&mut self, item: &TypeDescriptor) -> Result<()> {
        let items = self.cx.derive(item)?;
        self.set(Schema::array(items))
    }

    pub fn expect_map(&mut self, value: &TypeDescriptor) -> Result<()> {
        let values = self.cx.derive(value)?;
        self.set(Schema::map(values))
    }

    /// Named enum for `ty` with the given symbols.
    pub fn expect_enum(&mut self, ty: &TypeDescriptor, symbols: &[String]) -> Result<()> {
        let schema = match self.cx.registry().lookup(&ty.identity()) {
            Some(id) => Schema::Named(id),
            None => EnumSchemaBuilder::new(ty, symbols).built_schema(self.cx)?,
        };
        self.set(schema)
    }

    pub fn expect_fixed(
        &mut self,
        namespace: &str,
        name: &str,
        size: usize,
    ) -> Result<()> {
        let fixed = FixedSizeOverride::new(namespace, name, size);
        let schema = FixedSchemaBuilder::from_override(&fixed).built_schema(self.cx)?;
        self.set(schema)
    }

    /// Record for `ty` whose fields are reported by `visit`.
    ///
    /// If `ty` is already registered, its handle is used and `visit` is not
    /// called.
    pub fn expect_record<F>(&mut self, ty: &TypeDescriptor, visit: F) -> Result<()>
    where
        F: FnOnce(&mut RecordSchemaBuilder, &mut Derivation<'a>) -> Result<()>,
    {
        if let Some(id) = self.cx.registry().lookup(&ty.identity()) {
            return self.set(Schema::Named(id));
        }
        let mut builder = RecordSchemaBuilder::new(self.cx, ty)?;
        visit(&mut builder, self.cx)?;
        let schema = builder.built_schema(self.cx)?;
        self.set(schema)
    }

    /// Use a schema built elsewhere.
    pub fn expect_schema(&mut self, schema: Schema) -> Result<()> {
        self.set(schema)
    }

    fn set(&mut self, schema: Schema) -> Result<()> {
        if let Some(previous) = &self.schema {
            log::debug!("[avrogen::visitor] replacing {:?} with {:?}", previous, schema);
        }
        self.schema = Some(schema);
        Ok(())
    }

    /// Schema produced by the encoder; fails if it never reported one.
    pub fn into_schema(self, ty: &TypeDescriptor) -> Result<Schema> {
        self.schema
            .ok_or_else(|| SchemaError::unresolved(ty.canonical()))
    }
}

/// Encoders resolved by declared type (the ambient encoder provider).
#[derive(Default, Clone)]
pub struct EncoderRegistry {
    encoders: HashMap<TypeIdentity, Arc<dyn SchemaVisitable>>,
}

impl EncoderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `encoder` for every value of type `ty`.
    pub fn register(&mut self, ty: &TypeDescriptor, encoder: Arc<dyn SchemaVisitable>) {
        self.encoders.insert(ty.identity(), encoder);
    }

    /// Encoder registered for `ty`, if any.
    pub fn find(&self, ty: &TypeDescriptor) -> Option<&Arc<dyn SchemaVisitable>> {
        self.encoders.get(&ty.identity())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

impl fmt::Debug for EncoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<String> = self.encoders.keys().map(ToString::to_string).collect();
        types.sort();
        f.debug_struct("EncoderRegistry").field("types", &types).finish()
    }
}
