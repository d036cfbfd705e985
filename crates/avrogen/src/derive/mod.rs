// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema derivation.
//!
//! [`Derivation`] classifies a [`TypeDescriptor`](crate::descriptor::TypeDescriptor)
//! by shape and hands it to the matching builder. Records go through
//! [`RecordSchemaBuilder`]; every other shape has a small builder in
//! [`builders`]. Custom encoders plug in through [`SchemaVisitable`].
//!
//! [`SchemaGenerator`] is the usual entry point: it owns the configuration
//! and encoders, and creates a fresh registry per call.

pub mod builders;
mod dispatcher;
mod generator;
mod record;
mod visitor;

pub use dispatcher::Derivation;
pub use generator::{DerivedSchema, SchemaGenerator};
pub use record::RecordSchemaBuilder;
pub use visitor::{encoder_fn, EncoderRegistry, FormatVisitor, SchemaVisitable};

use crate::error::Result;
use crate::schema::Schema;

/// Common contract of the per-shape builders.
pub trait SchemaBuilder {
    /// Produce the schema, registering named nodes as needed.
    fn built_schema(&mut self, cx: &mut Derivation<'_>) -> Result<Schema>;
}
