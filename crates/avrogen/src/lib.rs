// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # avrogen
//!
//! Apache Avro schema derivation from reflective type descriptors.
//!
//! Types are described by [`TypeDescriptor`]s; the properties of record
//! types are enumerated by a [`TypeIntrospector`]. A [`SchemaGenerator`]
//! walks the type graph and produces a [`Schema`] whose named types (records,
//! enums, fixed) live in a [`SchemaRegistry`]. Recursive types are supported:
//! every record is registered before its properties are visited.
//!
//! ## Quick Start
//!
//! ```rust
//! use avrogen::descriptor::{PrimitiveKind, RecordDescriptorBuilder, StaticIntrospector, TypeDescriptor};
//! use avrogen::SchemaGenerator;
//!
//! let mut introspector = StaticIntrospector::new();
//! let node = introspector.define(
//!     RecordDescriptorBuilder::new("list.Node")
//!         .field("value", TypeDescriptor::primitive(PrimitiveKind::Int32))
//!         .optional_field("next", TypeDescriptor::record("list.Node")),
//! );
//!
//! let derived = SchemaGenerator::new(&introspector).generate(&node)?;
//! let json = derived.to_json()?;
//! assert_eq!(json["fields"][1]["type"], serde_json::json!(["null", "Node"]));
//! # Ok::<(), avrogen::SchemaError>(())
//! ```
//!
//! ## Modules
//!
//! - [`descriptor`]: input model (types, properties, introspection)
//! - [`schema`]: output model, naming rules and JSON rendering
//! - [`registry`]: per-run arena of named schemas
//! - [`derive`]: shape dispatch, builders and encoder overrides
//! - [`config`]: generator configuration

pub mod config;
pub mod derive;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod schema;

pub use config::{ConfigError, GeneratorConfig};
pub use derive::{
    encoder_fn, Derivation, DerivedSchema, EncoderRegistry, FormatVisitor, RecordSchemaBuilder,
    SchemaBuilder, SchemaGenerator, SchemaVisitable,
};
pub use descriptor::{PropertyDescriptor, TypeDescriptor, TypeIntrospector};
pub use error::{Result, SchemaError};
pub use registry::SchemaRegistry;
pub use schema::{NamedSchema, Schema, SchemaId};
