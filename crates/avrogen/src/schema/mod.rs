// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Output model: Avro schema nodes, naming rules and JSON rendering.

pub mod naming;
mod node;
mod render;

pub use node::{
    EnumSchema, Field, FixedSchema, NamedSchema, RecordSchema, ScalarKind, Schema, SchemaId,
};
pub use render::to_json;
