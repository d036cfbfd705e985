// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Top-level facade.

use super::{Derivation, EncoderRegistry, SchemaVisitable};
use crate::config::GeneratorConfig;
use crate::descriptor::{TypeDescriptor, TypeIntrospector};
use crate::error::Result;
use crate::registry::SchemaRegistry;
use crate::schema::{self, NamedSchema, RecordSchema, Schema};
use serde_json::Value;
use std::sync::Arc;

/// Derives Avro schemas from introspected types.
///
/// Each [`generate`](Self::generate) call runs against its own registry, so
/// a failed call leaves nothing behind and calls never share named types.
pub struct SchemaGenerator<'i> {
    introspector: &'i dyn TypeIntrospector,
    encoders: EncoderRegistry,
    config: GeneratorConfig,
}

impl<'i> SchemaGenerator<'i> {
    pub fn new(introspector: &'i dyn TypeIntrospector) -> Self {
        Self {
            introspector,
            encoders: EncoderRegistry::new(),
            config: GeneratorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_encoders(mut self, encoders: EncoderRegistry) -> Self {
        self.encoders = encoders;
        self
    }

    /// Register one more encoder override.
    #[must_use]
    pub fn with_encoder(mut self, ty: &TypeDescriptor, encoder: Arc<dyn SchemaVisitable>) -> Self {
        self.encoders.register(ty, encoder);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn encoders(&self) -> &EncoderRegistry {
        &self.encoders
    }

    /// A derivation over a caller-owned registry, for deriving several roots
    /// that share named types.
    pub fn derivation<'a>(&'a self, registry: &'a mut SchemaRegistry) -> Derivation<'a> {
        Derivation::new(registry, self.introspector, &self.encoders, &self.config)
    }

    /// Derive the schema of `root` into a fresh registry.
    pub fn generate(&self, root: &TypeDescriptor) -> Result<DerivedSchema> {
        log::debug!("[avrogen::generator] deriving {}", root.canonical());
        let mut registry = SchemaRegistry::new();
        let root = self.derivation(&mut registry).derive(root)?;
        log::debug!(
            "[avrogen::generator] done, {} named schema(s)",
            registry.len()
        );
        Ok(DerivedSchema { root, registry })
    }
}

/// Result of one [`SchemaGenerator::generate`] call.
#[derive(Debug)]
pub struct DerivedSchema {
    root: Schema,
    registry: SchemaRegistry,
}

impl DerivedSchema {
    pub fn root(&self) -> &Schema {
        &self.root
    }

    /// Every named schema reachable from the root.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Named schema by full name (`namespace.name`).
    pub fn named(&self, full_name: &str) -> Option<&NamedSchema> {
        self.registry
            .lookup_full_name(full_name)
            .and_then(|id| self.registry.get(id))
    }

    /// Root record, if the root is one.
    pub fn record(&self) -> Option<&RecordSchema> {
        self.root.named_id().and_then(|id| self.registry.record(id))
    }

    pub fn to_json(&self) -> Result<Value> {
        schema::to_json(&self.registry, &self.root)
    }

    /// Pretty-printed Avro JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(format!("{:#}", self.to_json()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::encoder_fn;
    use crate::descriptor::{PrimitiveKind, RecordDescriptorBuilder, StaticIntrospector};
    use crate::error::SchemaError;
    use crate::schema::ScalarKind;
    use serde_json::json;

    #[test]
    fn generate_point() {
        let mut introspector = StaticIntrospector::new();
        let point = introspector.define(
            RecordDescriptorBuilder::new("geo.Point")
                .field("x", TypeDescriptor::primitive(PrimitiveKind::Int32))
                .field("y", TypeDescriptor::primitive(PrimitiveKind::Int32)),
        );

        let derived = SchemaGenerator::new(&introspector)
            .generate(&point)
            .expect("generate");
        assert_eq!(
            derived.to_json().expect("json"),
            json!({
                "type": "record",
                "name": "Point",
                "namespace": "geo",
                "doc": "Schema for geo.Point",
                "fields": [
                    {"name": "x", "type": "int"},
                    {"name": "y", "type": "int"}
                ]
            })
        );
        assert!(derived.named("geo.Point").is_some());
        assert_eq!(derived.record().map(|r| r.fields().len()), Some(2));
    }

    #[test]
    fn each_call_uses_a_fresh_registry() {
        let mut introspector = StaticIntrospector::new();
        let ty = introspector.define(
            RecordDescriptorBuilder::new("a.One").field("v", TypeDescriptor::string()),
        );
        let generator = SchemaGenerator::new(&introspector);

        let first = generator.generate(&ty).expect("first");
        let second = generator.generate(&ty).expect("second");
        assert_eq!(first.registry().len(), 1);
        assert_eq!(second.registry().len(), 1);
    }

    #[test]
    fn shared_registry_across_roots() {
        let mut introspector = StaticIntrospector::new();
        let ty = introspector.define(
            RecordDescriptorBuilder::new("a.One").field("v", TypeDescriptor::string()),
        );
        let generator = SchemaGenerator::new(&introspector);

        let mut registry = SchemaRegistry::new();
        let first = generator.derivation(&mut registry).derive(&ty).expect("first");
        let second = generator.derivation(&mut registry).derive(&ty).expect("second");
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn encoder_overrides_through_facade() {
        let introspector = StaticIntrospector::new();
        let instant = TypeDescriptor::opaque("time.Instant");
        let derived = SchemaGenerator::new(&introspector)
            .with_encoder(
                &instant,
                encoder_fn(|v, _| v.expect_scalar(ScalarKind::Long)),
            )
            .generate(&instant)
            .expect("generate");
        assert_eq!(derived.root(), &Schema::Scalar(ScalarKind::Long));
        assert_eq!(derived.to_json_string().expect("json"), "\"long\"");
    }

    #[test]
    fn record_doc_can_be_disabled() {
        let mut introspector = StaticIntrospector::new();
        let ty = introspector.define(RecordDescriptorBuilder::new("Bare"));
        let derived = SchemaGenerator::new(&introspector)
            .with_config(GeneratorConfig::default().with_record_doc(false))
            .generate(&ty)
            .expect("generate");
        assert_eq!(
            derived.to_json().expect("json"),
            json!({"type": "record", "name": "Bare", "fields": []})
        );
    }

    #[test]
    fn failure_is_reported() {
        let introspector = StaticIntrospector::new();
        let err = SchemaGenerator::new(&introspector)
            .generate(&TypeDescriptor::record("x.Unknown"))
            .expect_err("unknown record");
        assert_eq!(err, SchemaError::unresolved("x.Unknown"));
    }
}
