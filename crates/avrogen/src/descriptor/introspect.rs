// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Introspection collaborator: enumerates the properties of record types.

use super::{FixedSizeOverride, PropertyDescriptor, TypeDescriptor, TypeIdentity};
use std::collections::HashMap;

/// Supplies the ordered properties of record-shaped types.
///
/// Implementations must return the same order on every call for a given
/// type; the derived field order follows it.
pub trait TypeIntrospector {
    /// Properties of `ty`, or `None` if the type is unknown.
    fn properties(&self, ty: &TypeDescriptor) -> Option<Vec<PropertyDescriptor>>;
}

impl<F> TypeIntrospector for F
where
    F: Fn(&TypeDescriptor) -> Option<Vec<PropertyDescriptor>>,
{
    fn properties(&self, ty: &TypeDescriptor) -> Option<Vec<PropertyDescriptor>> {
        self(ty)
    }
}

/// In-memory [`TypeIntrospector`] keyed by type identity.
#[derive(Debug, Default)]
pub struct StaticIntrospector {
    records: HashMap<TypeIdentity, Vec<PropertyDescriptor>>,
}

impl StaticIntrospector {
    /// Create an empty introspector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the properties of `ty`, replacing any previous definition.
    pub fn register(&mut self, ty: &TypeDescriptor, properties: Vec<PropertyDescriptor>) {
        self.records.insert(ty.identity(), properties);
    }

    /// Register a record built with [`RecordDescriptorBuilder`] and return its descriptor.
    pub fn define(&mut self, builder: RecordDescriptorBuilder) -> TypeDescriptor {
        let (ty, properties) = builder.build();
        self.register(&ty, properties);
        ty
    }

    /// Number of known record types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record types are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TypeIntrospector for StaticIntrospector {
    fn properties(&self, ty: &TypeDescriptor) -> Option<Vec<PropertyDescriptor>> {
        self.records.get(&ty.identity()).cloned()
    }
}

/// Fluent builder for a record descriptor and its properties.
#[derive(Debug)]
pub struct RecordDescriptorBuilder {
    ty: TypeDescriptor,
    properties: Vec<PropertyDescriptor>,
}

impl RecordDescriptorBuilder {
    /// Start a record from a qualified path such as `com.acme.Point`.
    pub fn new(path: &str) -> Self {
        Self::for_type(TypeDescriptor::record(path))
    }

    /// Start from an existing record descriptor (e.g. a parametrized one).
    pub fn for_type(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            properties: Vec::new(),
        }
    }

    /// Add a required property.
    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.properties.push(PropertyDescriptor::new(name, ty));
        self
    }

    /// Add an optional property.
    pub fn optional_field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.properties
            .push(PropertyDescriptor::new(name, ty).optional());
        self
    }

    /// Add a property forced to a fixed-width blob.
    pub fn fixed_field(
        mut self,
        name: impl Into<String>,
        ty: TypeDescriptor,
        fixed: FixedSizeOverride,
    ) -> Self {
        self.properties
            .push(PropertyDescriptor::new(name, ty).with_fixed_size(fixed));
        self
    }

    /// Add a fully-specified property.
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Descriptor of the record being built.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// Finish and return the descriptor with its properties.
    pub fn build(self) -> (TypeDescriptor, Vec<PropertyDescriptor>) {
        (self.ty, self.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PrimitiveKind;

    #[test]
    fn define_and_lookup() {
        let mut introspector = StaticIntrospector::new();
        let point = introspector.define(
            RecordDescriptorBuilder::new("geo.Point")
                .field("x", TypeDescriptor::primitive(PrimitiveKind::Int32))
                .field("y", TypeDescriptor::primitive(PrimitiveKind::Int32)),
        );

        let props = introspector.properties(&point).expect("known record");
        let names: Vec<_> = props.iter().map(PropertyDescriptor::name).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(introspector.len(), 1);
    }

    #[test]
    fn lookup_uses_value_identity() {
        let mut introspector = StaticIntrospector::new();
        introspector.register(&TypeDescriptor::record("geo.Point"), Vec::new());
        assert!(introspector
            .properties(&TypeDescriptor::record("geo.Point"))
            .is_some());
        assert!(introspector
            .properties(&TypeDescriptor::record("geo.Line"))
            .is_none());
    }

    #[test]
    fn closures_are_introspectors() {
        let introspector = |ty: &TypeDescriptor| {
            (ty.name() == "Empty").then(Vec::<PropertyDescriptor>::new)
        };
        assert!(introspector
            .properties(&TypeDescriptor::record("Empty"))
            .is_some());
    }

    #[test]
    fn optional_and_fixed_fields() {
        let (_, props) = RecordDescriptorBuilder::new("net.Packet")
            .optional_field("label", TypeDescriptor::string())
            .fixed_field(
                "digest",
                TypeDescriptor::boxed(PrimitiveKind::Bytes),
                FixedSizeOverride::new("net", "Md5", 16),
            )
            .build();
        assert!(props[0].is_optional());
        assert_eq!(props[1].fixed_size().map(|f| f.size), Some(16));
    }
}
