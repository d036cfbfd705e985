// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors consumed by the derivation core.

use crate::schema::ScalarKind;
use std::fmt;

/// Language-level scalar kinds understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    BigInteger,
    Float32,
    Float64,
    BigDecimal,
    Char,
    String,
    Bytes,
    Null,
}

impl PrimitiveKind {
    /// Avro scalar a value of this kind widens to.
    pub const fn to_scalar_kind(self) -> ScalarKind {
        match self {
            Self::Boolean => ScalarKind::Boolean,
            Self::Int8 | Self::Int16 | Self::Int32 => ScalarKind::Int,
            Self::Int64 | Self::BigInteger => ScalarKind::Long,
            Self::Float32 => ScalarKind::Float,
            Self::Float64 | Self::BigDecimal => ScalarKind::Double,
            Self::Char | Self::String => ScalarKind::String,
            Self::Bytes => ScalarKind::Bytes,
            Self::Null => ScalarKind::Null,
        }
    }

    /// Canonical name of the unboxed form.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::BigInteger => "biginteger",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::BigDecimal => "bigdecimal",
            Self::Char => "char",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Null => "null",
        }
    }

    /// Canonical name of the boxed (nullable) form.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::BigInteger => "BigInteger",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::BigDecimal => "BigDecimal",
            Self::Char => "Char",
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Null => "Null",
        }
    }
}

/// Structural shape of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// Composite type; properties come from the introspector.
    Record,
    /// Scalar value.
    Scalar(PrimitiveKind),
    /// Homogeneous collection.
    Array(Box<TypeDescriptor>),
    /// Keyed collection.
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// Enumeration with its symbols in declaration order.
    Enum(Vec<String>),
    /// Fixed-width binary blob of the given size in bytes.
    Fixed(usize),
    /// No structural information; needs an encoder.
    Opaque,
}

/// Value identity of a type: `(name, namespace, parametrization)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    pub namespace: String,
    pub name: String,
    pub params: Vec<TypeIdentity>,
}

impl TypeIdentity {
    /// Identity of a non-generic type.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            params: Vec::new(),
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}.", self.namespace)?;
        }
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            f.write_str("<")?;
            for (idx, param) in self.params.iter().enumerate() {
                if idx > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Immutable description of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: String,
    namespace: String,
    params: Vec<TypeDescriptor>,
    primitive: bool,
    shape: TypeShape,
}

impl TypeDescriptor {
    /// Create a non-primitive descriptor.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            params: Vec::new(),
            primitive: false,
            shape,
        }
    }

    /// Create a descriptor from a qualified path such as `com.acme.Point`.
    pub fn qualified(path: &str, shape: TypeShape) -> Self {
        let (namespace, name) = split_qualified(path);
        Self::new(namespace, name, shape)
    }

    /// Record type from a qualified path.
    pub fn record(path: &str) -> Self {
        Self::qualified(path, TypeShape::Record)
    }

    /// Enumeration from a qualified path.
    pub fn enumeration<I, S>(path: &str, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::qualified(
            path,
            TypeShape::Enum(symbols.into_iter().map(Into::into).collect()),
        )
    }

    /// Fixed-width blob type from a qualified path.
    pub fn fixed(path: &str, size: usize) -> Self {
        Self::qualified(path, TypeShape::Fixed(size))
    }

    /// Type with no structural information.
    pub fn opaque(path: &str) -> Self {
        Self::qualified(path, TypeShape::Opaque)
    }

    /// Unboxed language primitive (never null).
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            primitive: true,
            ..Self::new("", kind.type_name(), TypeShape::Scalar(kind))
        }
    }

    /// Boxed scalar (may be null).
    pub fn boxed(kind: PrimitiveKind) -> Self {
        Self::new("", kind.boxed_name(), TypeShape::Scalar(kind))
    }

    /// Shorthand for a boxed string.
    pub fn string() -> Self {
        Self::boxed(PrimitiveKind::String)
    }

    /// Collection of `item`.
    pub fn array_of(item: TypeDescriptor) -> Self {
        Self::new("", "array", TypeShape::Array(Box::new(item.clone()))).with_params(vec![item])
    }

    /// Map from `key` to `value`.
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        let params = vec![key.clone(), value.clone()];
        Self::new(
            "",
            "map",
            TypeShape::Map {
                key: Box::new(key),
                value: Box::new(value),
            },
        )
        .with_params(params)
    }

    /// Attach type arguments.
    pub fn with_params(mut self, params: Vec<TypeDescriptor>) -> Self {
        self.params = params;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Whether this is an unboxed language primitive.
    pub fn is_primitive(&self) -> bool {
        self.primitive
    }

    /// Registry key for this type.
    pub fn identity(&self) -> TypeIdentity {
        TypeIdentity {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            params: self.params.iter().map(TypeDescriptor::identity).collect(),
        }
    }

    /// Human-readable canonical form (`ns.Name<Param>`).
    pub fn canonical(&self) -> String {
        self.identity().to_string()
    }
}

/// Split a qualified path into `(namespace, name)`.
///
/// Nested type separators (`$`) move into the namespace:
/// `com.acme.Outer$Inner` becomes `("com.acme.Outer", "Inner")`.
pub fn split_qualified(path: &str) -> (String, String) {
    let (package, simple) = match path.rfind('.') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    };

    match simple.rfind('$') {
        Some(idx) => {
            let outer = simple[..idx].replace('$', ".");
            let namespace = if package.is_empty() {
                outer
            } else {
                format!("{package}.{outer}")
            };
            (namespace, simple[idx + 1..].to_string())
        }
        None => (package.to_string(), simple.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_and_nested_paths() {
        assert_eq!(
            split_qualified("com.acme.Point"),
            ("com.acme".to_string(), "Point".to_string())
        );
        assert_eq!(split_qualified("Point"), (String::new(), "Point".to_string()));
        assert_eq!(
            split_qualified("com.acme.Outer$Inner"),
            ("com.acme.Outer".to_string(), "Inner".to_string())
        );
        assert_eq!(
            split_qualified("A$B$C"),
            ("A.B".to_string(), "C".to_string())
        );
    }

    #[test]
    fn identity_is_value_based() {
        let a = TypeDescriptor::record("com.acme.Node");
        let b = TypeDescriptor::record("com.acme.Node");
        assert_eq!(a.identity(), b.identity());

        let boxed_int = TypeDescriptor::record("com.acme.Box")
            .with_params(vec![TypeDescriptor::boxed(PrimitiveKind::Int32)]);
        let boxed_str = TypeDescriptor::record("com.acme.Box").with_params(vec![TypeDescriptor::string()]);
        assert_ne!(boxed_int.identity(), boxed_str.identity());
        assert_eq!(boxed_int.canonical(), "com.acme.Box<Int32>");
    }

    #[test]
    fn primitive_and_boxed_differ() {
        let raw = TypeDescriptor::primitive(PrimitiveKind::Int64);
        let boxed = TypeDescriptor::boxed(PrimitiveKind::Int64);
        assert!(raw.is_primitive());
        assert!(!boxed.is_primitive());
        assert_ne!(raw.identity(), boxed.identity());
        assert_eq!(raw.shape(), boxed.shape());
    }

    #[test]
    fn containers_carry_element_identity() {
        let strings = TypeDescriptor::array_of(TypeDescriptor::string());
        let longs = TypeDescriptor::array_of(TypeDescriptor::boxed(PrimitiveKind::Int64));
        assert_ne!(strings.identity(), longs.identity());
        assert_eq!(strings.canonical(), "array<String>");
        assert_eq!(
            TypeDescriptor::map_of(TypeDescriptor::string(), longs).canonical(),
            "map<String,array<Int64>>"
        );
    }

    #[test]
    fn scalar_widening() {
        assert_eq!(PrimitiveKind::Int16.to_scalar_kind(), ScalarKind::Int);
        assert_eq!(PrimitiveKind::BigInteger.to_scalar_kind(), ScalarKind::Long);
        assert_eq!(PrimitiveKind::BigDecimal.to_scalar_kind(), ScalarKind::Double);
        assert_eq!(PrimitiveKind::Char.to_scalar_kind(), ScalarKind::String);
    }
}
