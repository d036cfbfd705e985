// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema node data model.
//!
//! Anonymous nodes ([`Schema`]) are owned by their field or by the caller.
//! Named nodes ([`NamedSchema`]) live in the [`SchemaRegistry`] arena and
//! are referenced through a [`SchemaId`] handle, so a record can refer to
//! itself before its own fields are known.
//!
//! [`SchemaRegistry`]: crate::registry::SchemaRegistry

use super::naming;

/// Handle to a named schema inside a [`SchemaRegistry`](crate::registry::SchemaRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(pub(crate) usize);

impl SchemaId {
    /// Position of the node in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Avro primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl ScalarKind {
    /// Avro type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
        }
    }
}

/// A schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    Scalar(ScalarKind),
    Array(Box<Schema>),
    Map(Box<Schema>),
    Union(Vec<Schema>),
    /// Reference to a record, enum or fixed held by the registry.
    Named(SchemaId),
}

impl Schema {
    pub const NULL: Schema = Schema::Scalar(ScalarKind::Null);

    /// Array of `items`.
    pub fn array(items: Schema) -> Self {
        Self::Array(Box::new(items))
    }

    /// Map with string keys and `values`.
    pub fn map(values: Schema) -> Self {
        Self::Map(Box::new(values))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(ScalarKind::Null))
    }

    /// A union with a `null` branch (or `null` itself).
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Union(branches) => branches.iter().any(Schema::is_null),
            other => other.is_null(),
        }
    }

    /// Registry handle, if this is a named reference.
    pub fn named_id(&self) -> Option<SchemaId> {
        match self {
            Self::Named(id) => Some(*id),
            _ => None,
        }
    }

    /// Branches of a union; `None` for other nodes.
    pub fn union_branches(&self) -> Option<&[Schema]> {
        match self {
            Self::Union(branches) => Some(branches),
            _ => None,
        }
    }

    /// Wrap into a nullable union with `null` as the first branch.
    ///
    /// `null` stays `null`, a union already containing `null` is returned
    /// unchanged, and any other union gets `null` prepended (Avro forbids
    /// nested unions).
    pub fn union_with_null(self) -> Schema {
        match self {
            Self::Scalar(ScalarKind::Null) => self,
            Self::Union(branches) if branches.iter().any(Schema::is_null) => Self::Union(branches),
            Self::Union(branches) => {
                let mut with_null = Vec::with_capacity(branches.len() + 1);
                with_null.push(Self::NULL);
                with_null.extend(branches);
                Self::Union(with_null)
            }
            other => Self::Union(vec![Self::NULL, other]),
        }
    }
}

/// A record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub aliases: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            aliases: Vec::new(),
        }
    }

    /// Copy alias names verbatim, in order.
    pub fn with_aliases(mut self, aliases: &[String]) -> Self {
        self.aliases = aliases.to_vec();
        self
    }
}

/// Named record with an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    name: String,
    namespace: Option<String>,
    doc: Option<String>,
    fields: Vec<Field>,
    finalized: bool,
}

impl RecordSchema {
    /// Field-less record awaiting finalization.
    pub fn pending(name: impl Into<String>, namespace: Option<String>, doc: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            doc,
            fields: Vec::new(),
            finalized: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn full_name(&self) -> String {
        naming::full_name(self.namespace.as_deref(), &self.name)
    }

    /// Fields in declaration order (empty until finalized).
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn set_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
        self.finalized = true;
    }
}

/// Named enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub symbols: Vec<String>,
}

/// Named fixed-width blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub size: usize,
}

/// Schema nodes identified by `(name, namespace)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedSchema {
    Record(RecordSchema),
    Enum(EnumSchema),
    Fixed(FixedSchema),
}

impl NamedSchema {
    pub fn name(&self) -> &str {
        match self {
            Self::Record(r) => r.name(),
            Self::Enum(e) => &e.name,
            Self::Fixed(f) => &f.name,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Record(r) => r.namespace(),
            Self::Enum(e) => e.namespace.as_deref(),
            Self::Fixed(f) => f.namespace.as_deref(),
        }
    }

    pub fn full_name(&self) -> String {
        naming::full_name(self.namespace(), self.name())
    }

    /// Avro type keyword.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Enum(_) => "enum",
            Self::Fixed(_) => "fixed",
        }
    }

    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }
}
