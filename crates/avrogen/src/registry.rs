// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-run arena of named schemas.
//!
//! A named node is registered (and gets its [`SchemaId`]) before its
//! contents are complete; recursive references resolve to the handle
//! instead of re-entering the builder. Entries are never removed. The
//! registry belongs to exactly one top-level derivation and must be
//! discarded if that derivation fails.

use crate::descriptor::TypeIdentity;
use crate::error::{Result, SchemaError};
use crate::schema::{naming, Field, NamedSchema, RecordSchema, SchemaId};
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// SchemaRegistry
// ---------------------------------------------------------------------------

/// Type identity -> named schema map backed by an arena.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    nodes: Vec<NamedSchema>,
    by_identity: HashMap<TypeIdentity, SchemaId>,
    by_full_name: HashMap<String, SchemaId>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `identity`.
    ///
    /// Fails with [`SchemaError::DuplicateRegistration`] if the identity, or
    /// another node with the same full name, is already present: overwriting
    /// would orphan references to the existing node.
    pub fn register(&mut self, identity: TypeIdentity, node: NamedSchema) -> Result<SchemaId> {
        if self.by_identity.contains_key(&identity) {
            return Err(SchemaError::DuplicateRegistration {
                identity: identity.to_string(),
            });
        }
        validate_node(&node)?;

        let full_name = node.full_name();
        if self.by_full_name.contains_key(&full_name) {
            return Err(SchemaError::DuplicateRegistration {
                identity: full_name,
            });
        }

        let id = SchemaId(self.nodes.len());
        log::trace!("[avrogen::registry] {} -> {} #{}", identity, full_name, id.index());
        self.nodes.push(node);
        self.by_identity.insert(identity, id);
        self.by_full_name.insert(full_name, id);
        Ok(id)
    }

    /// Handle previously registered for `identity`.
    pub fn lookup(&self, identity: &TypeIdentity) -> Option<SchemaId> {
        self.by_identity.get(identity).copied()
    }

    /// Handle of the node with the given full name (`namespace.name`).
    pub fn lookup_full_name(&self, full_name: &str) -> Option<SchemaId> {
        self.by_full_name.get(full_name).copied()
    }

    pub fn get(&self, id: SchemaId) -> Option<&NamedSchema> {
        self.nodes.get(id.0)
    }

    /// Record behind `id`, if it is one.
    pub fn record(&self, id: SchemaId) -> Option<&RecordSchema> {
        self.get(id).and_then(NamedSchema::as_record)
    }

    /// Assign the field list of a registered, still field-less record.
    pub fn finalize_record(&mut self, id: SchemaId, fields: Vec<Field>) -> Result<()> {
        let record = match self.nodes.get_mut(id.0) {
            Some(NamedSchema::Record(record)) => record,
            Some(other) => {
                return Err(SchemaError::Finalization {
                    record: other.full_name(),
                    reason: "not a record",
                })
            }
            None => {
                return Err(SchemaError::Finalization {
                    record: format!("#{}", id.index()),
                    reason: "unknown schema handle",
                })
            }
        };

        if record.is_finalized() {
            return Err(SchemaError::Finalization {
                record: record.full_name(),
                reason: "fields already assigned",
            });
        }

        {
            let mut seen = HashSet::with_capacity(fields.len());
            for field in &fields {
                naming::validate_name(&field.name)?;
                for alias in &field.aliases {
                    naming::validate_name(alias)?;
                }
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        record: record.full_name(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        record.set_fields(fields);
        Ok(())
    }

    /// Number of registered named schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registered nodes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SchemaId, &NamedSchema)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (SchemaId(idx), node))
    }
}

fn validate_node(node: &NamedSchema) -> Result<()> {
    naming::validate_name(node.name())?;
    naming::validate_namespace(node.namespace().unwrap_or(""))?;

    if let NamedSchema::Enum(e) = node {
        let mut seen = HashSet::with_capacity(e.symbols.len());
        for symbol in &e.symbols {
            naming::validate_name(symbol)?;
            if !seen.insert(symbol.as_str()) {
                return Err(SchemaError::InvalidName {
                    name: symbol.clone(),
                    reason: "duplicate enum symbol",
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumSchema, FixedSchema, ScalarKind, Schema};

    fn pending(name: &str) -> NamedSchema {
        NamedSchema::Record(RecordSchema::pending(name, Some("test".into()), None))
    }

    #[test]
    fn register_and_lookup() {
        let mut reg = SchemaRegistry::new();
        let identity = TypeIdentity::new("test", "Point");
        let id = reg.register(identity.clone(), pending("Point")).unwrap();

        assert_eq!(reg.lookup(&identity), Some(id));
        assert_eq!(reg.lookup(&TypeIdentity::new("test", "Point")), Some(id));
        assert_eq!(reg.lookup_full_name("test.Point"), Some(id));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_identity_rejected() {
        let mut reg = SchemaRegistry::new();
        let identity = TypeIdentity::new("test", "Point");
        let first = reg.register(identity.clone(), pending("Point")).unwrap();
        let err = reg.register(identity.clone(), pending("Point")).unwrap_err();

        assert!(matches!(err, SchemaError::DuplicateRegistration { .. }));
        assert_eq!(reg.lookup(&identity), Some(first));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_full_name_rejected() {
        let mut reg = SchemaRegistry::new();
        reg.register(TypeIdentity::new("test", "Point"), pending("Point"))
            .unwrap();
        let mut other = TypeIdentity::new("test", "Point");
        other.params.push(TypeIdentity::new("", "int32"));
        let err = reg.register(other, pending("Point")).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateRegistration {
                identity: "test.Point".into()
            }
        );
    }

    #[test]
    fn finalize_once() {
        let mut reg = SchemaRegistry::new();
        let id = reg
            .register(TypeIdentity::new("test", "Point"), pending("Point"))
            .unwrap();
        let fields = vec![Field::new("x", Schema::Scalar(ScalarKind::Int))];

        reg.finalize_record(id, fields.clone()).unwrap();
        assert!(reg.record(id).unwrap().is_finalized());

        let err = reg.finalize_record(id, fields).unwrap_err();
        assert!(matches!(err, SchemaError::Finalization { .. }));
    }

    #[test]
    fn finalize_rejects_duplicate_fields() {
        let mut reg = SchemaRegistry::new();
        let id = reg
            .register(TypeIdentity::new("test", "Point"), pending("Point"))
            .unwrap();
        let err = reg
            .finalize_record(
                id,
                vec![
                    Field::new("x", Schema::Scalar(ScalarKind::Int)),
                    Field::new("x", Schema::Scalar(ScalarKind::Long)),
                ],
            )
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                record: "test.Point".into(),
                field: "x".into()
            }
        );
        assert!(!reg.record(id).unwrap().is_finalized());
    }

    #[test]
    fn finalize_rejects_invalid_aliases() {
        let mut reg = SchemaRegistry::new();
        let id = reg
            .register(TypeIdentity::new("test", "Person"), pending("Person"))
            .unwrap();
        let err = reg
            .finalize_record(
                id,
                vec![Field::new("surname", Schema::Scalar(ScalarKind::String))
                    .with_aliases(&["last_name".to_string(), "last-name".to_string()])],
            )
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidName {
                name: "last-name".into(),
                reason: "only letters, digits and underscores are allowed",
            }
        );
        assert!(!reg.record(id).unwrap().is_finalized());
    }

    #[test]
    fn finalize_rejects_non_records() {
        let mut reg = SchemaRegistry::new();
        let id = reg
            .register(
                TypeIdentity::new("test", "Hash"),
                NamedSchema::Fixed(FixedSchema {
                    name: "Hash".into(),
                    namespace: Some("test".into()),
                    size: 32,
                }),
            )
            .unwrap();
        assert!(matches!(
            reg.finalize_record(id, Vec::new()),
            Err(SchemaError::Finalization { reason: "not a record", .. })
        ));
    }

    #[test]
    fn invalid_names_rejected() {
        let mut reg = SchemaRegistry::new();
        let err = reg
            .register(TypeIdentity::new("test", "Bad-Name"), pending("Bad-Name"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { .. }));
        assert!(reg.is_empty());
    }

    #[test]
    fn enum_symbols_validated() {
        let mut reg = SchemaRegistry::new();
        let err = reg
            .register(
                TypeIdentity::new("", "Color"),
                NamedSchema::Enum(EnumSchema {
                    name: "Color".into(),
                    namespace: None,
                    symbols: vec!["RED".into(), "RED".into()],
                }),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidName {
                reason: "duplicate enum symbol",
                ..
            }
        ));
    }

    #[test]
    fn iter_in_registration_order() {
        let mut reg = SchemaRegistry::new();
        reg.register(TypeIdentity::new("test", "B"), pending("B"))
            .unwrap();
        reg.register(TypeIdentity::new("test", "A"), pending("A"))
            .unwrap();
        let names: Vec<_> = reg.iter().map(|(_, node)| node.name().to_string()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
