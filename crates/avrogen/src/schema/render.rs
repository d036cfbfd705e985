// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Rendering to canonical Avro JSON.
//!
//! Named types are defined inline on first occurrence and referenced by
//! name afterwards. A `namespace` attribute is only written when it differs
//! from the enclosing one, and references use the short name inside the
//! same namespace. A second reference to a type without namespace from
//! inside a namespaced record cannot be expressed and is rejected.

use super::{NamedSchema, Schema, SchemaId};
use crate::error::{Result, SchemaError};
use crate::registry::SchemaRegistry;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Render `schema` (whose named references live in `registry`) as Avro JSON.
pub fn to_json(registry: &SchemaRegistry, schema: &Schema) -> Result<Value> {
    let mut renderer = Renderer {
        registry,
        defined: HashSet::new(),
    };
    renderer.render(schema, "")
}

struct Renderer<'a> {
    registry: &'a SchemaRegistry,
    defined: HashSet<SchemaId>,
}

impl<'a> Renderer<'a> {
    fn render(&mut self, schema: &Schema, enclosing: &str) -> Result<Value> {
        match schema {
            Schema::Scalar(kind) => Ok(Value::String(kind.as_str().to_string())),
            Schema::Array(items) => {
                let mut obj = Map::new();
                obj.insert("type".into(), "array".into());
                obj.insert("items".into(), self.render(items, enclosing)?);
                Ok(Value::Object(obj))
            }
            Schema::Map(values) => {
                let mut obj = Map::new();
                obj.insert("type".into(), "map".into());
                obj.insert("values".into(), self.render(values, enclosing)?);
                Ok(Value::Object(obj))
            }
            Schema::Union(branches) => {
                let mut rendered = Vec::with_capacity(branches.len());
                for branch in branches {
                    rendered.push(self.render(branch, enclosing)?);
                }
                Ok(Value::Array(rendered))
            }
            Schema::Named(id) => self.render_named(*id, enclosing),
        }
    }

    fn render_named(&mut self, id: SchemaId, enclosing: &str) -> Result<Value> {
        let registry = self.registry;
        let node: &'a NamedSchema = registry
            .get(id)
            .ok_or_else(|| SchemaError::unresolved(format!("schema #{}", id.index())))?;
        let namespace = node.namespace().unwrap_or("");

        if !self.defined.insert(id) {
            // A dotless reference resolves against the enclosing namespace,
            // so a type without namespace cannot be named from inside one.
            if namespace.is_empty() && !enclosing.is_empty() {
                return Err(SchemaError::InvalidName {
                    name: node.name().to_string(),
                    reason: "type without namespace referenced from a namespaced schema",
                });
            }
            let reference = if namespace == enclosing {
                node.name().to_string()
            } else {
                node.full_name()
            };
            return Ok(Value::String(reference));
        }

        let mut obj = Map::new();
        obj.insert("type".into(), node.type_name().into());
        obj.insert("name".into(), node.name().into());
        if namespace != enclosing {
            obj.insert("namespace".into(), namespace.into());
        }

        match node {
            NamedSchema::Record(record) => {
                if !record.is_finalized() {
                    return Err(SchemaError::Finalization {
                        record: record.full_name(),
                        reason: "rendered before finalization",
                    });
                }
                if let Some(doc) = record.doc() {
                    obj.insert("doc".into(), doc.into());
                }
                let mut fields = Vec::with_capacity(record.fields().len());
                for field in record.fields() {
                    let mut field_obj = Map::new();
                    field_obj.insert("name".into(), field.name.clone().into());
                    field_obj.insert("type".into(), self.render(&field.schema, namespace)?);
                    if !field.aliases.is_empty() {
                        field_obj.insert("aliases".into(), field.aliases.clone().into());
                    }
                    fields.push(Value::Object(field_obj));
                }
                obj.insert("fields".into(), Value::Array(fields));
            }
            NamedSchema::Enum(e) => {
                obj.insert("symbols".into(), e.symbols.clone().into());
            }
            NamedSchema::Fixed(f) => {
                obj.insert("size".into(), f.size.into());
            }
        }

        Ok(Value::Object(obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeIdentity;
    use crate::schema::{Field, FixedSchema, RecordSchema, ScalarKind};
    use serde_json::json;

    #[test]
    fn scalars_and_containers() {
        let registry = SchemaRegistry::new();
        let schema = Schema::map(Schema::array(
            Schema::Scalar(ScalarKind::Long).union_with_null(),
        ));
        assert_eq!(
            to_json(&registry, &schema).expect("render"),
            json!({"type": "map", "values": {"type": "array", "items": ["null", "long"]}})
        );
    }

    #[test]
    fn self_reference_renders_by_name() {
        let mut registry = SchemaRegistry::new();
        let id = registry
            .register(
                TypeIdentity::new("list", "Node"),
                NamedSchema::Record(RecordSchema::pending("Node", Some("list".into()), None)),
            )
            .expect("register");
        registry
            .finalize_record(
                id,
                vec![Field::new("next", Schema::Named(id).union_with_null()).with_aliases(&[
                    "tail".to_string(),
                ])],
            )
            .expect("finalize");

        assert_eq!(
            to_json(&registry, &Schema::Named(id)).expect("render"),
            json!({
                "type": "record",
                "name": "Node",
                "namespace": "list",
                "fields": [{"name": "next", "type": ["null", "Node"], "aliases": ["tail"]}]
            })
        );
    }

    #[test]
    fn foreign_namespace_uses_full_name() {
        let mut registry = SchemaRegistry::new();
        let fixed = registry
            .register(
                TypeIdentity::new("crypto", "Md5"),
                NamedSchema::Fixed(FixedSchema {
                    name: "Md5".into(),
                    namespace: Some("crypto".into()),
                    size: 16,
                }),
            )
            .expect("register fixed");
        let outer = registry
            .register(
                TypeIdentity::new("files", "Entry"),
                NamedSchema::Record(RecordSchema::pending("Entry", Some("files".into()), None)),
            )
            .expect("register record");
        registry
            .finalize_record(
                outer,
                vec![
                    Field::new("a", Schema::Named(fixed)),
                    Field::new("b", Schema::Named(fixed)),
                ],
            )
            .expect("finalize");

        let rendered = to_json(&registry, &Schema::Named(outer)).expect("render");
        assert_eq!(
            rendered["fields"][0]["type"],
            json!({"type": "fixed", "name": "Md5", "namespace": "crypto", "size": 16})
        );
        assert_eq!(rendered["fields"][1]["type"], json!("crypto.Md5"));
    }

    #[test]
    fn unfinalized_record_is_an_error() {
        let mut registry = SchemaRegistry::new();
        let id = registry
            .register(
                TypeIdentity::new("", "Pending"),
                NamedSchema::Record(RecordSchema::pending("Pending", None, None)),
            )
            .expect("register");
        assert!(matches!(
            to_json(&registry, &Schema::Named(id)),
            Err(SchemaError::Finalization { .. })
        ));
    }

    #[test]
    fn namespaceless_type_inside_namespace() {
        let mut registry = SchemaRegistry::new();
        let bare = registry
            .register(
                TypeIdentity::new("", "Bare"),
                NamedSchema::Fixed(FixedSchema {
                    name: "Bare".into(),
                    namespace: None,
                    size: 2,
                }),
            )
            .expect("register fixed");
        let outer = registry
            .register(
                TypeIdentity::new("ns", "Outer"),
                NamedSchema::Record(RecordSchema::pending("Outer", Some("ns".into()), None)),
            )
            .expect("register record");
        registry
            .finalize_record(outer, vec![Field::new("a", Schema::Named(bare))])
            .expect("finalize");

        // Defined once: the empty namespace is written out.
        let rendered = to_json(&registry, &Schema::Named(outer)).expect("render");
        assert_eq!(
            rendered["fields"][0]["type"],
            json!({"type": "fixed", "name": "Bare", "namespace": "", "size": 2})
        );

        // Referenced again from `ns`, the short name would mean `ns.Bare`.
        let twice = registry
            .register(
                TypeIdentity::new("ns", "Twice"),
                NamedSchema::Record(RecordSchema::pending("Twice", Some("ns".into()), None)),
            )
            .expect("register record");
        registry
            .finalize_record(
                twice,
                vec![
                    Field::new("a", Schema::Named(bare)),
                    Field::new("b", Schema::Named(bare)),
                ],
            )
            .expect("finalize");
        assert!(matches!(
            to_json(&registry, &Schema::Named(twice)),
            Err(SchemaError::InvalidName { ref name, .. }) if name == "Bare"
        ));
    }
}
