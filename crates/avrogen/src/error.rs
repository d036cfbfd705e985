// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema derivation.
//!
//! Every variant is terminal for the top-level derivation call: the
//! registry that was being populated must be discarded.

use thiserror::Error;

/// Derivation failure modes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No encoder or structural shape could be resolved for a type.
    #[error("cannot resolve schema for type `{type_name}`{}", location(.property, .record))]
    Resolution {
        /// Canonical name of the offending type.
        type_name: String,
        /// Property being derived, if the failure happened inside a record.
        property: Option<String>,
        /// Enclosing record, if any.
        record: Option<String>,
    },

    /// A type identity (or full name) was registered twice.
    #[error("schema for `{identity}` is already registered")]
    DuplicateRegistration {
        /// Canonical identity or full name that collided.
        identity: String,
    },

    /// A record was finalized more than once, or rendered before finalization.
    #[error("record `{record}` finalization error: {reason}")]
    Finalization {
        /// Full name of the record.
        record: String,
        /// What went wrong.
        reason: &'static str,
    },

    /// Two fields of one record share a name.
    #[error("duplicate field `{field}` in record `{record}`")]
    DuplicateField {
        /// Full name of the record.
        record: String,
        /// Colliding field name.
        field: String,
    },

    /// A name, namespace, field or symbol violates Avro naming rules.
    #[error("invalid name `{name}`: {reason}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Which rule was broken.
        reason: &'static str,
    },
}

fn location(property: &Option<String>, record: &Option<String>) -> String {
    match (property, record) {
        (Some(p), Some(r)) => format!(" (property `{p}` of record `{r}`)"),
        (Some(p), None) => format!(" (property `{p}`)"),
        (None, Some(r)) => format!(" (in record `{r}`)"),
        (None, None) => String::new(),
    }
}

impl SchemaError {
    /// Resolution failure for a bare type.
    pub fn unresolved(type_name: impl Into<String>) -> Self {
        Self::Resolution {
            type_name: type_name.into(),
            property: None,
            record: None,
        }
    }

    /// Attach property/record context to a resolution failure.
    ///
    /// Context already present is kept: the innermost record wins.
    pub(crate) fn within(self, property: &str, record: &str) -> Self {
        match self {
            Self::Resolution {
                type_name,
                property: None,
                record: None,
            } => Self::Resolution {
                type_name,
                property: Some(property.to_string()),
                record: Some(record.to_string()),
            },
            other => other,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_message_includes_location() {
        let err = SchemaError::unresolved("com.acme.Blob").within("payload", "com.acme.Envelope");
        assert_eq!(
            err.to_string(),
            "cannot resolve schema for type `com.acme.Blob` \
             (property `payload` of record `com.acme.Envelope`)"
        );
    }

    #[test]
    fn within_keeps_innermost_context() {
        let inner = SchemaError::unresolved("Blob").within("data", "Inner");
        let outer = inner.clone().within("inner", "Outer");
        assert_eq!(inner, outer);
    }

    #[test]
    fn within_ignores_other_variants() {
        let err = SchemaError::DuplicateField {
            record: "R".into(),
            field: "x".into(),
        };
        assert_eq!(err.clone().within("p", "Q"), err);
    }
}
