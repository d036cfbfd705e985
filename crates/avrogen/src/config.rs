// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! Supports both programmatic and file-based (TOML) configuration.

use crate::schema::naming;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Knobs that influence how schemas are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Emit `"doc": "Schema for <type>"` on generated records.
    #[serde(default = "default_true")]
    pub record_doc: bool,

    /// Namespace applied to named types whose descriptor has none.
    #[serde(default)]
    pub default_namespace: Option<String>,

    /// Reject map key types that cannot be rendered as strings.
    ///
    /// When disabled, the key type is ignored (Avro keys are always strings).
    #[serde(default = "default_true")]
    pub strict_map_keys: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_doc: true,
            default_namespace: None,
            strict_map_keys: true,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the fallback namespace.
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }

    /// Toggle record documentation.
    pub fn with_record_doc(mut self, enabled: bool) -> Self {
        self.record_doc = enabled;
        self
    }

    /// Toggle strict map key checking.
    pub fn with_strict_map_keys(mut self, strict: bool) -> Self {
        self.strict_map_keys = strict;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ns) = &self.default_namespace {
            naming::validate_namespace(ns)
                .map_err(|e| ConfigError::Invalid(format!("default_namespace: {e}")))?;
        }
        Ok(())
    }
}
