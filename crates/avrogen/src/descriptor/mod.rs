// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Input model: type and property descriptors.
//!
//! Descriptors are produced by an external introspection facility and are
//! read-only to the derivation core. A record's [`TypeDescriptor`] does not
//! own its properties; they are enumerated on demand through a
//! [`TypeIntrospector`], which keeps self-referential type graphs acyclic at
//! the descriptor level.
//!
//! # Example
//!
//! ```rust
//! use avrogen::descriptor::{PrimitiveKind, RecordDescriptorBuilder, StaticIntrospector, TypeDescriptor};
//!
//! let mut introspector = StaticIntrospector::new();
//! let node = introspector.define(
//!     RecordDescriptorBuilder::new("com.acme.Node")
//!         .field("value", TypeDescriptor::primitive(PrimitiveKind::Int32))
//!         .optional_field("next", TypeDescriptor::record("com.acme.Node")),
//! );
//! assert_eq!(node.canonical(), "com.acme.Node");
//! ```

mod introspect;
mod property;
mod type_descriptor;

pub use introspect::{RecordDescriptorBuilder, StaticIntrospector, TypeIntrospector};
pub use property::{FixedSizeOverride, PropertyDescriptor};
pub use type_descriptor::{split_qualified, PrimitiveKind, TypeDescriptor, TypeIdentity, TypeShape};
