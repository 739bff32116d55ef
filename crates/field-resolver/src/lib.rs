// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Convention-driven resolution of a single GraphQL field.
//!
//! [`FieldResolver::resolve_field`] takes a source value of unknown shape (a domain object,
//! possibly a lazy proxy, a mapping, or nothing) and works out which strategy produces the field's
//! value, without the schema declaring it up front. Unknown fields resolve to null.

pub mod arguments;
pub mod canonical;
pub mod classifier;
pub mod companion;
pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod registry;
pub mod strategy;
pub mod value;

mod accessor;
mod field_resolver;
mod lazy;

pub use arguments::{ArgumentMap, ArgumentValue, EntityReference};
pub use canonical::{CanonicalTypeName, Identity, StripProxyPrefix};
pub use companion::{CompanionCall, CompanionResolver};
pub use config::{ConfigError, ConventionConfig};
pub use context::{ExecutionContext, FieldDescriptor, PathSegment};
pub use error::{MethodError, ResolveError};
pub use field_resolver::FieldResolver;
pub use loader::{EntityLoadError, EntityLoader};
pub use registry::{CompanionType, ObjectType, TypeRegistry, Visibility};
pub use value::{Deferred, DomainObject, EntityProxy, FieldValue, ObjectRef};
