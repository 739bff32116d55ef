// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{any::Any, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Opaque per-request state handed through to companion resolvers and deferred values.
///
/// The resolver never looks inside; callees recover their own type with [`ExecutionContext::get`].
#[derive(Clone)]
pub struct ExecutionContext(Arc<dyn Any + Send + Sync>);

impl ExecutionContext {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn empty() -> Self {
        Self::new(())
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExecutionContext")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// The field being resolved, as declared in the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field_name: String,
    pub parent_type: String,
    #[serde(default)]
    pub path: Vec<PathSegment>,
}

impl FieldDescriptor {
    pub fn new(field_name: impl Into<String>, parent_type: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self {
            path: vec![PathSegment::Field(field_name.clone())],
            field_name,
            parent_type: parent_type.into(),
        }
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }
}
