// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::loader::EntityLoadError;

/// Failures that escape `resolve_field`.
///
/// Lookup misses never show up here: an unknown field resolves to null. Only errors raised by an
/// invoked method, a deferred value or the entity loader propagate.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    EntityLoad(#[from] EntityLoadError),

    #[error("Error invoking `{method}`: {source}")]
    Method {
        method: String,
        #[source]
        source: MethodError,
    },

    #[error("Error evaluating the deferred value of `{field}`: {source}")]
    Deferred {
        field: String,
        #[source]
        source: MethodError,
    },
}

impl ResolveError {
    /// A message that is safe to show to the client, if the failing method chose to provide one.
    pub fn user_error_message(&self) -> Option<String> {
        match self {
            ResolveError::EntityLoad(EntityLoadError::NotFound(reference)) => {
                Some(format!("Entity {reference} not found"))
            }
            ResolveError::EntityLoad(_) => None,
            ResolveError::Method { source, .. } | ResolveError::Deferred { source, .. } => {
                source.user_error_message()
            }
        }
    }
}

/// Errors raised by application code: accessors, companion resolvers and deferred values.
#[derive(Error, Debug)]
pub enum MethodError {
    #[error("{0}")]
    Explicit(String),

    #[error("Invalid argument {0}")]
    InvalidArgument(String),

    #[error("Receiver of type `{actual}` is not a `{expected}`")]
    InvalidReceiver {
        expected: &'static str,
        actual: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MethodError {
    pub fn user_error_message(&self) -> Option<String> {
        match self {
            MethodError::Explicit(message) => Some(message.clone()),
            _ => None,
        }
    }
}
