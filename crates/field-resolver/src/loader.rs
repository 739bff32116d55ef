// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use thiserror::Error;

use crate::{arguments::EntityReference, value::FieldValue};

/// Loads the persisted value behind an [`EntityReference`].
///
/// Implemented by the persistence layer; the resolver only calls it while adapting accessor
/// arguments and never retries or times out on its own.
#[async_trait]
pub trait EntityLoader: Send + Sync {
    async fn load(&self, reference: &EntityReference) -> Result<FieldValue, EntityLoadError>;
}

#[derive(Error, Debug)]
pub enum EntityLoadError {
    #[error("Entity {0} not found")]
    NotFound(EntityReference),

    #[error("Could not load entity {reference}: {message}")]
    Backend {
        reference: EntityReference,
        message: String,
    },
}
