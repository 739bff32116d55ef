// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolution against the source object itself: an accessor method, then a public property.

use tracing::debug;

use crate::{
    arguments::{ArgumentMap, adapt_arguments},
    config::ConventionConfig,
    error::ResolveError,
    loader::EntityLoader,
    registry::TypeRegistry,
    value::{DomainObject, FieldValue},
};

/// The name of the public accessor for `field_name`, if the type declares one.
pub(crate) fn find_accessor(
    config: &ConventionConfig,
    registry: &TypeRegistry,
    canonical_type_name: &str,
    field_name: &str,
) -> Option<String> {
    let accessor = config.accessor_name(field_name);

    match registry
        .object_type(canonical_type_name)
        .and_then(|object_type| object_type.public_method(&accessor))
    {
        Some(_) => Some(accessor.into_owned()),
        None => {
            debug!(
                type_name = canonical_type_name,
                %accessor,
                "No public accessor"
            );
            None
        }
    }
}

/// Invoke `accessor` on `object` with the arguments adapted to its declared parameters.
///
/// `Ok(None)` only if the accessor disappeared from the registry since it was planned.
pub(crate) async fn invoke_accessor(
    registry: &TypeRegistry,
    loader: &dyn EntityLoader,
    canonical_type_name: &str,
    accessor: &str,
    object: &dyn DomainObject,
    arguments: &ArgumentMap,
) -> Result<Option<FieldValue>, ResolveError> {
    let Some(method) = registry
        .object_type(canonical_type_name)
        .and_then(|object_type| object_type.public_method(accessor))
    else {
        return Ok(None);
    };

    let positional = adapt_arguments(method.params(), arguments, loader).await?;

    method
        .invoke(object, &positional)
        .map(Some)
        .map_err(|source| ResolveError::Method {
            method: format!("{canonical_type_name}::{accessor}"),
            source,
        })
}

/// The public property named exactly `field_name`; null when there is none.
pub(crate) fn read_property(object: &dyn DomainObject, field_name: &str) -> FieldValue {
    object.property(field_name).unwrap_or_else(|| {
        debug!(
            type_name = object.type_name(),
            field = field_name,
            "No accessor or property, resolving to null"
        );
        FieldValue::NULL
    })
}
