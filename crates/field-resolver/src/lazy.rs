// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{
    arguments::ArgumentMap,
    context::ExecutionContext,
    error::MethodError,
    value::FieldValue,
};

/// Evaluate a deferred result once with the inputs of the field that produced it.
///
/// Anything else, including a deferred value returned by the deferred value, is passed through.
pub(crate) fn unwrap_deferred(
    value: FieldValue,
    source: &FieldValue,
    arguments: &ArgumentMap,
    context: &ExecutionContext,
) -> Result<FieldValue, MethodError> {
    match value {
        FieldValue::Deferred(deferred) => deferred.call(source, arguments, context),
        value => Ok(value),
    }
}
