// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use common::value::Val;
use indexmap::IndexMap;

use crate::value::{FieldValue, ObjectRef};

/// The shape of a source value, as far as field resolution is concerned.
#[derive(Debug, Clone, Copy)]
pub enum SourceValue<'a> {
    Object(&'a ObjectRef),
    Mapping(MappingSource<'a>),
    Absent,
}

#[derive(Debug, Clone, Copy)]
pub enum MappingSource<'a> {
    Fields(&'a IndexMap<String, FieldValue>),
    Data(&'a HashMap<String, Val>),
}

impl MappingSource<'_> {
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        match self {
            MappingSource::Fields(fields) => fields.get(key).cloned(),
            MappingSource::Data(data) => data.get(key).cloned().map(FieldValue::Val),
        }
    }
}

/// Scalars, lists and deferred values have no fields to read, so they classify as absent along
/// with null.
pub fn classify(value: &FieldValue) -> SourceValue<'_> {
    match value {
        FieldValue::Object(object) => SourceValue::Object(object),
        FieldValue::Mapping(fields) => SourceValue::Mapping(MappingSource::Fields(fields)),
        FieldValue::Val(Val::Object(data)) => SourceValue::Mapping(MappingSource::Data(data)),
        FieldValue::Val(_) | FieldValue::Deferred(_) => SourceValue::Absent,
    }
}
