// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Named arguments and their projection onto a method's positional parameters.

use std::fmt::{self, Display};

use common::value::Val;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    loader::{EntityLoadError, EntityLoader},
    value::FieldValue,
};

/// A lazy identifier for a persisted entity, resolved through an [`EntityLoader`] before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub type_name: String,
    pub id: Val,
}

impl EntityReference {
    pub fn new(type_name: impl Into<String>, id: impl Into<Val>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }
}

impl Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id.as_str() {
            Some(id) => write!(f, "{}#{id}", self.type_name),
            None => write!(f, "{}#{}", self.type_name, self.id),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ArgumentValue {
    Value(FieldValue),
    Entity(EntityReference),
}

impl From<FieldValue> for ArgumentValue {
    fn from(value: FieldValue) -> Self {
        ArgumentValue::Value(value)
    }
}

impl From<Val> for ArgumentValue {
    fn from(value: Val) -> Self {
        ArgumentValue::Value(FieldValue::Val(value))
    }
}

impl From<EntityReference> for ArgumentValue {
    fn from(value: EntityReference) -> Self {
        ArgumentValue::Entity(value)
    }
}

/// Arguments of a field, keyed by declared parameter name.
///
/// Insertion order carries no meaning; positional order comes from the callee.
#[derive(Debug, Clone, Default)]
pub struct ArgumentMap(IndexMap<String, ArgumentValue>);

impl ArgumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ArgumentValue>> FromIterator<(K, V)> for ArgumentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Project named arguments onto `params`, in declaration order.
///
/// Parameters without a matching argument are skipped, so the result is only as long as the number
/// of matches. Arguments naming no parameter are dropped. Entity references are replaced by their
/// loaded value; a loader failure aborts the adaptation.
pub(crate) async fn adapt_arguments(
    params: &[String],
    arguments: &ArgumentMap,
    loader: &dyn EntityLoader,
) -> Result<Vec<FieldValue>, EntityLoadError> {
    let mut positional = Vec::new();
    if arguments.is_empty() {
        return Ok(positional);
    }

    for param in params {
        match arguments.get(param) {
            Some(ArgumentValue::Value(value)) => positional.push(value.clone()),
            Some(ArgumentValue::Entity(reference)) => {
                positional.push(loader.load(reference).await?);
            }
            None => {}
        }
    }

    Ok(positional)
}
