// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Per-(type, field) resolution plans.
//!
//! Which companion method or accessor serves a field depends only on the source's runtime type
//! name, the field name, the registry and the conventions, all of which are fixed for the life of
//! a resolver. Plans are therefore computed once per pair and kept in an append-only table.
//! Resolved values are never stored.

use elsa::sync::FrozenMap;

use crate::{
    accessor::find_accessor,
    canonical::CanonicalTypeName,
    companion::{CompanionTarget, find_companion},
    config::ConventionConfig,
    registry::TypeRegistry,
};

/// How a field of some object type is resolved, in order: companion, accessor, then the public
/// property of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyDescriptor {
    pub canonical_type_name: String,
    pub companion: Option<CompanionTarget>,
    pub accessor: Option<String>,
}

impl StrategyDescriptor {
    pub fn build(
        config: &ConventionConfig,
        registry: &TypeRegistry,
        canonicalizer: &dyn CanonicalTypeName,
        type_name: &str,
        field_name: &str,
    ) -> Self {
        let canonical_type_name = canonicalizer.canonical(type_name).into_owned();

        Self {
            companion: find_companion(config, registry, &canonical_type_name, field_name),
            accessor: find_accessor(config, registry, &canonical_type_name, field_name),
            canonical_type_name,
        }
    }
}

type FieldPlans = FrozenMap<String, Box<StrategyDescriptor>>;

/// Plans keyed by runtime type name, then field name.
pub struct StrategyTable {
    plans: FrozenMap<String, Box<FieldPlans>>,
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyTable {
    pub fn new() -> Self {
        Self {
            plans: FrozenMap::new(),
        }
    }

    /// The cached plan for (`type_name`, `field_name`), computing it with `build` on first use.
    pub fn get_or_build(
        &self,
        type_name: &str,
        field_name: &str,
        build: impl FnOnce() -> StrategyDescriptor,
    ) -> &StrategyDescriptor {
        let fields = match self.plans.get(type_name) {
            Some(fields) => fields,
            None => self
                .plans
                .insert(type_name.to_string(), Box::new(FieldPlans::new())),
        };

        match fields.get(field_name) {
            Some(plan) => plan,
            None => fields.insert(field_name.to_string(), Box::new(build())),
        }
    }
}

impl std::fmt::Debug for StrategyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StrategyTable")
    }
}
