// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    accessor::{invoke_accessor, read_property},
    arguments::ArgumentMap,
    canonical::{CanonicalTypeName, StripProxyPrefix},
    classifier::{SourceValue, classify},
    companion::{CompanionCall, invoke_companion},
    config::ConventionConfig,
    context::{ExecutionContext, FieldDescriptor},
    error::ResolveError,
    lazy::unwrap_deferred,
    loader::EntityLoader,
    registry::TypeRegistry,
    strategy::{StrategyDescriptor, StrategyTable},
    value::{FieldValue, ObjectRef},
};

/// Resolves a single field of a source value by convention.
///
/// Object sources are tried, in order, against a companion resolver method, an accessor method
/// and a public property. Mapping sources are read by key. Anything else resolves to null. A
/// deferred result is evaluated once before it is returned.
///
/// The resolver keeps no per-call state; one instance serves concurrent resolutions.
pub struct FieldResolver {
    config: ConventionConfig,
    registry: Arc<TypeRegistry>,
    loader: Arc<dyn EntityLoader>,
    canonicalizer: Arc<dyn CanonicalTypeName>,
    strategies: StrategyTable,
}

impl std::fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldResolver")
            .field("config", &self.config)
            .field("canonicalizer", &self.canonicalizer)
            .finish_non_exhaustive()
    }
}

impl FieldResolver {
    pub fn new(
        config: ConventionConfig,
        registry: Arc<TypeRegistry>,
        loader: Arc<dyn EntityLoader>,
    ) -> Self {
        let canonicalizer = Arc::new(StripProxyPrefix::new(config.proxy_prefix()));

        Self {
            config,
            registry,
            loader,
            canonicalizer,
            strategies: StrategyTable::new(),
        }
    }

    /// Replace the proxy-stripping strategy derived from the configuration.
    pub fn with_canonicalizer(self, canonicalizer: impl CanonicalTypeName + 'static) -> Self {
        Self {
            canonicalizer: Arc::new(canonicalizer),
            strategies: StrategyTable::new(),
            ..self
        }
    }

    #[instrument(
        name = "FieldResolver::resolve_field",
        skip_all,
        fields(field = %field.field_name, parent_type = %field.parent_type)
    )]
    pub async fn resolve_field(
        &self,
        source: &FieldValue,
        arguments: &ArgumentMap,
        context: &ExecutionContext,
        field: &FieldDescriptor,
    ) -> Result<FieldValue, ResolveError> {
        let value = match classify(source) {
            SourceValue::Absent => return Ok(FieldValue::NULL),
            SourceValue::Mapping(mapping) => mapping
                .get(&field.field_name)
                .unwrap_or(FieldValue::NULL),
            SourceValue::Object(object) => {
                self.resolve_object(object, arguments, context, field)
                    .await?
            }
        };

        unwrap_deferred(value, source, arguments, context).map_err(|source| {
            ResolveError::Deferred {
                field: field.field_name.clone(),
                source,
            }
        })
    }

    async fn resolve_object(
        &self,
        object: &ObjectRef,
        arguments: &ArgumentMap,
        context: &ExecutionContext,
        field: &FieldDescriptor,
    ) -> Result<FieldValue, ResolveError> {
        let field_name = field.field_name.as_str();
        let plan = self
            .strategies
            .get_or_build(object.type_name(), field_name, || {
                StrategyDescriptor::build(
                    &self.config,
                    &self.registry,
                    self.canonicalizer.as_ref(),
                    object.type_name(),
                    field_name,
                )
            });

        if let Some(target) = &plan.companion {
            let call = CompanionCall {
                source: object,
                arguments,
                context,
                field,
            };

            if let Some(value) = invoke_companion(&self.registry, target, call).await? {
                if !(value.is_null() && self.config.companion_null_fallthrough()) {
                    return Ok(value);
                }
                debug!(companion = %target.type_name, "Companion returned null, trying the accessor");
            }
        }

        if let Some(accessor) = &plan.accessor {
            let value = invoke_accessor(
                &self.registry,
                self.loader.as_ref(),
                &plan.canonical_type_name,
                accessor,
                &**object,
                arguments,
            )
            .await?;

            if let Some(value) = value {
                return Ok(value);
            }
        }

        Ok(read_property(&**object, field_name))
    }
}
