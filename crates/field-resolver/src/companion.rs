// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Companion resolver lookup: custom per-type resolution logic kept outside the domain type.
//!
//! For a source of canonical type `T`, the companion is the registered type named `T` + suffix,
//! and the method for field `f` is the resolver name derived from `f`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    arguments::ArgumentMap,
    config::ConventionConfig,
    context::{ExecutionContext, FieldDescriptor},
    error::{MethodError, ResolveError},
    registry::{CompanionType, TypeRegistry, Visibility},
    value::{FieldValue, ObjectRef},
};

/// An instance of a companion type.
///
/// `method` is the derived resolver name (`resolveFullName`, `isArchived`, ...); only names the
/// companion type declared as public are ever passed in.
#[async_trait]
pub trait CompanionResolver: Send + Sync {
    async fn resolve(
        &self,
        method: &str,
        call: CompanionCall<'_>,
    ) -> Result<FieldValue, MethodError>;
}

/// The inputs handed to a companion method, unchanged from the resolver's own inputs.
#[derive(Debug, Clone, Copy)]
pub struct CompanionCall<'a> {
    pub source: &'a ObjectRef,
    pub arguments: &'a ArgumentMap,
    pub context: &'a ExecutionContext,
    pub field: &'a FieldDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionTarget {
    pub type_name: String,
    pub method: String,
}

pub(crate) fn find_companion(
    config: &ConventionConfig,
    registry: &TypeRegistry,
    canonical_type_name: &str,
    field_name: &str,
) -> Option<CompanionTarget> {
    let Some(type_name) = config.companion_type_name(canonical_type_name) else {
        warn!(
            type_name = canonical_type_name,
            "Anomalous type name, skipping companion lookup"
        );
        return None;
    };

    let Some(companion) = registry.companion_type(&type_name) else {
        debug!(companion = %type_name, "No companion type");
        return None;
    };

    let method = config.resolver_name(field_name);
    match companion.method_visibility(&method) {
        None => {
            debug!(companion = %type_name, %method, "Companion has no such method");
            None
        }
        Some(Visibility::Protected | Visibility::Private) => {
            debug!(companion = %type_name, %method, "Companion method is not public");
            None
        }
        Some(Visibility::Public) if !companion.is_constructible() => {
            warn!(
                companion = %type_name,
                %method,
                "Companion type declares the method but cannot be constructed without arguments"
            );
            None
        }
        Some(Visibility::Public) => Some(CompanionTarget {
            method: method.into_owned(),
            type_name,
        }),
    }
}

/// Instantiate the companion and invoke its method.
///
/// `Ok(None)` only if the companion disappeared from the registry since it was planned.
pub(crate) async fn invoke_companion(
    registry: &TypeRegistry,
    target: &CompanionTarget,
    call: CompanionCall<'_>,
) -> Result<Option<FieldValue>, ResolveError> {
    let Some(instance) = registry
        .companion_type(&target.type_name)
        .and_then(CompanionType::instantiate)
    else {
        return Ok(None);
    };

    instance
        .resolve(&target.method, call)
        .await
        .map(Some)
        .map_err(|source| ResolveError::Method {
            method: format!("{}::{}", target.type_name, target.method),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::{any::Any, sync::Arc};

    use common::value::Val;
    use test_log::test;

    use super::*;
    use crate::value::DomainObject;

    #[derive(Debug)]
    struct Post;

    impl DomainObject for Post {
        fn type_name(&self) -> &str {
            "Blog\\Post"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct PostResolve;

    #[async_trait]
    impl CompanionResolver for PostResolve {
        async fn resolve(
            &self,
            method: &str,
            call: CompanionCall<'_>,
        ) -> Result<FieldValue, MethodError> {
            match method {
                "resolveTitle" => Ok(Val::from(format!(
                    "{} of {}",
                    call.field.field_name,
                    call.source.type_name()
                ))
                .into()),
                "isDraft" => Err(MethodError::Explicit("drafts are hidden".into())),
                _ => unreachable!(),
            }
        }
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register_companion_type(
                CompanionType::builder("Blog\\PostGQLResolve")
                    .constructible::<PostResolve>()
                    .method("resolveTitle")
                    .method("isDraft")
                    .method_with_visibility("resolveBody", Visibility::Protected)
                    .build(),
            )
            .register_companion_type(
                CompanionType::builder("Blog\\CommentGQLResolve")
                    .method("resolveText")
                    .build(),
            );
        registry
    }

    #[test]
    fn finds_public_methods_of_constructible_companions() {
        let config = ConventionConfig::default();
        let registry = registry();

        assert_eq!(
            find_companion(&config, &registry, "Blog\\Post", "title"),
            Some(CompanionTarget {
                type_name: "Blog\\PostGQLResolve".into(),
                method: "resolveTitle".into(),
            })
        );
        assert_eq!(
            find_companion(&config, &registry, "Blog\\Post", "isDraft").map(|t| t.method),
            Some("isDraft".to_string())
        );
    }

    #[test]
    fn misses_are_not_errors() {
        let config = ConventionConfig::default();
        let registry = registry();

        // no companion type
        assert_eq!(find_companion(&config, &registry, "Blog\\Tag", "title"), None);
        // no such method
        assert_eq!(find_companion(&config, &registry, "Blog\\Post", "author"), None);
        // not public
        assert_eq!(find_companion(&config, &registry, "Blog\\Post", "body"), None);
        // not constructible
        assert_eq!(find_companion(&config, &registry, "Blog\\Comment", "text"), None);
        // anomalous name
        assert_eq!(find_companion(&config, &registry, "", "title"), None);
    }

    #[test(tokio::test)]
    async fn invokes_with_the_original_inputs() {
        let registry = registry();
        let target = CompanionTarget {
            type_name: "Blog\\PostGQLResolve".into(),
            method: "resolveTitle".into(),
        };
        let source: ObjectRef = Arc::new(Post);
        let call = CompanionCall {
            source: &source,
            arguments: &ArgumentMap::new(),
            context: &ExecutionContext::empty(),
            field: &FieldDescriptor::new("title", "Post"),
        };

        let value = invoke_companion(&registry, &target, call).await.unwrap();
        assert_eq!(
            value,
            Some(FieldValue::Val(Val::from("title of Blog\\Post")))
        );
    }

    #[test(tokio::test)]
    async fn method_errors_propagate() {
        let registry = registry();
        let target = CompanionTarget {
            type_name: "Blog\\PostGQLResolve".into(),
            method: "isDraft".into(),
        };
        let source: ObjectRef = Arc::new(Post);
        let call = CompanionCall {
            source: &source,
            arguments: &ArgumentMap::new(),
            context: &ExecutionContext::empty(),
            field: &FieldDescriptor::new("isDraft", "Post"),
        };

        let error = invoke_companion(&registry, &target, call)
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Error invoking `Blog\\PostGQLResolve::isDraft`: drafts are hidden"
        );
        assert_eq!(error.user_error_message().as_deref(), Some("drafts are hidden"));
    }
}
