// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![allow(dead_code)]

use std::{
    any::Any,
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use common::value::Val;
use field_resolver::{
    CompanionCall, CompanionResolver, CompanionType, ConventionConfig, DomainObject,
    EntityLoadError, EntityLoader, EntityReference, FieldResolver, FieldValue, MethodError,
    ObjectType, TypeRegistry, Visibility,
};

pub const USER_TYPE: &str = "App\\Entity\\User";
pub const USER_PROXY_TYPE: &str = "DoctrineProxies\\__CG__\\App\\Entity\\User";

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub archived: bool,
    pub nickname: Option<String>,
}

impl User {
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            archived: false,
            nickname: None,
        }
    }
}

impl DomainObject for User {
    fn type_name(&self) -> &str {
        USER_TYPE
    }

    fn property(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Val(Val::from(self.id))),
            "nickname" => Some(self.nickname.clone().into()),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A plain record with public properties only; no methods or companion are registered for it.
#[derive(Debug)]
pub struct Record {
    pub values: HashMap<String, Val>,
}

impl DomainObject for Record {
    fn type_name(&self) -> &str {
        "App\\Dto\\Record"
    }

    fn property(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).cloned().map(FieldValue::Val)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct Viewer {
    pub name: String,
}

pub struct UserResolve;

fn user_of(call: &CompanionCall<'_>) -> Result<User, MethodError> {
    call.source
        .as_any()
        .downcast_ref::<User>()
        .cloned()
        .ok_or_else(|| MethodError::InvalidArgument("source is not a user".into()))
}

#[async_trait]
impl CompanionResolver for UserResolve {
    async fn resolve(
        &self,
        method: &str,
        call: CompanionCall<'_>,
    ) -> Result<FieldValue, MethodError> {
        let user = user_of(&call)?;

        match method {
            "resolveFullName" => Ok(FieldValue::Val(Val::from(format!(
                "{} {}",
                user.first_name, user.last_name
            )))),
            "resolveGreeting" => {
                let viewer = call
                    .context
                    .get::<Viewer>()
                    .map(|viewer| viewer.name.as_str())
                    .unwrap_or("stranger");
                let punctuation = match call.arguments.get("punctuation") {
                    Some(field_resolver::ArgumentValue::Value(FieldValue::Val(Val::String(p)))) => {
                        p.as_str()
                    }
                    _ => ".",
                };
                Ok(FieldValue::Val(Val::from(format!(
                    "Hello {viewer}, I am {} (via {}){punctuation}",
                    user.first_name, call.field.parent_type
                ))))
            }
            "resolveMotto" => Ok(FieldValue::NULL),
            "resolveInitials" => Ok(FieldValue::deferred(|source, _, _| {
                let user = source
                    .as_object()
                    .and_then(|object| object.as_any().downcast_ref::<User>())
                    .ok_or_else(|| MethodError::InvalidArgument("source".into()))?;
                Ok(FieldValue::Val(Val::from(format!(
                    "{}{}",
                    &user.first_name[..1],
                    &user.last_name[..1]
                ))))
            })),
            "resolveSalary" => Err(MethodError::Explicit("Not authorized".into())),
            other => Err(MethodError::Explicit(format!("unknown method {other}"))),
        }
    }
}

/// Counts the companion instances and entity loads a resolver performs.
#[derive(Default)]
pub struct Counters {
    pub companions: AtomicUsize,
    pub loads: AtomicUsize,
}

impl Counters {
    pub fn companions(&self) -> usize {
        self.companions.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

pub struct MemoryEntityLoader {
    entities: HashMap<String, FieldValue>,
    counters: Arc<Counters>,
}

#[async_trait]
impl EntityLoader for MemoryEntityLoader {
    async fn load(&self, reference: &EntityReference) -> Result<FieldValue, EntityLoadError> {
        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        self.entities
            .get(&reference.to_string())
            .cloned()
            .ok_or_else(|| EntityLoadError::NotFound(reference.clone()))
    }
}

pub fn registry(counters: Arc<Counters>) -> TypeRegistry {
    let mut registry = TypeRegistry::new();

    registry
        .register_object_type(
            ObjectType::builder::<User>(USER_TYPE)
                .method("getFullName", &[], |user, _| {
                    Ok(FieldValue::Val(Val::from(format!(
                        "accessor {}",
                        user.first_name
                    ))))
                })
                .method("isArchived", &[], |user, _| {
                    Ok(FieldValue::Val(Val::from(user.archived)))
                })
                .method("getMotto", &[], |_, _| {
                    Ok(FieldValue::Val(Val::from("from the accessor")))
                })
                .method("getLastName", &[], |user, _| {
                    Ok(FieldValue::Val(Val::from(user.last_name.as_str())))
                })
                .method("getFriends", &["limit", "since"], |_, args| {
                    Ok(FieldValue::Val(Val::List(
                        args.iter()
                            .map(|arg| arg.as_val().cloned().unwrap_or(Val::Null))
                            .collect(),
                    )))
                })
                .method("getMentor", &["mentor"], |_, args| match args.first() {
                    Some(FieldValue::Object(mentor)) => mentor
                        .as_any()
                        .downcast_ref::<User>()
                        .map(|mentor| FieldValue::Val(Val::from(mentor.first_name.as_str())))
                        .ok_or_else(|| MethodError::InvalidArgument("mentor".into())),
                    _ => Ok(FieldValue::NULL),
                })
                .method("getScore", &[], |_, _| {
                    Err(MethodError::Other(anyhow::anyhow!("score service down")))
                })
                .method_with_visibility("getPassword", Visibility::Private, &[], |_, _| {
                    Ok(FieldValue::Val(Val::from("secret")))
                })
                .build(),
        )
        .register_companion_type(
            CompanionType::builder(format!("{USER_TYPE}GQLResolve"))
                .constructor(move || {
                    counters.companions.fetch_add(1, Ordering::SeqCst);
                    Box::new(UserResolve) as Box<dyn CompanionResolver>
                })
                .method("resolveFullName")
                .method("resolveGreeting")
                .method("resolveMotto")
                .method("resolveInitials")
                .method("resolveSalary")
                .method_with_visibility("resolveLastName", Visibility::Private)
                .build(),
        );

    registry
}

pub struct Fixture {
    pub resolver: FieldResolver,
    pub counters: Arc<Counters>,
}

pub fn fixture() -> Fixture {
    fixture_with(ConventionConfig::default())
}

pub fn fixture_with(config: ConventionConfig) -> Fixture {
    let counters = Arc::new(Counters::default());

    let mentor = User::new(2, "Grace", "Hopper");
    let loader = MemoryEntityLoader {
        entities: HashMap::from([(
            "App\\Entity\\User#2".to_string(),
            FieldValue::object(mentor),
        )]),
        counters: counters.clone(),
    };

    Fixture {
        resolver: FieldResolver::new(
            config,
            Arc::new(registry(counters.clone())),
            Arc::new(loader),
        ),
        counters,
    }
}
