// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The capability table the resolver dispatches against.
//!
//! The engine registers, once, the methods each domain type exposes (with their declared
//! parameter names and visibility) and the companion resolver types. Resolution only ever reads
//! the registry.

use std::{collections::HashMap, fmt, marker::PhantomData, sync::Arc};

use crate::{
    companion::CompanionResolver,
    error::MethodError,
    value::{DomainObject, FieldValue},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

type MethodFn =
    dyn Fn(&dyn DomainObject, &[FieldValue]) -> Result<FieldValue, MethodError> + Send + Sync;

pub struct ObjectMethod {
    visibility: Visibility,
    params: Vec<String>,
    invoke: Arc<MethodFn>,
}

impl ObjectMethod {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Declared parameter names, in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn invoke(
        &self,
        receiver: &dyn DomainObject,
        args: &[FieldValue],
    ) -> Result<FieldValue, MethodError> {
        (self.invoke)(receiver, args)
    }
}

impl fmt::Debug for ObjectMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectMethod")
            .field("visibility", &self.visibility)
            .field("params", &self.params)
            .finish()
    }
}

#[derive(Debug)]
pub struct ObjectType {
    name: String,
    methods: HashMap<String, ObjectMethod>,
}

impl ObjectType {
    /// Start describing the methods of `T`, registered under the runtime name `name`.
    pub fn builder<T: DomainObject>(name: impl Into<String>) -> ObjectTypeBuilder<T> {
        ObjectTypeBuilder {
            object_type: ObjectType {
                name: name.into(),
                methods: HashMap::new(),
            },
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self, name: &str) -> Option<&ObjectMethod> {
        self.methods.get(name)
    }

    pub fn public_method(&self, name: &str) -> Option<&ObjectMethod> {
        self.method(name).filter(|method| method.is_public())
    }
}

pub struct ObjectTypeBuilder<T> {
    object_type: ObjectType,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DomainObject> ObjectTypeBuilder<T> {
    pub fn method<F>(self, name: &str, params: &[&str], f: F) -> Self
    where
        F: Fn(&T, &[FieldValue]) -> Result<FieldValue, MethodError> + Send + Sync + 'static,
    {
        self.method_with_visibility(name, Visibility::Public, params, f)
    }

    pub fn method_with_visibility<F>(
        mut self,
        name: &str,
        visibility: Visibility,
        params: &[&str],
        f: F,
    ) -> Self
    where
        F: Fn(&T, &[FieldValue]) -> Result<FieldValue, MethodError> + Send + Sync + 'static,
    {
        let invoke: Arc<MethodFn> = Arc::new(
            move |receiver: &dyn DomainObject, args: &[FieldValue]| {
                let typed = receiver.as_any().downcast_ref::<T>().ok_or_else(|| {
                    MethodError::InvalidReceiver {
                        expected: std::any::type_name::<T>(),
                        actual: receiver.type_name().to_string(),
                    }
                })?;
                f(typed, args)
            },
        );

        self.object_type.methods.insert(
            name.to_string(),
            ObjectMethod {
                visibility,
                params: params.iter().map(|p| p.to_string()).collect(),
                invoke,
            },
        );
        self
    }

    pub fn build(self) -> ObjectType {
        self.object_type
    }
}

type CompanionConstructor = dyn Fn() -> Box<dyn CompanionResolver> + Send + Sync;

/// A convention-named type holding custom resolution methods for some domain type.
pub struct CompanionType {
    name: String,
    constructor: Option<Box<CompanionConstructor>>,
    methods: HashMap<String, Visibility>,
}

impl CompanionType {
    pub fn builder(name: impl Into<String>) -> CompanionTypeBuilder {
        CompanionTypeBuilder {
            companion_type: CompanionType {
                name: name.into(),
                constructor: None,
                methods: HashMap::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    pub fn method_visibility(&self, name: &str) -> Option<Visibility> {
        self.methods.get(name).copied()
    }

    /// A fresh instance, or `None` if the type cannot be constructed without arguments.
    pub fn instantiate(&self) -> Option<Box<dyn CompanionResolver>> {
        self.constructor.as_ref().map(|constructor| constructor())
    }
}

impl fmt::Debug for CompanionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompanionType")
            .field("name", &self.name)
            .field("constructible", &self.is_constructible())
            .field("methods", &self.methods)
            .finish()
    }
}

pub struct CompanionTypeBuilder {
    companion_type: CompanionType,
}

impl CompanionTypeBuilder {
    pub fn constructor(
        mut self,
        constructor: impl Fn() -> Box<dyn CompanionResolver> + Send + Sync + 'static,
    ) -> Self {
        self.companion_type.constructor = Some(Box::new(constructor));
        self
    }

    /// Construct instances through `C::default()`.
    pub fn constructible<C: CompanionResolver + Default + 'static>(self) -> Self {
        self.constructor(|| Box::new(C::default()) as Box<dyn CompanionResolver>)
    }

    pub fn method(self, name: &str) -> Self {
        self.method_with_visibility(name, Visibility::Public)
    }

    pub fn method_with_visibility(mut self, name: &str, visibility: Visibility) -> Self {
        self.companion_type
            .methods
            .insert(name.to_string(), visibility);
        self
    }

    pub fn build(self) -> CompanionType {
        self.companion_type
    }
}

#[derive(Debug, Default)]
pub struct TypeRegistry {
    object_types: HashMap<String, ObjectType>,
    companion_types: HashMap<String, CompanionType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `object_type`, replacing any type of the same name.
    pub fn register_object_type(&mut self, object_type: ObjectType) -> &mut Self {
        self.object_types
            .insert(object_type.name.clone(), object_type);
        self
    }

    /// Registers `companion_type`, replacing any companion of the same name.
    pub fn register_companion_type(&mut self, companion_type: CompanionType) -> &mut Self {
        self.companion_types
            .insert(companion_type.name.clone(), companion_type);
        self
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.get(name)
    }

    pub fn companion_type(&self, name: &str) -> Option<&CompanionType> {
        self.companion_types.get(name)
    }
}
