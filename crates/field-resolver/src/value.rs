// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Values that flow in and out of field resolution.
//!
//! A [`FieldValue`] is either plain data ([`Val`]), a domain object, an ordered mapping, or a
//! deferred computation that produces one of those when invoked.

use std::{any::Any, fmt, sync::Arc, sync::OnceLock};

use common::value::Val;
use indexmap::IndexMap;

use crate::{arguments::ArgumentMap, context::ExecutionContext, error::MethodError};

/// An application object whose fields are served through accessors, companion resolvers or
/// public properties.
pub trait DomainObject: Any + Send + Sync + fmt::Debug {
    /// Runtime type name. For proxies this is the name decorated by the persistence layer.
    fn type_name(&self) -> &str;

    /// The public property `name`, if the type exposes one.
    ///
    /// A public property that holds null is `Some(FieldValue::NULL)`, not `None`.
    fn property(&self, _name: &str) -> Option<FieldValue> {
        None
    }

    /// The receiver for typed method invocation.
    fn as_any(&self) -> &dyn Any;
}

pub type ObjectRef = Arc<dyn DomainObject>;

pub type FieldMap = Arc<IndexMap<String, FieldValue>>;

type DeferredFn = dyn Fn(&FieldValue, &ArgumentMap, &ExecutionContext) -> Result<FieldValue, MethodError>
    + Send
    + Sync;

/// A value computed later from the (source, arguments, context) of the field that produced it.
#[derive(Clone)]
pub struct Deferred(Arc<DeferredFn>);

impl Deferred {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&FieldValue, &ArgumentMap, &ExecutionContext) -> Result<FieldValue, MethodError>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(
        &self,
        source: &FieldValue,
        arguments: &ArgumentMap,
        context: &ExecutionContext,
    ) -> Result<FieldValue, MethodError> {
        (self.0)(source, arguments, context)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

#[derive(Clone, Debug)]
pub enum FieldValue {
    Val(Val),
    Object(ObjectRef),
    Mapping(FieldMap),
    Deferred(Deferred),
}

impl FieldValue {
    pub const NULL: FieldValue = FieldValue::Val(Val::Null);

    pub fn object(object: impl DomainObject) -> Self {
        FieldValue::Object(Arc::new(object))
    }

    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, FieldValue)>) -> Self {
        FieldValue::Mapping(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&FieldValue, &ArgumentMap, &ExecutionContext) -> Result<FieldValue, MethodError>
            + Send
            + Sync
            + 'static,
    {
        FieldValue::Deferred(Deferred::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Val(Val::Null))
    }

    pub fn as_val(&self) -> Option<&Val> {
        match self {
            FieldValue::Val(val) => Some(val),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            FieldValue::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Objects compare by identity and deferred values never compare equal.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Val(left), FieldValue::Val(right)) => left == right,
            (FieldValue::Object(left), FieldValue::Object(right)) => {
                std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right))
            }
            (FieldValue::Mapping(left), FieldValue::Mapping(right)) => left == right,
            _ => false,
        }
    }
}

impl From<Val> for FieldValue {
    fn from(value: Val) -> Self {
        FieldValue::Val(value)
    }
}

impl From<ObjectRef> for FieldValue {
    fn from(value: ObjectRef) -> Self {
        FieldValue::Object(value)
    }
}

impl<T: Into<Val>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::NULL, |v| FieldValue::Val(v.into()))
    }
}

type ProxyLoadFn = dyn Fn() -> ObjectRef + Send + Sync;

/// A lazily initialized stand-in for a persisted object.
///
/// The proxy reports the decorated type name it was created with and only loads its target the
/// first time a property or receiver is needed.
pub struct EntityProxy {
    type_name: String,
    target: OnceLock<ObjectRef>,
    load: Box<ProxyLoadFn>,
}

impl EntityProxy {
    pub fn new(
        type_name: impl Into<String>,
        load: impl Fn() -> ObjectRef + Send + Sync + 'static,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            target: OnceLock::new(),
            load: Box::new(load),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.target.get().is_some()
    }

    fn target(&self) -> &ObjectRef {
        self.target.get_or_init(|| (self.load)())
    }
}

impl DomainObject for EntityProxy {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property(&self, name: &str) -> Option<FieldValue> {
        self.target().property(name)
    }

    fn as_any(&self) -> &dyn Any {
        self.target().as_any()
    }
}

impl fmt::Debug for EntityProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityProxy")
            .field("type_name", &self.type_name)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug)]
    struct Account {
        id: i64,
    }

    impl DomainObject for Account {
        fn type_name(&self) -> &str {
            "App\\Entity\\Account"
        }

        fn property(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(Val::from(self.id).into()),
                _ => None,
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn proxy_loads_target_once_on_first_use() {
        let loads = Arc::new(AtomicUsize::new(0));
        let proxy = {
            let loads = loads.clone();
            EntityProxy::new("DoctrineProxies\\__CG__\\App\\Entity\\Account", move || {
                loads.fetch_add(1, Ordering::SeqCst);
                Arc::new(Account { id: 7 }) as ObjectRef
            })
        };

        assert_eq!(
            proxy.type_name(),
            "DoctrineProxies\\__CG__\\App\\Entity\\Account"
        );
        assert!(!proxy.is_initialized());

        assert_eq!(proxy.property("id"), Some(FieldValue::Val(Val::from(7))));
        assert!(proxy.as_any().downcast_ref::<Account>().is_some());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(proxy.is_initialized());
    }

    #[test]
    fn objects_compare_by_identity() {
        let account: ObjectRef = Arc::new(Account { id: 1 });
        let same = FieldValue::Object(account.clone());
        let other = FieldValue::object(Account { id: 1 });

        assert_eq!(FieldValue::Object(account), same);
        assert_ne!(same, other);
    }

    #[test]
    fn option_converts_to_null() {
        assert!(FieldValue::from(None::<String>).is_null());
        assert_eq!(
            FieldValue::from(Some("x")),
            FieldValue::Val(Val::String("x".into()))
        );
    }
}
