// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{borrow::Cow, fmt::Debug};

/// Maps a runtime type name to the name conventions are derived from.
///
/// Persistence layers decorate the names of their lazy proxies; the canonical name is the one
/// the proxied type was declared with, so a proxy and a loaded instance resolve alike.
pub trait CanonicalTypeName: Send + Sync + Debug {
    fn canonical<'a>(&self, type_name: &'a str) -> Cow<'a, str>;
}

/// Removes every occurrence of a proxy token, e.g. `DoctrineProxies\__CG__\`.
#[derive(Debug, Clone)]
pub struct StripProxyPrefix {
    token: String,
}

impl StripProxyPrefix {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CanonicalTypeName for StripProxyPrefix {
    fn canonical<'a>(&self, type_name: &'a str) -> Cow<'a, str> {
        if self.token.is_empty() || !type_name.contains(self.token.as_str()) {
            Cow::Borrowed(type_name)
        } else {
            Cow::Owned(type_name.replace(self.token.as_str(), ""))
        }
    }
}

/// No canonicalization; for sources that are never proxied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CanonicalTypeName for Identity {
    fn canonical<'a>(&self, type_name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(type_name)
    }
}
