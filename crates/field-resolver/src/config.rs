// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Naming conventions used to find companion resolvers and accessors.
//!
//! All constants live in [`ConventionConfig`] so embedders (and tests) can use their own scheme.
//! The defaults match Doctrine-backed schemas: `getName`/`isActive` accessors,
//! `UserGQLResolve::resolveName` companion resolvers and `DoctrineProxies\__CG__\` proxies.

use std::borrow::Cow;

use common::env::{EnvError, Environment};
use thiserror::Error;

pub const DEFAULT_COMPANION_SUFFIX: &str = "GQLResolve";
pub const DEFAULT_ACCESSOR_PREFIX: &str = "get";
pub const DEFAULT_RESOLVER_PREFIX: &str = "resolve";
pub const DEFAULT_BOOLEAN_PREFIXES: [&str; 2] = ["is", "has"];
pub const DOCTRINE_PROXY_PREFIX: &str = "DoctrineProxies\\__CG__\\";

const COMPANION_SUFFIX_ENV: &str = "FIELD_RESOLVER_COMPANION_SUFFIX";
const ACCESSOR_PREFIX_ENV: &str = "FIELD_RESOLVER_ACCESSOR_PREFIX";
const RESOLVER_PREFIX_ENV: &str = "FIELD_RESOLVER_RESOLVER_PREFIX";
const BOOLEAN_PREFIXES_ENV: &str = "FIELD_RESOLVER_BOOLEAN_PREFIXES";
const PROXY_PREFIX_ENV: &str = "FIELD_RESOLVER_PROXY_PREFIX";
const COMPANION_NULL_FALLTHROUGH_ENV: &str = "FIELD_RESOLVER_COMPANION_NULL_FALLTHROUGH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionConfig {
    companion_suffix: String,
    accessor_prefix: String,
    resolver_prefix: String,
    boolean_prefixes: Vec<String>,
    proxy_prefix: String,
    companion_null_fallthrough: bool,
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            companion_suffix: DEFAULT_COMPANION_SUFFIX.to_string(),
            accessor_prefix: DEFAULT_ACCESSOR_PREFIX.to_string(),
            resolver_prefix: DEFAULT_RESOLVER_PREFIX.to_string(),
            boolean_prefixes: DEFAULT_BOOLEAN_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            proxy_prefix: DOCTRINE_PROXY_PREFIX.to_string(),
            companion_null_fallthrough: false,
        }
    }
}

impl ConventionConfig {
    pub fn builder() -> ConventionConfigBuilder {
        ConventionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Read the conventions from `env`, falling back to the defaults for unset keys.
    pub fn from_env(env: &dyn Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Self::builder()
            .companion_suffix(env.get_or_else(COMPANION_SUFFIX_ENV, &defaults.companion_suffix))
            .accessor_prefix(env.get_or_else(ACCESSOR_PREFIX_ENV, &defaults.accessor_prefix))
            .resolver_prefix(env.get_or_else(RESOLVER_PREFIX_ENV, &defaults.resolver_prefix))
            .boolean_prefixes(env.get_list(BOOLEAN_PREFIXES_ENV, &DEFAULT_BOOLEAN_PREFIXES))
            .proxy_prefix(env.get_or_else(PROXY_PREFIX_ENV, &defaults.proxy_prefix))
            .companion_null_fallthrough(env.enabled(COMPANION_NULL_FALLTHROUGH_ENV, false)?)
            .build()
    }

    pub fn companion_suffix(&self) -> &str {
        &self.companion_suffix
    }

    pub fn proxy_prefix(&self) -> &str {
        &self.proxy_prefix
    }

    /// Whether a companion method that returns null hands the field over to the accessor lookup.
    pub fn companion_null_fallthrough(&self) -> bool {
        self.companion_null_fallthrough
    }

    /// `isActive`, `hasChildren`: a boolean prefix followed by an ASCII uppercase letter.
    pub fn is_boolean_accessor(&self, field_name: &str) -> bool {
        self.boolean_prefixes.iter().any(|prefix| {
            field_name
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_uppercase())
        })
    }

    /// `name` -> `getName`; boolean accessor names are kept verbatim.
    pub fn accessor_name<'a>(&self, field_name: &'a str) -> Cow<'a, str> {
        self.method_name(&self.accessor_prefix, field_name)
    }

    /// `fullName` -> `resolveFullName`; boolean accessor names are kept verbatim.
    pub fn resolver_name<'a>(&self, field_name: &'a str) -> Cow<'a, str> {
        self.method_name(&self.resolver_prefix, field_name)
    }

    /// The companion type for an already canonicalized type name.
    ///
    /// `None` when the name is empty or contains whitespace or control characters, since no
    /// registered type can carry such a name.
    pub fn companion_type_name(&self, canonical_type_name: &str) -> Option<String> {
        let anomalous = canonical_type_name.is_empty()
            || canonical_type_name
                .chars()
                .any(|c| c.is_whitespace() || c.is_control());

        (!anomalous).then(|| format!("{canonical_type_name}{}", self.companion_suffix))
    }

    fn method_name<'a>(&self, prefix: &str, field_name: &'a str) -> Cow<'a, str> {
        if self.is_boolean_accessor(field_name) {
            Cow::Borrowed(field_name)
        } else {
            Cow::Owned(format!("{prefix}{}", upper_first(field_name)))
        }
    }
}

/// Uppercase the first character if it is ASCII; anything else is returned unchanged.
pub fn upper_first(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut upper = String::with_capacity(s.len());
            upper.push(first.to_ascii_uppercase());
            upper.push_str(&s[1..]);
            Cow::Owned(upper)
        }
        _ => Cow::Borrowed(s),
    }
}

pub struct ConventionConfigBuilder {
    config: ConventionConfig,
}

impl ConventionConfigBuilder {
    pub fn companion_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.companion_suffix = suffix.into();
        self
    }

    pub fn accessor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.accessor_prefix = prefix.into();
        self
    }

    pub fn resolver_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.resolver_prefix = prefix.into();
        self
    }

    pub fn boolean_prefixes<S: Into<String>>(mut self, prefixes: impl IntoIterator<Item = S>) -> Self {
        self.config.boolean_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// An empty prefix disables proxy stripping.
    pub fn proxy_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.proxy_prefix = prefix.into();
        self
    }

    pub fn companion_null_fallthrough(mut self, enabled: bool) -> Self {
        self.config.companion_null_fallthrough = enabled;
        self
    }

    pub fn build(self) -> Result<ConventionConfig, ConfigError> {
        let config = self.config;

        validate_affix("companion suffix", &config.companion_suffix)?;
        validate_affix("accessor prefix", &config.accessor_prefix)?;
        validate_affix("resolver prefix", &config.resolver_prefix)?;
        for prefix in &config.boolean_prefixes {
            validate_affix("boolean prefix", prefix)?;
        }

        Ok(config)
    }
}

fn validate_affix(setting: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.chars().any(|c| !(c.is_alphanumeric() || c == '_')) {
        Err(ConfigError::InvalidAffix {
            setting,
            value: value.to_string(),
        })
    } else {
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {setting} '{value}': expected a non-empty identifier")]
    InvalidAffix {
        setting: &'static str,
        value: String,
    },

    #[error(transparent)]
    Env(#[from] EnvError),
}
