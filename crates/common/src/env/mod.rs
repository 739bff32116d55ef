// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Key/value configuration sources.
//!
//! Components read their settings through [`Environment`] rather than `std::env` directly, so
//! tests can supply a [`MapEnvironment`] and embedders can layer several sources with
//! [`CompositeEnvironment`].

mod composite;
mod map;

pub use composite::CompositeEnvironment;
pub use map::MapEnvironment;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
                "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or_else(|| default_value.to_string())
    }

    /// Comma separated list; surrounding whitespace and empty entries are dropped.
    fn get_list(&self, key: &str, default_value: &[&str]) -> Vec<String> {
        match self.get(key) {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => default_value.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_accepts_common_spellings() {
        for value in ["true", "1", "YES", " on ", "Enabled"] {
            let env = MapEnvironment::from([("FLAG", value)]);
            assert!(env.enabled("FLAG", false).unwrap(), "{value}");
        }
        for value in ["false", "0", "no", "OFF", "disable"] {
            let env = MapEnvironment::from([("FLAG", value)]);
            assert!(!env.enabled("FLAG", true).unwrap(), "{value}");
        }
    }

    #[test]
    fn enabled_rejects_garbage_and_defaults_when_unset() {
        let env = MapEnvironment::from([("FLAG", "maybe")]);
        assert!(matches!(
            env.enabled("FLAG", false),
            Err(EnvError::InvalidBoolean { .. })
        ));
        assert!(env.enabled("OTHER", true).unwrap());
    }

    #[test]
    fn list_values() {
        let env = MapEnvironment::from([("LIST", " is, has ,,can")]);
        assert_eq!(env.get_list("LIST", &[]), vec!["is", "has", "can"]);
        assert_eq!(env.get_list("UNSET", &["x"]), vec!["x"]);
    }
}
