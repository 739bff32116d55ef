// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use super::Environment;

pub struct CompositeEnvironment {
    // In order of precedence (first wins)
    envs: Vec<Arc<dyn Environment>>,
}

impl Environment for CompositeEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.envs.iter().find_map(|e| e.get(key))
    }
}

impl CompositeEnvironment {
    pub fn new(envs: Vec<Arc<dyn Environment>>) -> Self {
        Self { envs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvironment;

    #[test]
    fn first_environment_wins() {
        let overrides = MapEnvironment::from([("A", "override")]);
        let defaults = MapEnvironment::from([("A", "default"), ("B", "only-default")]);

        let env = CompositeEnvironment::new(vec![Arc::new(overrides), Arc::new(defaults)]);

        assert_eq!(env.get("A").as_deref(), Some("override"));
        assert_eq!(env.get("B").as_deref(), Some("only-default"));
        assert_eq!(env.get("C"), None);
    }
}
