//  Copyright (c) 2026 Metaform Systems, Inc
//
//  This program and the accompanying materials are made available under the
//  terms of the Apache License, Version 2.0 which is available at
//  https://www.apache.org/licenses/LICENSE-2.0
//
//  SPDX-License-Identifier: Apache-2.0
//
//  Contributors:
//       Metaform Systems, Inc. - initial API and implementation
//

use bon::Builder;
use std::env;
use thiserror::Error;

pub const SUPER_USER_ID_KEY: &str = "edc.ih.superuser.id";
pub const SUPER_USER_DID_KEY: &str = "edc.ih.superuser.did";

pub const DEFAULT_SUPER_USER_ID: &str = "super-user";
pub const DEFAULT_SUPER_USER_DID: &str = "did:web:super-user";

/// Settings for the development super-user.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
pub struct SuperUserConfig {
    /// The participant context ID for the super-user
    #[builder(into, default = DEFAULT_SUPER_USER_ID)]
    pub super_user_id: String,
    /// The DID for the super-user
    #[builder(into, default = DEFAULT_SUPER_USER_DID)]
    pub super_user_did: String,
}

impl Default for SuperUserConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SuperUserConfig {
    /// Loads the settings from environment variables, e.g. `EDC_IH_SUPERUSER_ID` for `edc.ih.superuser.id`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(env_var_name(key)).ok())
    }

    /// Loads the settings using the given lookup, which maps a setting key to its value. Missing keys fall back to
    /// the defaults, blank values are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let super_user_id = setting(&lookup, SUPER_USER_ID_KEY, DEFAULT_SUPER_USER_ID)?;
        let super_user_did = setting(&lookup, SUPER_USER_DID_KEY, DEFAULT_SUPER_USER_DID)?;
        Ok(Self {
            super_user_id,
            super_user_did,
        })
    }
}

/// Maps a setting key to its environment variable name.
pub fn env_var_name(key: &str) -> String {
    key.replace(['.', '-'], "_").to_ascii_uppercase()
}

fn setting<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue(key.to_string())),
        Some(value) => Ok(value.trim().to_string()),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for setting '{0}': must not be blank")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SuperUserConfig::default();

        assert_eq!(config.super_user_id, "super-user");
        assert_eq!(config.super_user_did, "did:web:super-user");
    }

    #[test]
    fn test_from_lookup_without_values_uses_defaults() {
        let config = SuperUserConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SuperUserConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = SuperUserConfig::from_lookup(lookup_from(&[
            (SUPER_USER_ID_KEY, "admin"),
            (SUPER_USER_DID_KEY, " did:web:example.com:admin "),
        ]))
        .unwrap();

        assert_eq!(config.super_user_id, "admin");
        assert_eq!(config.super_user_did, "did:web:example.com:admin");
    }

    #[test]
    fn test_from_lookup_rejects_blank_value() {
        let result = SuperUserConfig::from_lookup(lookup_from(&[(SUPER_USER_ID_KEY, "  ")]));

        assert!(matches!(result, Err(ConfigError::InvalidValue(key)) if key == SUPER_USER_ID_KEY));
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name(SUPER_USER_ID_KEY), "EDC_IH_SUPERUSER_ID");
        assert_eq!(env_var_name(SUPER_USER_DID_KEY), "EDC_IH_SUPERUSER_DID");
    }
}
