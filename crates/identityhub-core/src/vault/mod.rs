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

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// A client for a secrets vault. Secrets are partitioned by participant context id.
#[async_trait]
pub trait VaultClient: Send + Sync {
    async fn resolve_secret(&self, participant_context_id: &str, alias: &str) -> Result<String, VaultError>;
    async fn store_secret(&self, participant_context_id: &str, alias: &str, secret: &str) -> Result<(), VaultError>;
    async fn remove_secret(&self, participant_context_id: &str, alias: &str) -> Result<(), VaultError>;
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

/// In-memory vault client for development and testing.
pub struct MemoryVaultClient {
    // participant context id -> alias -> secret
    secrets: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl MemoryVaultClient {
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryVaultClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VaultClient for MemoryVaultClient {
    async fn resolve_secret(&self, participant_context_id: &str, alias: &str) -> Result<String, VaultError> {
        let secrets = self
            .secrets
            .read()
            .map_err(|e| VaultError::StoreError(format!("Failed to acquire lock: {}", e)))?;

        secrets
            .get(participant_context_id)
            .and_then(|participant_secrets| participant_secrets.get(alias))
            .cloned()
            .ok_or_else(|| VaultError::SecretNotFound(alias.to_string()))
    }

    async fn store_secret(&self, participant_context_id: &str, alias: &str, secret: &str) -> Result<(), VaultError> {
        if alias.trim().is_empty() {
            return Err(VaultError::InvalidData("Secret alias must not be blank".to_string()));
        }

        let mut secrets = self
            .secrets
            .write()
            .map_err(|e| VaultError::StoreError(format!("Failed to acquire lock: {}", e)))?;
        secrets
            .entry(participant_context_id.to_string())
            .or_default()
            .insert(alias.to_string(), secret.to_string());
        Ok(())
    }

    async fn remove_secret(&self, participant_context_id: &str, alias: &str) -> Result<(), VaultError> {
        let mut secrets = self
            .secrets
            .write()
            .map_err(|e| VaultError::StoreError(format!("Failed to acquire lock: {}", e)))?;
        let Some(participant_secrets) = secrets.get_mut(participant_context_id) else {
            return Ok(());
        };
        participant_secrets.remove(alias);
        if participant_secrets.is_empty() {
            secrets.remove(participant_context_id);
        }
        Ok(())
    }
}

#[cfg(test)]
impl MemoryVaultClient {
    /// Number of secrets held across all participants
    pub(crate) fn secret_count(&self) -> usize {
        self.secrets
            .read()
            .map(|secrets| secrets.values().map(HashMap::len).sum())
            .unwrap_or(0)
    }
}
