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

use crate::context::{ParticipantContext, ParticipantContextState, ParticipantManifest};
use crate::keys::{KeyPairGenerator, default_key_pair_generator};
use crate::participant::{
    CreateParticipantContextResponse, ParticipantContextError, ParticipantContextService, api_key_alias,
    generate_api_key, validate_manifest,
};
use crate::vault::VaultClient;
use async_trait::async_trait;
use bon::Builder;
use chrono::Utc;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct ContextStore {
    contexts: HashMap<String, ParticipantContext>,
    // Ids whose creation is in progress
    reserved: HashSet<String>,
}

/// A thread-safe, in-memory participant context service for development and testing.
///
/// Generated private keys and API keys are written to the configured vault. Records live only for the lifetime of
/// the service.
#[derive(Builder)]
pub struct MemoryParticipantContextService {
    vault_client: Arc<dyn VaultClient>,

    #[builder(default = default_key_pair_generator())]
    key_pair_generator: Arc<dyn KeyPairGenerator>,

    #[builder(skip)]
    store: RwLock<ContextStore>,
}

impl MemoryParticipantContextService {
    fn read_store(&self) -> Result<RwLockReadGuard<'_, ContextStore>, ParticipantContextError> {
        self.store
            .read()
            .map_err(|e| ParticipantContextError::StoreError(format!("Failed to acquire lock: {}", e)))
    }

    fn write_store(&self) -> Result<RwLockWriteGuard<'_, ContextStore>, ParticipantContextError> {
        self.store
            .write()
            .map_err(|e| ParticipantContextError::StoreError(format!("Failed to acquire lock: {}", e)))
    }

    /// Claims the id for a pending creation. Fails if a context with the id exists or is being created.
    fn reserve(&self, participant_context_id: &str) -> Result<(), ParticipantContextError> {
        let mut store = self.write_store()?;
        if store.contexts.contains_key(participant_context_id) || store.reserved.contains(participant_context_id) {
            return Err(ParticipantContextError::Conflict(participant_context_id.to_string()));
        }
        store.reserved.insert(participant_context_id.to_string());
        Ok(())
    }

    fn release(&self, participant_context_id: &str) {
        match self.store.write() {
            Ok(mut store) => {
                store.reserved.remove(participant_context_id);
            }
            Err(e) => warn!("Failed to release participant context '{}': {}", participant_context_id, e),
        }
    }

    /// Generates and stores key material and the API key. Aliases written to the vault are appended to `written`.
    async fn provision_secrets(
        &self,
        manifest: &ParticipantManifest,
        written: &mut Vec<String>,
    ) -> Result<String, ParticipantContextError> {
        let participant_context_id = manifest.participant_context_id.as_str();

        for key in &manifest.keys {
            let Some(params) = &key.key_generator_params else {
                // Public key supplied by the caller, the private key is managed elsewhere
                continue;
            };
            let key_pair = self.key_pair_generator.generate_key_pair(params)?;
            self.vault_client
                .store_secret(participant_context_id, &key.private_key_alias, &key_pair.private_key_pem)
                .await?;
            written.push(key.private_key_alias.clone());
            debug!(
                "Generated {:?} key '{}' for participant context '{}'",
                key_pair.algorithm, key.key_id, participant_context_id
            );
        }

        let api_key = generate_api_key(participant_context_id);
        let alias = api_key_alias(participant_context_id);
        self.vault_client
            .store_secret(participant_context_id, &alias, &api_key)
            .await?;
        written.push(alias);

        Ok(api_key)
    }

    async fn remove_secrets(&self, participant_context_id: &str, aliases: &[String]) {
        for alias in aliases {
            if let Err(e) = self.vault_client.remove_secret(participant_context_id, alias).await {
                warn!(
                    "Failed to remove secret '{}' of participant context '{}': {}",
                    alias, participant_context_id, e
                );
            }
        }
    }
}

#[async_trait]
impl ParticipantContextService for MemoryParticipantContextService {
    async fn get_participant_context(
        &self,
        participant_context_id: &str,
    ) -> Result<ParticipantContext, ParticipantContextError> {
        self.read_store()?
            .contexts
            .get(participant_context_id)
            .cloned()
            .ok_or_else(|| ParticipantContextError::NotFound(participant_context_id.to_string()))
    }

    async fn create_participant_context(
        &self,
        manifest: ParticipantManifest,
    ) -> Result<CreateParticipantContextResponse, ParticipantContextError> {
        validate_manifest(&manifest)?;

        let participant_context_id = manifest.participant_context_id.clone();
        self.reserve(&participant_context_id)?;

        let mut written = Vec::new();
        let api_key = match self.provision_secrets(&manifest, &mut written).await {
            Ok(api_key) => api_key,
            Err(e) => {
                self.remove_secrets(&participant_context_id, &written).await;
                self.release(&participant_context_id);
                return Err(e);
            }
        };

        let now = Utc::now();
        let state = if manifest.active {
            ParticipantContextState::Activated
        } else {
            ParticipantContextState::Created
        };
        let participant_context = ParticipantContext::builder()
            .participant_context_id(participant_context_id.clone())
            .did(manifest.did)
            .state(state)
            .roles(manifest.roles)
            .keys(manifest.keys)
            .service_endpoints(manifest.service_endpoints)
            .api_token_alias(api_key_alias(&participant_context_id))
            .created_at(now)
            .last_modified(now)
            .build();

        {
            let mut store = self.write_store()?;
            store.reserved.remove(&participant_context_id);
            store
                .contexts
                .insert(participant_context_id.clone(), participant_context.clone());
        }

        debug!("Created participant context '{}'", participant_context_id);
        Ok(CreateParticipantContextResponse {
            api_key,
            participant_context,
        })
    }

    async fn query_participant_contexts(&self) -> Result<Vec<ParticipantContext>, ParticipantContextError> {
        let mut all: Vec<ParticipantContext> = self.read_store()?.contexts.values().cloned().collect();
        all.sort_by(|a, b| a.participant_context_id.cmp(&b.participant_context_id));
        Ok(all)
    }
}

#[cfg(test)]
impl MemoryParticipantContextService {
    /// Number of participant contexts held by the service
    pub(crate) fn context_count(&self) -> usize {
        self.store.read().map(|store| store.contexts.len()).unwrap_or(0)
    }
}
