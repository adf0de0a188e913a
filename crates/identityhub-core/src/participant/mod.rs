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

mod apikey;
mod mem;
mod validation;

pub use apikey::generate_api_key;
pub use mem::MemoryParticipantContextService;
pub use validation::validate_manifest;

use crate::context::{ParticipantContext, ParticipantManifest};
use crate::keys::KeyGenerationError;
use crate::vault::VaultError;
use async_trait::async_trait;
use thiserror::Error;

/// Suffix of the vault alias under which a participant's API key is stored.
pub const API_KEY_ALIAS_SUFFIX: &str = "-apikey";

/// Returns the vault alias of the API key for the given participant context.
pub fn api_key_alias(participant_context_id: &str) -> String {
    format!("{}{}", participant_context_id, API_KEY_ALIAS_SUFFIX)
}

/// The result of creating a participant context.
///
/// The API key is only ever returned here. It is stored in the vault but not exposed through any lookup operation.
#[derive(Clone)]
pub struct CreateParticipantContextResponse {
    pub api_key: String,
    pub participant_context: ParticipantContext,
}

impl std::fmt::Debug for CreateParticipantContextResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateParticipantContextResponse")
            .field("api_key", &"***")
            .field("participant_context", &self.participant_context)
            .finish()
    }
}

/// Manages participant contexts: their records, key material and API keys.
#[async_trait]
pub trait ParticipantContextService: Send + Sync {
    /// Returns the participant context with the given id, or [`ParticipantContextError::NotFound`].
    async fn get_participant_context(
        &self,
        participant_context_id: &str,
    ) -> Result<ParticipantContext, ParticipantContextError>;

    /// Creates a participant context from a manifest, generating its keys and API key.
    async fn create_participant_context(
        &self,
        manifest: ParticipantManifest,
    ) -> Result<CreateParticipantContextResponse, ParticipantContextError>;

    /// Returns all participant contexts, ordered by id.
    async fn query_participant_contexts(&self) -> Result<Vec<ParticipantContext>, ParticipantContextError>;
}

#[derive(Debug, Error)]
pub enum ParticipantContextError {
    #[error("Participant context not found: {0}")]
    NotFound(String),

    #[error("Participant context already exists: {0}")]
    Conflict(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Key generation error: {0}")]
    KeyGenerationError(#[from] KeyGenerationError),

    #[error("Vault error: {0}")]
    VaultError(#[from] VaultError),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl ParticipantContextError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ParticipantContextError::NotFound(_))
    }
}
