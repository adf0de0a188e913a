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

//! Development-only bootstrap of a super-user participant context.
//!
//! The Identity API requires an API key to create participant contexts, but a fresh install has none. On startup
//! this seed creates an administrative participant context with a generated API key and logs the key once.
//!
//! DO NOT use in production. Production deployments must provision participants through a proper mechanism.

#[cfg(test)]
mod tests;

use crate::config::SuperUserConfig;
use crate::extension::{ExtensionError, ServiceExtension};
use async_trait::async_trait;
use bon::Builder;
use dsdk_identityhub_core::context::{
    KEY_GENERATOR_ALGORITHM, KEY_GENERATOR_CURVE, KeyDescriptor, ParticipantManifest,
};
use dsdk_identityhub_core::participant::ParticipantContextService;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

pub const NAME: &str = "Super User Seed Extension (DEV)";
pub const ADMIN_ROLE: &str = "admin";

const SUPER_USER_KEY_ALGORITHM: &str = "EC";
const SUPER_USER_KEY_CURVE: &str = "secp256r1";
const BANNER: &str = "==========================================================";

/// The path taken by a seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The super-user already existed
    Skipped,
    Created,
    /// Creation was rejected, with the failure detail
    Failed(String),
}

/// Creates the super-user participant context if it does not exist yet.
#[derive(Builder)]
pub struct SuperUserSeed {
    #[builder(default)]
    config: SuperUserConfig,
    participant_context_service: Arc<dyn ParticipantContextService>,
}

impl SuperUserSeed {
    /// Runs the seed. Failures are logged and reported in the outcome, never returned as errors.
    pub async fn run(&self) -> SeedOutcome {
        let super_user_id = self.config.super_user_id.as_str();
        let super_user_did = self.config.super_user_did.as_str();

        match self
            .participant_context_service
            .get_participant_context(super_user_id)
            .await
        {
            Ok(_) => {
                info!("Super-user '{}' already exists, skipping bootstrap.", super_user_id);
                return SeedOutcome::Skipped;
            }
            Err(e) if e.is_not_found() => debug!("Super-user '{}' not found, creating it", super_user_id),
            // Lookup errors are treated as absence
            Err(e) => warn!(
                "Failed to look up super-user '{}': {}. Attempting to create it.",
                super_user_id, e
            ),
        }

        let manifest = super_user_manifest(super_user_id, super_user_did);
        match self
            .participant_context_service
            .create_participant_context(manifest)
            .await
        {
            Ok(response) => {
                info!("{}", BANNER);
                info!("  DEV SUPER-USER BOOTSTRAPPED");
                info!("  Participant ID: {}", super_user_id);
                info!("  DID:            {}", super_user_did);
                info!("  API Key:        {}", response.api_key);
                info!("{}", BANNER);
                SeedOutcome::Created
            }
            Err(e) => {
                error!("Failed to bootstrap super-user: {}", e);
                SeedOutcome::Failed(e.to_string())
            }
        }
    }
}

#[async_trait]
impl ServiceExtension for SuperUserSeed {
    fn name(&self) -> &str {
        NAME
    }

    async fn start(&self) -> Result<(), ExtensionError> {
        // Outcomes are already logged, a failed seed must not stop the runtime
        self.run().await;
        Ok(())
    }
}

/// Builds the manifest for an active admin participant with a single generated P-256 key.
pub fn super_user_manifest(super_user_id: &str, super_user_did: &str) -> ParticipantManifest {
    let key = KeyDescriptor::builder()
        .key_id(format!("{}-key", super_user_id))
        .private_key_alias(format!("{}-alias", super_user_id))
        .key_generator_params(HashMap::from([
            (KEY_GENERATOR_ALGORITHM.to_string(), SUPER_USER_KEY_ALGORITHM.to_string()),
            (KEY_GENERATOR_CURVE.to_string(), SUPER_USER_KEY_CURVE.to_string()),
        ]))
        .active(true)
        .build();

    ParticipantManifest::builder()
        .participant_context_id(super_user_id)
        .did(super_user_did)
        .active(true)
        .roles(vec![ADMIN_ROLE.to_string()])
        .keys(vec![key])
        .service_endpoints(Vec::new())
        .build()
}
