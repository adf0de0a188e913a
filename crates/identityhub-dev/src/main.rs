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

//! Identity Hub development runtime. Seeds a super-user on startup, then runs until interrupted.

use anyhow::{Context, Result};
use dsdk_identityhub_core::participant::{MemoryParticipantContextService, ParticipantContextService};
use dsdk_identityhub_core::vault::MemoryVaultClient;
use dsdk_identityhub_dev::{ServiceExtension, SuperUserConfig, SuperUserSeed, start_extensions};
use log::info;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SuperUserConfig::from_env().context("Failed to load super-user configuration")?;

    let vault_client = Arc::new(MemoryVaultClient::new());
    let participant_context_service: Arc<dyn ParticipantContextService> = Arc::new(
        MemoryParticipantContextService::builder()
            .vault_client(vault_client)
            .build(),
    );

    let seed: Arc<dyn ServiceExtension> = Arc::new(
        SuperUserSeed::builder()
            .config(config)
            .participant_context_service(participant_context_service)
            .build(),
    );
    start_extensions(&[seed])
        .await
        .context("Failed to start extensions")?;

    info!("Identity Hub development runtime ready, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");
    Ok(())
}
