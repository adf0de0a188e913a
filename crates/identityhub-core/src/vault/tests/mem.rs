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

use crate::vault::{MemoryVaultClient, VaultClient, VaultError};

#[tokio::test]
async fn test_store_and_resolve_secret() {
    let vault = MemoryVaultClient::new();

    vault.store_secret("participant1", "alias1", "secret-value").await.unwrap();

    let secret = vault.resolve_secret("participant1", "alias1").await.unwrap();
    assert_eq!(secret, "secret-value");
}

#[tokio::test]
async fn test_resolve_missing_secret() {
    let vault = MemoryVaultClient::new();

    let result = vault.resolve_secret("participant1", "missing").await;

    assert!(matches!(result, Err(VaultError::SecretNotFound(alias)) if alias == "missing"));
}

#[tokio::test]
async fn test_secrets_are_partitioned_by_participant() {
    let vault = MemoryVaultClient::new();

    vault.store_secret("participant1", "alias", "secret1").await.unwrap();
    vault.store_secret("participant2", "alias", "secret2").await.unwrap();

    assert_eq!(vault.resolve_secret("participant1", "alias").await.unwrap(), "secret1");
    assert_eq!(vault.resolve_secret("participant2", "alias").await.unwrap(), "secret2");
    assert_eq!(vault.secret_count(), 2);
}

#[tokio::test]
async fn test_store_overwrites_existing_secret() {
    let vault = MemoryVaultClient::new();

    vault.store_secret("participant1", "alias", "old").await.unwrap();
    vault.store_secret("participant1", "alias", "new").await.unwrap();

    assert_eq!(vault.resolve_secret("participant1", "alias").await.unwrap(), "new");
    assert_eq!(vault.secret_count(), 1);
}

#[tokio::test]
async fn test_store_rejects_blank_alias() {
    let vault = MemoryVaultClient::new();

    let result = vault.store_secret("participant1", "  ", "secret").await;

    assert!(matches!(result, Err(VaultError::InvalidData(_))));
    assert_eq!(vault.secret_count(), 0);
}

#[tokio::test]
async fn test_remove_secret() {
    let vault = MemoryVaultClient::new();
    vault.store_secret("participant1", "alias", "secret").await.unwrap();

    vault.remove_secret("participant1", "alias").await.unwrap();

    assert!(vault.resolve_secret("participant1", "alias").await.is_err());
    // Removing again is a no-op
    assert!(vault.remove_secret("participant1", "alias").await.is_ok());
}

#[tokio::test]
async fn test_separator_in_ids_does_not_collide() {
    let vault = MemoryVaultClient::new();

    vault.store_secret("a/b", "b-apikey", "api-key").await.unwrap();
    vault.store_secret("a", "b/a/b-apikey", "other").await.unwrap();
    vault.store_secret("a", "b/b-apikey", "other").await.unwrap();

    assert_eq!(vault.resolve_secret("a/b", "b-apikey").await.unwrap(), "api-key");
    assert_eq!(vault.secret_count(), 3);

    vault.remove_secret("a", "b/b-apikey").await.unwrap();
    assert_eq!(vault.resolve_secret("a/b", "b-apikey").await.unwrap(), "api-key");
}
