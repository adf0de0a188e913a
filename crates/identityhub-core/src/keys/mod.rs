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

use crate::context::{KEY_GENERATOR_ALGORITHM, KEY_GENERATOR_CURVE};
use ed25519_dalek::SigningKey;
use pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Key algorithms the identity service can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    /// ECDSA on NIST P-256 (`secp256r1`).
    EcP256,
    Ed25519,
}

impl KeyAlgorithm {
    /// Resolves the algorithm from key generator parameters.
    ///
    /// Names are matched case-insensitively. When no curve is given, `EC` defaults to `secp256r1` and `EdDSA`
    /// defaults to `Ed25519`.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, KeyGenerationError> {
        let algorithm = params
            .get(KEY_GENERATOR_ALGORITHM)
            .map(|a| a.trim().to_ascii_uppercase())
            .ok_or_else(|| KeyGenerationError::InvalidParameters("Missing key algorithm".to_string()))?;
        let curve = params.get(KEY_GENERATOR_CURVE).map(|c| c.trim().to_ascii_lowercase());

        match (algorithm.as_str(), curve.as_deref()) {
            ("EC", None | Some("secp256r1") | Some("p-256") | Some("prime256v1")) => Ok(KeyAlgorithm::EcP256),
            ("EDDSA" | "ED25519", None | Some("ed25519")) => Ok(KeyAlgorithm::Ed25519),
            (algorithm, curve) => Err(KeyGenerationError::UnsupportedAlgorithm(format!(
                "{} (curve: {})",
                algorithm,
                curve.unwrap_or("none")
            ))),
        }
    }
}

/// A generated key pair. Both keys are PEM-encoded: PKCS#8 for the private key, SPKI for the public key.
#[derive(Clone)]
pub struct GeneratedKeyPair {
    pub algorithm: KeyAlgorithm,
    pub private_key_pem: String,
    pub public_key_pem: String,
}

impl std::fmt::Debug for GeneratedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedKeyPair")
            .field("algorithm", &self.algorithm)
            .field("private_key_pem", &"***")
            .field("public_key_pem", &self.public_key_pem)
            .finish()
    }
}

/// Generates key pairs from the parameters carried by a key descriptor.
pub trait KeyPairGenerator: Send + Sync {
    fn generate_key_pair(&self, params: &HashMap<String, String>) -> Result<GeneratedKeyPair, KeyGenerationError>;
}

pub fn default_key_pair_generator() -> Arc<dyn KeyPairGenerator> {
    Arc::new(DefaultKeyPairGenerator)
}

/// Generates P-256 and Ed25519 key pairs from the thread-local CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultKeyPairGenerator;

impl DefaultKeyPairGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl KeyPairGenerator for DefaultKeyPairGenerator {
    fn generate_key_pair(&self, params: &HashMap<String, String>) -> Result<GeneratedKeyPair, KeyGenerationError> {
        match KeyAlgorithm::from_params(params)? {
            KeyAlgorithm::EcP256 => generate_p256_keypair_pem(),
            KeyAlgorithm::Ed25519 => generate_ed25519_keypair_pem(),
        }
    }
}

/// Generates a P-256 keypair and returns both private and public keys in PEM format.
pub fn generate_p256_keypair_pem() -> Result<GeneratedKeyPair, KeyGenerationError> {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    let secret_key = p256::SecretKey::from_slice(&bytes)
        .map_err(|e| KeyGenerationError::GenerationError(format!("Failed to create EC key: {}", e)))?;

    let private_key_pem = secret_key
        .to_pkcs8_pem(LineEnding::LF)
        .map(|pem| pem.as_str().to_string())
        .map_err(|e| KeyGenerationError::EncodingError(format!("Failed to encode private key: {}", e)))?;

    let public_key_pem = secret_key
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyGenerationError::EncodingError(format!("Failed to encode public key: {}", e)))?;

    Ok(GeneratedKeyPair {
        algorithm: KeyAlgorithm::EcP256,
        private_key_pem,
        public_key_pem,
    })
}

/// Generates an Ed25519 keypair and returns both private and public keys in PEM format.
pub fn generate_ed25519_keypair_pem() -> Result<GeneratedKeyPair, KeyGenerationError> {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    let signing_key = SigningKey::from_bytes(&bytes);

    let private_key_pem = signing_key
        .to_pkcs8_pem(LineEnding::LF)
        .map(|pem| pem.as_str().to_string())
        .map_err(|e| KeyGenerationError::EncodingError(format!("Failed to encode private key: {}", e)))?;

    let public_key_pem = signing_key
        .verifying_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyGenerationError::EncodingError(format!("Failed to encode public key: {}", e)))?;

    Ok(GeneratedKeyPair {
        algorithm: KeyAlgorithm::Ed25519,
        private_key_pem,
        public_key_pem,
    })
}

#[derive(Debug, Error)]
pub enum KeyGenerationError {
    #[error("Invalid key generator parameters: {0}")]
    InvalidParameters(String),

    #[error("Unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to generate key: {0}")]
    GenerationError(String),

    #[error("Failed to encode key: {0}")]
    EncodingError(String),
}
