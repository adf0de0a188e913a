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

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const KEY_GENERATOR_ALGORITHM: &str = "algorithm";
pub const KEY_GENERATOR_CURVE: &str = "curve";

/// Lifecycle state of a participant context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantContextState {
    /// Created but not yet activated.
    Created,
    Activated,
}

/// A service endpoint published in the participant's DID document.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    #[builder(into)]
    pub id: String,
    #[serde(rename = "type")]
    #[builder(into)]
    pub endpoint_type: String,
    #[builder(into)]
    pub service_endpoint: String,
}

/// Describes a key pair associated with a participant context.
///
/// The private key is never carried here. It is referenced through `private_key_alias`, the handle under which the
/// key material is stored in the vault. A descriptor either supplies an existing public key or asks the identity
/// service to generate a pair from `key_generator_params`.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    #[builder(into)]
    pub key_id: String,

    #[builder(into)]
    pub private_key_alias: String,

    // PEM-encoded public key, when the key pair was created outside the identity service.
    #[builder(into)]
    pub public_key_pem: Option<String>,

    // Parameters for generating the key pair, e.g. {"algorithm": "EC", "curve": "secp256r1"}.
    pub key_generator_params: Option<HashMap<String, String>>,

    #[builder(default = true)]
    pub active: bool,
}

impl KeyDescriptor {
    /// Returns the value of a key generator parameter, if present.
    pub fn generator_param(&self, name: &str) -> Option<&str> {
        self.key_generator_params
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

/// A request to create a participant context.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantManifest {
    #[builder(into)]
    pub participant_context_id: String,

    // The participant's decentralized identifier, typically a Web DID.
    #[builder(into)]
    pub did: String,

    #[builder(default)]
    pub active: bool,

    #[builder(default)]
    pub roles: Vec<String>,

    #[builder(default)]
    pub keys: Vec<KeyDescriptor>,

    #[builder(default)]
    pub service_endpoints: Vec<ServiceEndpoint>,
}

/// A participant context as persisted by the identity service.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantContext {
    #[builder(into)]
    pub participant_context_id: String,

    #[builder(into)]
    pub did: String,

    #[builder(default = ParticipantContextState::Created)]
    pub state: ParticipantContextState,

    #[builder(default)]
    pub roles: Vec<String>,

    #[builder(default)]
    pub keys: Vec<KeyDescriptor>,

    #[builder(default)]
    pub service_endpoints: Vec<ServiceEndpoint>,

    // Vault alias under which the participant's API key is stored.
    #[builder(into)]
    pub api_token_alias: String,

    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,

    #[builder(default = Utc::now())]
    pub last_modified: DateTime<Utc>,
}

impl ParticipantContext {
    pub fn is_active(&self) -> bool {
        self.state == ParticipantContextState::Activated
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
