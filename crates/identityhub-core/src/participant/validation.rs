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

use crate::context::{KeyDescriptor, ParticipantManifest};
use crate::participant::{ParticipantContextError, api_key_alias};
use std::collections::HashSet;

/// Validates a manifest before a participant context is created from it.
pub fn validate_manifest(manifest: &ParticipantManifest) -> Result<(), ParticipantContextError> {
    if manifest.participant_context_id.trim().is_empty() {
        return Err(invalid("participant context id must not be blank"));
    }
    if manifest.did.trim().is_empty() {
        return Err(invalid("DID must not be blank"));
    }

    let reserved_alias = api_key_alias(&manifest.participant_context_id);
    let mut key_ids = HashSet::new();
    let mut aliases = HashSet::new();
    for key in &manifest.keys {
        validate_key_descriptor(key)?;
        if !key_ids.insert(key.key_id.as_str()) {
            return Err(invalid(&format!("duplicate key id '{}'", key.key_id)));
        }
        if !aliases.insert(key.private_key_alias.as_str()) {
            return Err(invalid(&format!("duplicate private key alias '{}'", key.private_key_alias)));
        }
        if key.private_key_alias == reserved_alias {
            return Err(invalid(&format!("private key alias '{}' is reserved", reserved_alias)));
        }
    }
    Ok(())
}

fn validate_key_descriptor(key: &KeyDescriptor) -> Result<(), ParticipantContextError> {
    if key.key_id.trim().is_empty() {
        return Err(invalid("key id must not be blank"));
    }
    if key.private_key_alias.trim().is_empty() {
        return Err(invalid(&format!("private key alias of key '{}' must not be blank", key.key_id)));
    }

    // Exactly one source of key material
    match (&key.public_key_pem, &key.key_generator_params) {
        (Some(_), Some(_)) => Err(invalid(&format!(
            "key '{}' must specify either a public key or key generator parameters, not both",
            key.key_id
        ))),
        (None, None) => Err(invalid(&format!(
            "key '{}' must specify a public key or key generator parameters",
            key.key_id
        ))),
        _ => Ok(()),
    }
}

fn invalid(message: &str) -> ParticipantContextError {
    ParticipantContextError::InvalidManifest(message.to_string())
}
