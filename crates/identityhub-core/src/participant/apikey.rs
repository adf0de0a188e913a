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

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use rand::Rng;

const API_KEY_RANDOM_BYTES: usize = 32;

/// Generates an API key of the form `base64(participant_context_id).base64url(random)`.
///
/// The prefix lets the identity service resolve the owning participant before checking the secret part.
pub fn generate_api_key(participant_context_id: &str) -> String {
    let mut secret = [0u8; API_KEY_RANDOM_BYTES];
    rand::rng().fill(&mut secret);
    format!(
        "{}.{}",
        STANDARD.encode(participant_context_id),
        URL_SAFE_NO_PAD.encode(secret)
    )
}
