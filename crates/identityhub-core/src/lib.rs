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

//! Participant context domain for the Identity Hub: manifests and records, the participant context service, key
//! pair generation and the vault holding private keys and API keys.

pub mod context;
pub mod keys;
pub mod participant;
pub mod vault;
