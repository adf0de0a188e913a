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

use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use thiserror::Error;

/// A unit of runtime functionality started once when the process boots, before requests are served.
#[async_trait]
pub trait ServiceExtension: Send + Sync {
    fn name(&self) -> &str;

    async fn start(&self) -> Result<(), ExtensionError>;
}

/// Starts the extensions in order. Stops at the first extension that fails to start.
pub async fn start_extensions(extensions: &[Arc<dyn ServiceExtension>]) -> Result<(), ExtensionError> {
    for extension in extensions {
        info!("Starting extension: {}", extension.name());
        extension.start().await?;
    }
    info!("Started {} extension(s)", extensions.len());
    Ok(())
}

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Extension '{name}' failed to start: {reason}")]
    StartFailed { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingExtension {
        name: String,
        fail: bool,
        started: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ServiceExtension for RecordingExtension {
        fn name(&self) -> &str {
            &self.name
        }

        async fn start(&self) -> Result<(), ExtensionError> {
            self.started.lock().unwrap().push(self.name.clone());
            if self.fail {
                return Err(ExtensionError::StartFailed {
                    name: self.name.clone(),
                    reason: "backend unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    fn extension(name: &str, fail: bool, started: &Arc<Mutex<Vec<String>>>) -> Arc<dyn ServiceExtension> {
        Arc::new(RecordingExtension {
            name: name.to_string(),
            fail,
            started: started.clone(),
        })
    }

    #[tokio::test]
    async fn test_start_extensions_in_order() {
        let started = Arc::new(Mutex::new(Vec::new()));

        let result = start_extensions(&[extension("first", false, &started), extension("second", false, &started)]).await;

        assert!(result.is_ok());
        assert_eq!(*started.lock().unwrap(), vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_start_extensions_stops_at_first_failure() {
        let started = Arc::new(Mutex::new(Vec::new()));

        let result = start_extensions(&[
            extension("failing", true, &started),
            extension("never-started", false, &started),
        ])
        .await;

        let Err(ExtensionError::StartFailed { name, reason }) = result else {
            panic!("Expected start failure");
        };
        assert_eq!(name, "failing");
        assert_eq!(reason, "backend unavailable");
        assert_eq!(*started.lock().unwrap(), vec!["failing".to_string()]);
    }
}
