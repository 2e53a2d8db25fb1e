//! Installer that records calls instead of running anything.

use std::sync::{Arc, Mutex};

use stackforge_core::{
    application::{
        ApplicationError,
        ports::{InstallOptions, PackageInstaller},
    },
    error::StackforgeResult,
};

/// One recorded `install` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCall {
    pub packages: Vec<String>,
    pub options: InstallOptions,
}

/// Records every call; optionally fails them all.
#[derive(Debug, Clone, Default)]
pub struct RecordingInstaller {
    calls: Arc<Mutex<Vec<InstallCall>>>,
    fail_with: Option<String>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `reason` (after being recorded).
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            calls: Arc::default(),
            fail_with: Some(reason.into()),
        }
    }

    pub fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl PackageInstaller for RecordingInstaller {
    fn install(&self, packages: &[String], options: &InstallOptions) -> StackforgeResult<()> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(InstallCall {
                packages: packages.to_vec(),
                options: options.clone(),
            });

        match &self.fail_with {
            Some(reason) => Err(ApplicationError::Install {
                package_manager: options.package_manager.to_string(),
                reason: reason.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}
