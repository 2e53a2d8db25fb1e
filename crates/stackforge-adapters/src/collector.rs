//! Error collector adapters.

use std::sync::{Arc, Mutex};

use stackforge_core::{application::ports::ErrorCollector, error::StackforgeError};

/// One collected error.
#[derive(Debug, Clone)]
pub struct CollectedError {
    pub context: String,
    pub error: StackforgeError,
}

/// Keeps every collected error in memory for later display.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollector {
    entries: Arc<Mutex<Vec<CollectedError>>>,
}

impl MemoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<CollectedError> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorCollector for MemoryCollector {
    fn collect(&self, context: &str, error: &StackforgeError) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(CollectedError {
                context: context.to_string(),
                error: error.clone(),
            });
        }
    }
}
