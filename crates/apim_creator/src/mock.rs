//! In-memory content loader for testing.
//!
//! Serves registered documents by location and records every requested
//! location, so generation can be exercised without touching the file
//! system or the network.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{CreatorError, CreatorResult};
use crate::loader::ContentLoader;

/// Mock content loader.
#[derive(Clone, Default)]
pub struct MockLoader {
    /// Documents keyed by location.
    contents: Arc<RwLock<HashMap<String, String>>>,
    /// Locations requested so far, in order.
    requested: Arc<RwLock<Vec<String>>>,
    /// Simulated fetch failure.
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `content` for `location`.
    pub fn with_content(self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents.write().insert(location.into(), content.into());
        self
    }

    /// Fail every fetch with a `Fetch` error carrying `message`.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// Locations requested so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested.read().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.requested.read().len()
    }

    pub fn was_requested(&self, location: &str) -> bool {
        self.requested.read().iter().any(|l| l == location)
    }
}

#[async_trait]
impl ContentLoader for MockLoader {
    async fn fetch(&self, location: &str) -> CreatorResult<String> {
        self.requested.write().push(location.to_string());

        if let Some(message) = self.simulate_failure.read().clone() {
            return Err(CreatorError::Fetch {
                location: location.to_string(),
                message,
            });
        }

        self.contents
            .read()
            .get(location)
            .cloned()
            .ok_or_else(|| CreatorError::LocationNotFound(location.to_string()))
    }
}
