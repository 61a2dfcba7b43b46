//! Persistence of the whole plan collection as a single JSON blob.
//!
//! The adapter never fails towards its caller: unreadable data loads as an
//! empty collection and failed writes are logged and dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::AppError;
use crate::model::Plan;

pub const STORAGE_KEY: &str = "strategic-planner-pro";

/// Key-value storage for opaque string blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn put(&self, key: &str, value: String) -> Result<(), AppError>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub current_plan_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredStateRef<'a> {
    plans: &'a [Plan],
    current_plan_id: Option<&'a str>,
}

pub struct PlanStore {
    backend: Arc<dyn BlobStore>,
    key: String,
}

impl PlanStore {
    pub fn new(backend: Arc<dyn BlobStore>) -> Self {
        Self {
            backend,
            key: STORAGE_KEY.to_string(),
        }
    }

    pub async fn load(&self) -> StoredState {
        let raw = match self.backend.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored plans");
                return StoredState::default();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read stored plans");
                return StoredState::default();
            }
        };
        match serde_json::from_str::<StoredState>(&raw) {
            Ok(state) => {
                debug!(plans = state.plans.len(), "loaded stored plans");
                state
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored plans are corrupt; starting empty");
                StoredState::default()
            }
        }
    }

    /// Writes the collection and pointer in one blob. Returns whether the
    /// write reached the backend; failures are logged, never raised.
    pub async fn save(&self, plans: &[Plan], current_plan_id: Option<&str>) -> bool {
        let payload = match serde_json::to_string(&StoredStateRef {
            plans,
            current_plan_id,
        }) {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "failed to serialize plans");
                return false;
            }
        };
        match self.backend.put(&self.key, payload).await {
            Ok(()) => {
                debug!(plans = plans.len(), "saved plans");
                true
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "failed to save plans");
                false
            }
        }
    }
}

/// In-process blob store. Reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().insert(key.to_string(), value.into());
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `put` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds consistent strings.
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Io(std::io::Error::other("storage unavailable")));
        }
        Ok(self.lock().get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Io(std::io::Error::other("storage quota exceeded")));
        }
        self.lock().insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
