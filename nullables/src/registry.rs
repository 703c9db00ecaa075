//! Nullable registry — thread-safe in-memory land registry for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use veridia_registry::{RegistryError, RegistryReader};
use veridia_types::address::normalize;
use veridia_types::{LandId, LandRecord, LandStatus};

/// An in-memory registry keyed by contract account and land id.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullRegistry {
    records: Mutex<HashMap<(String, LandId), LandRecord>>,
    /// Error returned by every read while set.
    failure: Mutex<Option<RegistryError>>,
    /// Errors returned only for specific parcels.
    land_failures: Mutex<HashMap<LandId, RegistryError>>,
    /// Artificial latency applied before every read.
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl NullRegistry {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            land_failures: Mutex::new(HashMap::new()),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Store `record` under `contract`, replacing any previous version.
    pub fn insert(&self, contract: &str, record: LandRecord) {
        self.records
            .lock()
            .unwrap()
            .insert((normalize(contract), record.id), record);
    }

    /// Simulate a transfer of ownership.
    pub fn set_owner(&self, contract: &str, land_id: LandId, owner: &str) {
        if let Some(record) = self
            .records
            .lock()
            .unwrap()
            .get_mut(&(normalize(contract), land_id))
        {
            record.owner = owner.to_string();
        }
    }

    /// Make every subsequent read fail with `error`.
    pub fn fail_with(&self, error: RegistryError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Make reads of `land_id` fail with `error`.
    pub fn fail_land(&self, land_id: LandId, error: RegistryError) {
        self.land_failures.lock().unwrap().insert(land_id, error);
    }

    /// Delay every read by `delay`.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    /// Clear injected failures.
    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
        self.land_failures.lock().unwrap().clear();
    }

    /// Number of reads served (including failed ones).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn begin_read(&self, land_id: Option<LandId>) -> Result<(), RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        if let Some(land_id) = land_id {
            if let Some(error) = self.land_failures.lock().unwrap().get(&land_id).cloned() {
                return Err(error);
            }
        }
        Ok(())
    }

    fn lookup(&self, contract: &str, land_id: LandId) -> Option<LandRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(normalize(contract), land_id))
            .cloned()
    }
}

impl Default for NullRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryReader for NullRegistry {
    async fn get_land(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandRecord>, RegistryError> {
        self.begin_read(Some(land_id)).await?;
        Ok(self.lookup(contract, land_id))
    }

    async fn land_exists(&self, contract: &str, land_id: LandId) -> Result<bool, RegistryError> {
        self.begin_read(Some(land_id)).await?;
        Ok(self.lookup(contract, land_id).is_some())
    }

    async fn land_status(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandStatus>, RegistryError> {
        self.begin_read(Some(land_id)).await?;
        Ok(self.lookup(contract, land_id).map(|r| r.status))
    }

    async fn next_land_id(&self, contract: &str) -> Result<LandId, RegistryError> {
        self.begin_read(None).await?;
        let contract = normalize(contract);
        let highest = self
            .records
            .lock()
            .unwrap()
            .keys()
            .filter(|(c, _)| *c == contract)
            .map(|(_, id)| id.get())
            .max()
            .unwrap_or(0);
        Ok(LandId::new(highest + 1).unwrap_or(LandId::FIRST))
    }
}
