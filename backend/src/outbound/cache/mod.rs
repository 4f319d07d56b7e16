//! In-process TTL cache for reference-data listings.
//!
//! Serves the read-heavy reference categories (subjects, boards, agencies,
//! topics-by-subject) from memory, refetching from the backing repository
//! once an entry's TTL elapses. Admin mutations fire the blunt
//! [`ReferenceCacheControl::invalidate_all`] hook rather than per-key
//! dependency tracking; reference data changes rarely enough that precision
//! is not worth the bookkeeping.
//!
//! Entries carry a jittered TTL to avoid thundering-herd refetches when many
//! keys were populated in the same instant. A background sweep purges
//! expired entries so memory stays bounded even for keys that are never read
//! again.
//!
//! # Concurrency
//!
//! Payloads are stored wholesale behind an `RwLock`; a `get` racing the
//! sweep on the same key sees either the old entry or a miss, never a torn
//! value. The lock is only held for map operations, never across awaits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    ReferenceCacheControl, ReferenceQuery, ReferenceRepository, ReferenceRepositoryError,
};
use crate::domain::{Agency, Board, Error, ReferenceKey, Subject, Topic};

/// Default lifetime of one cache entry.
pub const DEFAULT_ENTRY_TTL: Duration = Duration::from_secs(5 * 60);

/// Default interval between background sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Jitter applied to each entry's TTL, in percent of the base TTL.
const TTL_JITTER_PERCENT: u64 = 10;

fn map_reference_error(error: ReferenceRepositoryError) -> Error {
    match error {
        ReferenceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reference repository unavailable: {message}"))
        }
        ReferenceRepositoryError::Query { message } => {
            Error::internal(format!("reference repository error: {message}"))
        }
    }
}

/// One category's cached listing, replaced wholesale on refresh.
#[derive(Debug, Clone)]
enum ReferencePayload {
    Subjects(Arc<[Subject]>),
    Boards(Arc<[Board]>),
    Agencies(Arc<[Agency]>),
    Topics(Arc<[Topic]>),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: ReferencePayload,
    inserted_at: DateTime<Utc>,
    ttl: TimeDelta,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.inserted_at) < self.ttl
    }
}

/// TTL cache decorating a [`ReferenceRepository`] behind the reference
/// driving ports.
pub struct TtlReferenceCache<R> {
    backing: Arc<R>,
    clock: Arc<dyn Clock>,
    base_ttl: Duration,
    entries: RwLock<HashMap<ReferenceKey, CacheEntry>>,
    rng: Mutex<SmallRng>,
}

impl<R> TtlReferenceCache<R> {
    /// Create a cache over the backing repository with the default TTL.
    pub fn new(backing: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(backing, clock, DEFAULT_ENTRY_TTL)
    }

    /// Create a cache with an explicit base TTL.
    pub fn with_ttl(backing: Arc<R>, clock: Arc<dyn Clock>, base_ttl: Duration) -> Self {
        Self {
            backing,
            clock,
            base_ttl,
            entries: RwLock::new(HashMap::new()),
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Number of live (not yet swept) entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.read_entries().len()
    }

    /// Remove every entry whose TTL has elapsed. Returns how many were
    /// purged.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.utc();
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now));
        before - entries.len()
    }

    fn lookup(&self, key: ReferenceKey) -> Option<ReferencePayload> {
        let entries = self.read_entries();
        let entry = entries.get(&key)?;
        entry
            .is_fresh(self.clock.utc())
            .then(|| entry.payload.clone())
    }

    fn store(&self, key: ReferenceKey, payload: ReferencePayload) {
        let entry = CacheEntry {
            payload,
            inserted_at: self.clock.utc(),
            ttl: self.jittered_ttl(),
        };
        self.write_entries().insert(key, entry);
    }

    /// Base TTL spread by ±10% so entries populated together do not all
    /// expire in the same instant.
    fn jittered_ttl(&self) -> TimeDelta {
        let base_ms = u64::try_from(self.base_ttl.as_millis()).unwrap_or(u64::MAX);
        let spread = base_ms * TTL_JITTER_PERCENT / 100;
        let jittered = {
            let mut rng = match self.rng.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            base_ms - spread + rng.gen_range(0..=spread * 2)
        };
        TimeDelta::milliseconds(i64::try_from(jittered).unwrap_or(i64::MAX))
    }

    // Entries are replaced wholesale, so a poisoned lock still guards a
    // coherent map; recover instead of propagating the panic.
    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ReferenceKey, CacheEntry>> {
        match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<ReferenceKey, CacheEntry>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<R> TtlReferenceCache<R>
where
    R: ReferenceRepository + 'static,
{
    /// Spawn the background sweep purging expired entries on a fixed
    /// interval.
    ///
    /// The task runs until aborted; callers keep the handle alongside the
    /// server lifetime.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so a fresh server
            // does not sweep an empty map.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!(purged, remaining = cache.entry_count(), "cache sweep");
                }
            }
        })
    }
}

#[async_trait]
impl<R> ReferenceQuery for TtlReferenceCache<R>
where
    R: ReferenceRepository,
{
    async fn list_subjects(&self) -> Result<Vec<Subject>, Error> {
        if let Some(ReferencePayload::Subjects(records)) = self.lookup(ReferenceKey::Subjects) {
            return Ok(records.to_vec());
        }
        let fetched: Arc<[Subject]> = self
            .backing
            .list_subjects()
            .await
            .map_err(map_reference_error)?
            .into();
        self.store(
            ReferenceKey::Subjects,
            ReferencePayload::Subjects(Arc::clone(&fetched)),
        );
        Ok(fetched.to_vec())
    }

    async fn list_boards(&self) -> Result<Vec<Board>, Error> {
        if let Some(ReferencePayload::Boards(records)) = self.lookup(ReferenceKey::Boards) {
            return Ok(records.to_vec());
        }
        let fetched: Arc<[Board]> = self
            .backing
            .list_boards()
            .await
            .map_err(map_reference_error)?
            .into();
        self.store(
            ReferenceKey::Boards,
            ReferencePayload::Boards(Arc::clone(&fetched)),
        );
        Ok(fetched.to_vec())
    }

    async fn list_agencies(&self) -> Result<Vec<Agency>, Error> {
        if let Some(ReferencePayload::Agencies(records)) = self.lookup(ReferenceKey::Agencies) {
            return Ok(records.to_vec());
        }
        let fetched: Arc<[Agency]> = self
            .backing
            .list_agencies()
            .await
            .map_err(map_reference_error)?
            .into();
        self.store(
            ReferenceKey::Agencies,
            ReferencePayload::Agencies(Arc::clone(&fetched)),
        );
        Ok(fetched.to_vec())
    }

    async fn list_topics(&self, subject_id: Uuid) -> Result<Vec<Topic>, Error> {
        let key = ReferenceKey::Topics { subject_id };
        if let Some(ReferencePayload::Topics(records)) = self.lookup(key) {
            return Ok(records.to_vec());
        }
        let fetched: Arc<[Topic]> = self
            .backing
            .list_topics(subject_id)
            .await
            .map_err(map_reference_error)?
            .into();
        self.store(key, ReferencePayload::Topics(Arc::clone(&fetched)));
        Ok(fetched.to_vec())
    }
}

impl<R> ReferenceCacheControl for TtlReferenceCache<R>
where
    R: ReferenceRepository,
{
    fn invalidate_all(&self) {
        let mut entries = self.write_entries();
        let dropped = entries.len();
        entries.clear();
        if dropped > 0 {
            debug!(dropped, "reference cache invalidated");
        }
    }
}
