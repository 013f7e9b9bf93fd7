//! Freshness-gated cache lookup.
//!
//! For every dependent resource kind the flow is the same two-state machine:
//! CheckCache (serve persisted rows if fresh, evict if stale) then Resolve
//! (fetch upstream, map, persist, serve). The per-kind pieces plug in through
//! [`CachedResource`]; the machine itself lives in [`FreshnessGate`].
//!
//! Locations never pass through here — once geocoded, a query's coordinates
//! are treated as permanently valid (see `services::location`).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::clients::UpstreamError;
use crate::models::location::Location;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("persistence failure: {0}")]
    Persistence(#[source] anyhow::Error),
}

/// Tagged outcome of a lookup: Hit served persisted rows without touching the
/// provider, Miss carries freshly fetched-and-persisted rows.
#[derive(Debug, PartialEq)]
pub enum Lookup<T> {
    Hit(Vec<T>),
    Miss(Vec<T>),
}

impl<T> Lookup<T> {
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Hit(records) | Self::Miss(records) => records,
        }
    }

    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// One dependent resource kind: how to read/evict its persisted rows, fetch
/// and map fresh ones, and where each row's fetch timestamp lives.
#[async_trait]
pub trait CachedResource: Send + Sync {
    type Record: Send;

    fn kind(&self) -> &'static str;

    async fn load(&self, location_id: i32) -> anyhow::Result<Vec<Self::Record>>;

    async fn evict(&self, location_id: i32) -> anyhow::Result<()>;

    /// Fetch from the provider and map into records, preserving provider
    /// order. All-or-nothing: the first failure aborts the whole batch.
    async fn fetch(&self, location: &Location) -> Result<Vec<Self::Record>, UpstreamError>;

    async fn persist(&self, location_id: i32, records: &[Self::Record]) -> anyhow::Result<()>;

    fn fetched_at(record: &Self::Record) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy)]
pub struct FreshnessGate {
    window: Duration,
}

impl FreshnessGate {
    #[must_use]
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            window: Duration::minutes(minutes),
        }
    }

    /// Runs CheckCache/Resolve for one (kind, location) pair.
    ///
    /// Persistence READ failures never fail the request: they are logged and
    /// treated as a miss, so the caller still gets fresh data. Upstream and
    /// persistence WRITE failures surface as errors.
    pub async fn resolve<S: CachedResource>(
        &self,
        source: &S,
        location: &Location,
    ) -> Result<Lookup<S::Record>, ResolveError> {
        let cached = match source.load(location.id).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    kind = source.kind(),
                    location_id = location.id,
                    error = %e,
                    "cache read failed; treating as miss"
                );
                Vec::new()
            }
        };

        if !cached.is_empty() {
            let newest = cached
                .iter()
                .map(S::fetched_at)
                .max()
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            let age = Utc::now() - newest;

            if age < self.window {
                debug!(
                    kind = source.kind(),
                    location_id = location.id,
                    rows = cached.len(),
                    "cache hit"
                );
                return Ok(Lookup::Hit(cached));
            }

            debug!(
                kind = source.kind(),
                location_id = location.id,
                age_minutes = age.num_minutes(),
                "cache stale; evicting"
            );
            if let Err(e) = source.evict(location.id).await {
                warn!(
                    kind = source.kind(),
                    location_id = location.id,
                    error = %e,
                    "eviction failed; refetching anyway"
                );
            }
        }

        let fresh = source.fetch(location).await?;
        source
            .persist(location.id, &fresh)
            .await
            .map_err(ResolveError::Persistence)?;

        debug!(
            kind = source.kind(),
            location_id = location.id,
            rows = fresh.len(),
            "cache miss resolved"
        );
        Ok(Lookup::Miss(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        label: String,
        fetched_at: DateTime<Utc>,
    }

    fn row(label: &str, age_seconds: i64) -> Row {
        Row {
            label: label.to_string(),
            fetched_at: Utc::now() - Duration::seconds(age_seconds),
        }
    }

    /// In-memory stand-in for a store + provider pair.
    struct FakeSource {
        stored: Mutex<Vec<Row>>,
        upstream: Vec<Row>,
        fetches: AtomicUsize,
        fail_load: bool,
    }

    impl FakeSource {
        fn new(stored: Vec<Row>, upstream: Vec<Row>) -> Self {
            Self {
                stored: Mutex::new(stored),
                upstream,
                fetches: AtomicUsize::new(0),
                fail_load: false,
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn stored_rows(&self) -> Vec<Row> {
            self.stored.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CachedResource for FakeSource {
        type Record = Row;

        fn kind(&self) -> &'static str {
            "fake"
        }

        async fn load(&self, _location_id: i32) -> anyhow::Result<Vec<Row>> {
            if self.fail_load {
                anyhow::bail!("table is on fire");
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn evict(&self, _location_id: i32) -> anyhow::Result<()> {
            self.stored.lock().unwrap().clear();
            Ok(())
        }

        async fn fetch(&self, _location: &Location) -> Result<Vec<Row>, UpstreamError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.upstream.is_empty() {
                return Err(UpstreamError::NoResults { service: "fake" });
            }
            Ok(self.upstream.clone())
        }

        async fn persist(&self, _location_id: i32, records: &[Row]) -> anyhow::Result<()> {
            self.stored.lock().unwrap().extend_from_slice(records);
            Ok(())
        }

        fn fetched_at(record: &Row) -> DateTime<Utc> {
            record.fetched_at
        }
    }

    fn test_location() -> Location {
        Location {
            id: 1,
            search_query: "seattle".to_string(),
            formatted_query: "Seattle, WA, USA".to_string(),
            latitude: 47.6,
            longitude: -122.3,
        }
    }

    #[tokio::test]
    async fn fresh_rows_are_a_hit_with_no_fetch() {
        // 29m59s old: just inside the 30 minute window
        let source = FakeSource::new(vec![row("cached", 29 * 60 + 59)], vec![row("fresh", 0)]);
        let gate = FreshnessGate::from_minutes(30);

        let lookup = gate.resolve(&source, &test_location()).await.unwrap();

        assert!(lookup.is_hit());
        assert_eq!(lookup.into_records()[0].label, "cached");
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn stale_rows_are_evicted_then_refetched() {
        // 30m01s old: past the window
        let source = FakeSource::new(vec![row("stale", 30 * 60 + 1)], vec![row("fresh", 0)]);
        let gate = FreshnessGate::from_minutes(30);

        let lookup = gate.resolve(&source, &test_location()).await.unwrap();

        assert!(!lookup.is_hit());
        assert_eq!(source.fetch_count(), 1);
        // stale rows gone, only the refetched one remains
        let stored = source.stored_rows();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].label, "fresh");
    }

    #[tokio::test]
    async fn freshest_row_decides_for_the_whole_set() {
        let source = FakeSource::new(
            vec![row("old", 45 * 60), row("recent", 60)],
            vec![row("fresh", 0)],
        );
        let gate = FreshnessGate::from_minutes(30);

        let lookup = gate.resolve(&source, &test_location()).await.unwrap();

        assert!(lookup.is_hit());
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn empty_cache_misses_and_persists_before_returning() {
        let upstream = vec![row("a", 0), row("b", 0), row("c", 0)];
        let source = FakeSource::new(Vec::new(), upstream.clone());
        let gate = FreshnessGate::from_minutes(30);

        let lookup = gate.resolve(&source, &test_location()).await.unwrap();

        assert_eq!(source.stored_rows(), upstream);
        let labels: Vec<_> = lookup
            .into_records()
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn load_failure_fails_open_into_a_miss() {
        let mut source = FakeSource::new(vec![row("unreadable", 60)], vec![row("fresh", 0)]);
        source.fail_load = true;
        let gate = FreshnessGate::from_minutes(30);

        let lookup = gate.resolve(&source, &test_location()).await.unwrap();

        assert!(!lookup.is_hit());
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn upstream_no_results_surfaces_typed() {
        let source = FakeSource::new(Vec::new(), Vec::new());
        let gate = FreshnessGate::from_minutes(30);

        let err = gate.resolve(&source, &test_location()).await.unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Upstream(UpstreamError::NoResults { .. })
        ));
    }
}
