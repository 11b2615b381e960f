//! Dashboard service: assembles a snapshot with per-section failure isolation.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::{FutureExt, join};
use tracing::{debug, error, warn};

use super::error::DashboardError;
use super::feed::{FeedOptions, recent_activity};
use super::stats::collect_stats;
use super::status::{driver_status, vehicle_status};
use super::types::{ActivityEntry, DashboardSnapshot, DashboardStats, Section, StatusBreakdown};
use crate::store::DocumentStore;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Computes dashboard sections from a document store.
///
/// Every method always succeeds. A failing section is logged and replaced
/// with its zero value, marked as failed.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    options: FeedOptions,
}

impl DashboardService {
    /// Creates a service on the wall clock with default feed options.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            options: FeedOptions::default(),
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the feed options.
    #[must_use]
    pub const fn with_options(mut self, options: FeedOptions) -> Self {
        self.options = options;
        self
    }

    /// Entity counts.
    pub async fn stats(&self) -> Section<DashboardStats> {
        guard("stats", collect_stats(self.store.as_ref())).await
    }

    /// Driver status chart.
    pub async fn driver_status(&self) -> Section<Vec<StatusBreakdown>> {
        guard("driver_status", driver_status(self.store.as_ref())).await
    }

    /// Vehicle status chart.
    pub async fn vehicle_status(&self) -> Section<Vec<StatusBreakdown>> {
        guard("vehicle_status", vehicle_status(self.store.as_ref())).await
    }

    /// Recent activity feed.
    pub async fn activity(&self) -> Section<Vec<ActivityEntry>> {
        self.activity_at(self.clock.now()).await
    }

    async fn activity_at(&self, now: DateTime<Utc>) -> Section<Vec<ActivityEntry>> {
        guard(
            "activities",
            recent_activity(self.store.as_ref(), now, self.options),
        )
        .await
    }

    /// Computes the whole dashboard.
    ///
    /// The four sections run concurrently and fail independently, panics
    /// included. A panic escaping the sections yields a snapshot where every
    /// section failed.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let now = self.clock.now();

        match AssertUnwindSafe(self.assemble(now)).catch_unwind().await {
            Ok(snapshot) => snapshot,
            Err(payload) => {
                let err = DashboardError::Aborted(panic_message(payload.as_ref()));
                error!(error = %err, "Dashboard snapshot aborted");
                DashboardSnapshot::fallback(&err.to_string(), now)
            }
        }
    }

    async fn assemble(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        let (stats, driver_status, vehicle_status, activities) = join!(
            self.stats(),
            self.driver_status(),
            self.vehicle_status(),
            self.activity_at(now),
        );

        debug!(
            activities = activities.data().len(),
            failed_sections = [
                stats.is_failed(),
                driver_status.is_failed(),
                vehicle_status.is_failed(),
                activities.is_failed()
            ]
            .iter()
            .filter(|failed| **failed)
            .count(),
            "Dashboard snapshot assembled"
        );

        DashboardSnapshot {
            stats,
            driver_status,
            vehicle_status,
            activities,
            generated_at: now,
        }
    }
}

/// Runs one section, turning an error or a panic into its fallback.
async fn guard<T, F>(section: &'static str, computation: F) -> Section<T>
where
    T: Default,
    F: Future<Output = Result<T, DashboardError>>,
{
    let result = AssertUnwindSafe(computation)
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(DashboardError::Aborted(panic_message(payload.as_ref()))));

    match result {
        Ok(data) => Section::Loaded { data },
        Err(e @ DashboardError::Aborted(_)) => {
            error!(section, error = %e, "Dashboard section panicked, using fallback");
            Section::fallback(e.to_string())
        }
        Err(e) => {
            warn!(section, error = %e, "Dashboard section failed, using fallback");
            Section::fallback(e.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
