//! Pension enrichment engine.
//!
//! This module provides the `EnrichmentEngine`, which resolves pension
//! identifiers through the external lookup service and persists the results.
//! A failed lookup never fails the enclosing operation: the record simply
//! keeps an empty pension id.

use crate::error::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use i2r_core::{Employee, NewEmployee, PensionConfig, RefreshStrategy};
use i2r_db::EmployeeStore;
use i2r_pension::{LookupError, PensionLookup, PensionResolution};
use std::sync::Arc;
use std::time::Duration;

/// Resolves and persists pension identifiers.
pub struct EnrichmentEngine {
    /// Record store for reads and writes
    store: Arc<dyn EmployeeStore>,
    /// External pension lookup service
    lookup: Arc<dyn PensionLookup>,
    /// How refresh-all schedules its lookups
    strategy: RefreshStrategy,
    /// Maximum lookups in flight during a concurrent refresh
    max_concurrent_lookups: usize,
    /// Upper bound on any single lookup
    lookup_timeout: Duration,
}

/// Outcome of refreshing one record.
struct Refreshed {
    index: usize,
    employee: Employee,
    resolved: bool,
}

impl EnrichmentEngine {
    /// Create an engine with the default `[pension]` settings.
    #[must_use]
    pub fn new(store: Arc<dyn EmployeeStore>, lookup: Arc<dyn PensionLookup>) -> Self {
        Self::from_config(store, lookup, &PensionConfig::default())
    }

    /// Create an engine from the `[pension]` configuration section.
    #[must_use]
    pub fn from_config(
        store: Arc<dyn EmployeeStore>,
        lookup: Arc<dyn PensionLookup>,
        config: &PensionConfig,
    ) -> Self {
        Self {
            store,
            lookup,
            strategy: config.refresh_strategy,
            max_concurrent_lookups: config.max_concurrent_lookups.max(1),
            lookup_timeout: config.timeout(),
        }
    }

    /// Set the refresh scheduling strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: RefreshStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the maximum number of lookups in flight during a concurrent refresh.
    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, max: usize) -> Self {
        self.max_concurrent_lookups = max.max(1);
        self
    }

    /// Set the upper bound on a single lookup.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Resolve the pension identifier for `name`, or `""` if unavailable.
    pub async fn lookup_pension(&self, name: &str) -> String {
        self.resolve_pension(name).await.into_pension_id()
    }

    /// Resolve the pension identifier for `name`, keeping the failure reason.
    ///
    /// Makes a single attempt bounded by the lookup timeout. Failures are
    /// logged and returned as `PensionResolution::Unresolved`.
    pub async fn resolve_pension(&self, name: &str) -> PensionResolution {
        tracing::debug!("Looking up pension id for '{}'", name);

        let resolution = match tokio::time::timeout(self.lookup_timeout, self.lookup.fetch(name)).await
        {
            Ok(result) => PensionResolution::from(result),
            Err(_) => PensionResolution::Unresolved(LookupError::Timeout),
        };

        if let PensionResolution::Unresolved(reason) = &resolution {
            tracing::warn!("Pension lookup for '{}' unavailable: {}", name, reason);
        }

        resolution
    }

    /// Create an employee, resolving their pension id first.
    ///
    /// Succeeds even when the lookup fails; the stored record then carries an
    /// empty pension id.
    pub async fn create_employee(&self, employee: NewEmployee) -> Result<Employee> {
        let pension_id = self.lookup_pension(&employee.name).await;
        let stored = self.store.save(employee, pension_id).await?;

        tracing::info!(
            "Created employee {} (pension id {})",
            stored.id,
            if stored.has_pension_id() { "resolved" } else { "unresolved" }
        );
        Ok(stored)
    }

    /// Refresh every employee's pension id and persist the results.
    ///
    /// Each record is looked up independently from its own copy; one failed
    /// lookup leaves only that record's pension id empty. All records are
    /// written back in one batch once every lookup has finished. The result
    /// is in store order.
    pub async fn refresh_all_pensions(&self) -> Result<Vec<Employee>> {
        let employees = self.store.find_all().await?;
        let total = employees.len();

        let refreshed = match self.strategy {
            RefreshStrategy::Sequential => self.refresh_sequentially(employees).await,
            RefreshStrategy::Concurrent => self.refresh_concurrently(employees).await,
        };

        let resolved = refreshed.iter().filter(|r| r.resolved).count();
        tracing::info!(
            "Pension refresh ({:?}): {} employees, {} resolved, {} unresolved",
            self.strategy,
            total,
            resolved,
            total - resolved
        );

        let updated = refreshed.into_iter().map(|r| r.employee).collect();
        Ok(self.store.save_all(updated).await?)
    }

    async fn refresh_sequentially(&self, employees: Vec<Employee>) -> Vec<Refreshed> {
        let mut refreshed = Vec::with_capacity(employees.len());
        for (index, employee) in employees.into_iter().enumerate() {
            refreshed.push(self.refresh_one(index, employee).await);
        }
        refreshed
    }

    async fn refresh_concurrently(&self, employees: Vec<Employee>) -> Vec<Refreshed> {
        let mut slots: Vec<Option<Refreshed>> = employees.iter().map(|_| None).collect();
        let mut in_flight = FuturesUnordered::new();

        for (index, employee) in employees.into_iter().enumerate() {
            in_flight.push(self.refresh_one(index, employee));

            // Respect concurrency limit
            while in_flight.len() >= self.max_concurrent_lookups {
                if let Some(done) = in_flight.next().await {
                    let index = done.index;
                    slots[index] = Some(done);
                }
            }
        }

        while let Some(done) = in_flight.next().await {
            let index = done.index;
            slots[index] = Some(done);
        }

        slots.into_iter().flatten().collect()
    }

    async fn refresh_one(&self, index: usize, employee: Employee) -> Refreshed {
        let resolution = self.resolve_pension(&employee.name).await;
        let resolved = resolution.is_resolved();
        Refreshed {
            index,
            employee: employee.with_pension_id(resolution.into_pension_id()),
            resolved,
        }
    }
}
