//! Application state management.

use i2r_core::{AppConfig, I2rError, PensionConfig};
use i2r_db::{Database, EmployeeStore};
use i2r_enrichment::{EmployeeDirectory, EnrichmentEngine, ProblemScanner};
use i2r_pension::{HttpPensionLookup, PensionLookup};
use std::sync::Arc;

/// State shared across all HTTP handlers.
///
/// Every component reads the same record store; none of them hold mutable
/// state of their own, so the whole struct is shared behind one `Arc`.
pub struct AppState {
    /// Pension lookup, creation and refresh
    pub engine: EnrichmentEngine,
    /// Problem record scan
    pub scanner: ProblemScanner,
    /// List and get-by-id accessors
    pub directory: EmployeeDirectory,
}

impl AppState {
    /// Wire the components over an existing store and lookup client.
    pub fn new(
        store: Arc<dyn EmployeeStore>,
        lookup: Arc<dyn PensionLookup>,
        pension: &PensionConfig,
    ) -> Self {
        Self {
            engine: EnrichmentEngine::from_config(store.clone(), lookup, pension),
            scanner: ProblemScanner::new(store.clone()),
            directory: EmployeeDirectory::new(store),
        }
    }

    /// Open the database, apply migrations, check it answers, and build the
    /// HTTP lookup client.
    ///
    /// Returns the state together with the database handle so the caller can
    /// close it on shutdown.
    pub async fn from_config(config: &AppConfig) -> Result<(Self, Database), I2rError> {
        let db_path = config.database_path()?;
        let db = Database::with_max_connections(&db_path, config.database.max_connections)
            .await
            .map_err(|e| I2rError::Database(e.to_string()))?;
        db.run_migrations()
            .await
            .map_err(|e| I2rError::Database(e.to_string()))?;
        db.ping()
            .await
            .map_err(|e| I2rError::Database(e.to_string()))?;

        let lookup = HttpPensionLookup::from_config(&config.pension)
            .map_err(|e| I2rError::Lookup(e.to_string()))?;
        tracing::info!("Pension lookup service: {}", lookup.base_url());

        let state = Self::new(Arc::new(db.clone()), Arc::new(lookup), &config.pension);
        Ok((state, db))
    }
}
