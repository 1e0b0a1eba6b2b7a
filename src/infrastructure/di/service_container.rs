//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{AllocationService, TableService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::traits::{Confirmer, FileSystem, RealFileSystem, StdinConfirmer};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Confirmation prompt for zero allocations
    pub confirmer: Arc<dyn Confirmer>,

    /// Table loading
    pub tables: TableService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(StdinConfirmer))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let settings = Arc::new(settings);
        let tables = TableService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            confirmer,
            tables,
        }
    }

    /// Table path: explicit argument first, then the configured default.
    pub fn table_path(&self, explicit: Option<&Path>) -> ApplicationResult<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.settings.table.clone())
            .ok_or(ApplicationError::NoTable)
    }

    /// Load the table and open an allocation session on it.
    pub fn allocation_session(
        &self,
        explicit: Option<&Path>,
    ) -> ApplicationResult<AllocationService> {
        let path = self.table_path(explicit)?;
        debug!("allocation_session: table={}", path.display());
        let tree = self.tables.load(&path)?;
        Ok(AllocationService::new(tree, self.settings.rounding))
    }
}
