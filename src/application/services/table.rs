//! Table loading service
//!
//! Reads the initial allocation table from a TOML document and builds the tree.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{TableSpec, TreeArena, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service for loading allocation tables.
pub struct TableService {
    fs: Arc<dyn FileSystem>,
}

impl TableService {
    /// Create a new table service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and build the table at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<TreeArena> {
        if !self.fs.exists(path) || !self.fs.is_file(path) {
            return Err(ApplicationError::TableNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read table", path)?;
        let spec = Self::parse(&content).map_err(|e| ApplicationError::OperationFailed {
            context: format!("parse table {}", path.display()),
            source: Box::new(e),
        })?;
        debug!("load: {} root rows in {}", spec.rows.len(), path.display());

        Ok(TreeBuilder::new().build(&spec)?)
    }

    /// Parse a table document.
    pub fn parse(content: &str) -> Result<TableSpec, toml::de::Error> {
        toml::from_str(content)
    }
}
