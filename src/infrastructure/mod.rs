//! Infrastructure layer: real filesystem and terminal, plus the service container

pub mod di;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
