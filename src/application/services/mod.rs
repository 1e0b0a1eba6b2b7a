//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Confirmer)
//! but are themselves concrete structs, not traits.

mod allocation;
mod table;

pub use allocation::AllocationService;
pub use table::TableService;
