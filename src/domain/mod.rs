//! Domain layer: allocation tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod aggregate;
pub mod arena;
pub mod builder;
pub mod distribute;
pub mod entities;
pub mod error;
pub mod report;
pub mod rounding;
pub mod tree_traits;
pub mod variance;

pub use aggregate::{aggregate, subtotal_violations, SubtotalViolation};
pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::TreeBuilder;
pub use distribute::{distribute, set_by_absolute_value, set_by_percentage};
pub use entities::*;
pub use error::{DomainError, InputError};
pub use report::{grand_total, table_rows};
pub use rounding::{RoundingMode, RoundingPolicy};
pub use tree_traits::TreeNodeConvert;
pub use variance::{variance, variance_of, Baseline};
