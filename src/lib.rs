//! Hierarchical allocation table.
//!
//! Internal rows always carry the sum of their children. Values are pushed
//! onto any row by percentage or by absolute amount and spread over its
//! children; every snapshot is reconciled bottom-up and compared against the
//! baseline captured at load.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
