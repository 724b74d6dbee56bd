//! smartspend-core
//!
//! Budget rules and services for SmartSpend.
//! Depends on smartspend-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod budget_service;
pub mod classifier;
pub mod duration;
pub mod error;
pub mod extract;
pub mod goal_service;
pub mod profile_service;
pub mod registry;
pub mod scan_service;
pub mod session;
pub mod storage;
pub mod time;

pub use budget_service::*;
pub use classifier::*;
pub use duration::*;
pub use error::CoreError;
pub use extract::*;
pub use goal_service::*;
pub use profile_service::*;
pub use registry::*;
pub use scan_service::*;
pub use session::*;
pub use storage::ProfileStore;
pub use time::*;

#[cfg(test)]
mod tests;
