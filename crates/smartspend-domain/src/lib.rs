//! smartspend-domain
//!
//! Pure domain models (Budget, Goal, FinancialProfile, scan and notification types).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod common;
pub mod goal;
pub mod notification;
pub mod profile;
pub mod scan;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use goal::*;
pub use notification::*;
pub use profile::*;
pub use scan::*;
