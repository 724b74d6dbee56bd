#![doc(test(attr(deny(warnings))))]

//! SmartSpend keeps time-boxed category budgets, checks planned purchases
//! against them, and drives the onboarding flow and command shell around them.

pub mod app;
pub mod cli;
pub mod errors;
pub mod remote;
pub mod system_clock;
pub mod utils;

pub use app::{LoggedSpend, SmartSpendApp};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SmartSpend tracing initialized.");
    });
}
