use smartspend::SmartSpendApp;
use smartspend_core::{FixedClock, RuleClassifier};
use smartspend_storage_json::JsonProfileStore;
use tempfile::TempDir;

pub const SETUP_ANSWERS: [&str; 5] = ["$5,000", "3200", "0", "12000", "2500"];

pub fn clock() -> FixedClock {
    FixedClock("2024-05-01T09:00:00Z".parse().expect("valid timestamp"))
}

/// App backed by a JSON store inside `dir`, with a pinned clock and local rules.
pub fn app_in(dir: &TempDir) -> SmartSpendApp {
    let store = JsonProfileStore::new(dir.path().join("data")).expect("create profile store");
    SmartSpendApp::new(
        0.8,
        Box::new(store),
        Box::new(RuleClassifier::default()),
        Box::new(clock()),
    )
}

/// Walks landing → signup → setup so the dashboard is open.
pub fn onboarded_app(dir: &TempDir) -> SmartSpendApp {
    let mut app = app_in(dir);
    app.start().expect("start");
    app.sign_up(Some("Ada")).expect("sign up");
    app.complete_setup(&SETUP_ANSWERS).expect("setup");
    app
}
