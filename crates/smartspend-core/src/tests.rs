use chrono::{Duration, TimeZone, Utc};

use crate::{
    budget_service::BudgetService, classifier::PurchaseClassifier, goal_service::GoalService,
    profile_service::ProfileService, registry::BudgetRegistry, scan_service::ScanService,
    time::FixedClock, CoreError, GoalBook,
};
use smartspend_domain::{
    ClassifierAdvice, Notification, PurchaseRequest, RemainingTime, ScanItem, ScanVerdict,
    SpendCategory,
};

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())
}

fn active_budget(registry: &mut BudgetRegistry, category: &str, limit: f64) -> u64 {
    let id = BudgetService::create(registry, category, limit, "1h").expect("create budget");
    BudgetService::toggle(registry, id, &clock()).expect("activate budget");
    id
}

#[test]
fn create_assigns_max_plus_one_ids() {
    let mut registry = BudgetRegistry::new();
    let first = BudgetService::create(&mut registry, "Dining", 300.0, "1h").unwrap();
    let second = BudgetService::create(&mut registry, "Shopping", 500.0, "2h").unwrap();
    BudgetService::delete(&mut registry, first).unwrap();
    let third = BudgetService::create(&mut registry, "Utilities", 80.0, "30m").unwrap();

    assert_eq!((first, second), (1, 2));
    assert_eq!(third, 3);
    let stored = registry.budget(third).unwrap();
    assert_eq!(stored.category, SpendCategory::Utilities);
    assert!(!stored.active);
    assert_eq!(stored.spent, 0.0);
    assert!(stored.start_time.is_none());
}

#[test]
fn create_rejects_invalid_input_without_mutation() {
    let mut registry = BudgetRegistry::new();

    for (category, limit, duration) in [
        ("Dining", 100.0, "soon"),
        ("Dining", 100.0, ""),
        ("", 100.0, "1h"),
        ("Food", 100.0, "1h"),
        ("Dining", 0.0, "1h"),
        ("Dining", f64::NAN, "1h"),
    ] {
        let err = BudgetService::create(&mut registry, category, limit, duration).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "{err}");
    }
    assert!(registry.is_empty());
}

#[test]
fn activation_opens_a_fresh_window() {
    let mut registry = BudgetRegistry::new();
    let id = BudgetService::create(&mut registry, "Dining", 300.0, "2h 30m").unwrap();
    let now = clock();

    assert!(BudgetService::toggle(&mut registry, id, &now).unwrap());
    let budget = registry.budget(id).unwrap();
    assert_eq!(budget.start_time, Some(now.0));
    assert_eq!(budget.end_time, Some(now.0 + Duration::minutes(150)));

    BudgetService::add_transaction(&mut registry, id, 40.0, &now).unwrap();
    assert!(!BudgetService::toggle(&mut registry, id, &now).unwrap());
    let snapshot = registry.budget(id).unwrap();
    assert!(snapshot.start_time.is_none() && snapshot.end_time.is_none());
    assert_eq!(snapshot.spent, 40.0);
    assert_eq!(snapshot.transactions.len(), 1);

    let later = now.advanced_by(Duration::hours(5));
    assert!(BudgetService::toggle(&mut registry, id, &later).unwrap());
    let reopened = registry.budget(id).unwrap();
    assert_eq!(reopened.spent, 0.0);
    assert!(reopened.transactions.is_empty());
    assert_eq!(reopened.start_time, Some(later.0));
}

#[test]
fn toggle_and_delete_unknown_budget_fail() {
    let mut registry = BudgetRegistry::new();
    assert!(matches!(
        BudgetService::toggle(&mut registry, 9, &clock()),
        Err(CoreError::BudgetNotFound(9))
    ));
    assert!(matches!(
        BudgetService::delete(&mut registry, 9),
        Err(CoreError::BudgetNotFound(9))
    ));
}

#[test]
fn time_remaining_floors_and_expires() {
    let mut registry = BudgetRegistry::new();
    let id = BudgetService::create(&mut registry, "Dining", 300.0, "2h 30m").unwrap();
    let start = clock();
    assert_eq!(
        BudgetService::time_remaining(registry.budget(id).unwrap(), &start),
        RemainingTime::Inactive
    );
    BudgetService::toggle(&mut registry, id, &start).unwrap();
    let budget = registry.budget(id).unwrap();

    let mid = start.advanced_by(Duration::minutes(29) + Duration::seconds(30));
    let remaining = BudgetService::time_remaining(budget, &mid);
    assert_eq!(remaining.to_string(), "2h 0m left");

    let again = BudgetService::time_remaining(budget, &mid);
    assert!(again <= remaining);

    let end = start.advanced_by(Duration::minutes(150));
    assert_eq!(
        BudgetService::time_remaining(budget, &end),
        RemainingTime::Expired
    );
    let past = start.advanced_by(Duration::days(1));
    assert_eq!(BudgetService::time_remaining(budget, &past).to_string(), "Expired");
}

#[test]
fn spend_accumulates_since_last_activation() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Groceries", 1000.0);
    for amount in [12.5, 30.0, 7.25] {
        BudgetService::add_transaction(&mut registry, id, amount, &clock()).unwrap();
    }
    let budget = registry.budget(id).unwrap();
    assert_eq!(budget.spent, 49.75);
    assert_eq!(budget.transactions.len(), 3);
    assert_eq!(budget.transactions[0].date, clock().0);
}

#[test]
fn spend_on_inactive_or_missing_budget_changes_nothing() {
    let mut registry = BudgetRegistry::new();
    let id = BudgetService::create(&mut registry, "Dining", 300.0, "1h").unwrap();

    assert!(matches!(
        BudgetService::add_transaction(&mut registry, id, 50.0, &clock()),
        Err(CoreError::BudgetInactive(_))
    ));
    assert!(matches!(
        BudgetService::add_transaction(&mut registry, 42, 50.0, &clock()),
        Err(CoreError::BudgetNotFound(42))
    ));
    let budget = registry.budget(id).unwrap();
    assert_eq!(budget.spent, 0.0);
    assert!(budget.transactions.is_empty());
    assert!(registry.notification().is_none());
}

#[test]
fn negative_amounts_are_rejected() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Dining", 300.0);
    let err = BudgetService::add_transaction(&mut registry, id, -5.0, &clock()).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(registry.budget(id).unwrap().spent, 0.0);
}

#[test]
fn zero_amount_spend_is_recorded() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Dining", 100.0);
    let notification = BudgetService::add_transaction(&mut registry, id, 0.0, &clock()).unwrap();
    assert!(notification.is_none());
    let budget = registry.budget(id).unwrap();
    assert_eq!(budget.spent, 0.0);
    assert_eq!(budget.transactions.len(), 1);
}

#[test]
fn free_item_scans_allowed_and_confirms() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Dining", 100.0);
    let sample = ScanItem::new("Free sample", 0.0, SpendCategory::Dining);

    assert!(ScanService::evaluate(&registry, &sample).unwrap().allowed());
    assert_eq!(ScanService::confirm(&mut registry, &sample, &clock()).unwrap(), None);
    assert_eq!(registry.budget(id).unwrap().transactions.len(), 1);
}

#[test]
fn breach_takes_precedence_over_warning() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Entertainment", 100.0);
    let notification = BudgetService::add_transaction(&mut registry, id, 101.0, &clock())
        .unwrap()
        .expect("breach");
    match notification {
        Notification::Breach { overage, .. } => assert!((overage - 1.0).abs() < 1e-9),
        other => panic!("expected breach, got {other:?}"),
    }
}

#[test]
fn warning_carries_rounded_percentage_and_replaces_slot() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Utilities", 300.0);

    assert!(BudgetService::add_transaction(&mut registry, id, 240.0, &clock())
        .unwrap()
        .is_none());
    let warning = BudgetService::add_transaction(&mut registry, id, 16.0, &clock())
        .unwrap()
        .expect("warning");
    assert_eq!(
        warning,
        Notification::Warning {
            budget_id: id,
            category: SpendCategory::Utilities,
            percent: 85,
        }
    );
    assert_eq!(registry.notification(), Some(&warning));

    BudgetService::add_transaction(&mut registry, id, 100.0, &clock()).unwrap();
    assert!(registry.notification().unwrap().is_breach());

    // a quiet spend elsewhere leaves the current notification in place
    let other = active_budget(&mut registry, "Education", 1000.0);
    BudgetService::add_transaction(&mut registry, other, 1.0, &clock()).unwrap();
    assert!(registry.notification().unwrap().is_breach());
    assert!(registry.dismiss_notification().is_some());
    assert!(registry.notification().is_none());
}

#[test]
fn custom_warning_ratio_is_respected() {
    let mut registry = BudgetRegistry::with_warning_ratio(0.5);
    let id = active_budget(&mut registry, "Dining", 100.0);
    let notification = BudgetService::add_transaction(&mut registry, id, 60.0, &clock()).unwrap();
    assert!(matches!(
        notification,
        Some(Notification::Warning { percent: 60, .. })
    ));
    assert_eq!(BudgetRegistry::with_warning_ratio(4.0).warning_ratio(), 0.8);
}

#[test]
fn dining_scenario_ends_in_breach() {
    let mut registry = BudgetRegistry::new();
    let id = BudgetService::create(&mut registry, "Dining", 300.0, "1h").unwrap();
    BudgetService::toggle(&mut registry, id, &clock()).unwrap();
    BudgetService::add_transaction(&mut registry, id, 250.0, &clock()).unwrap();
    let last = BudgetService::add_transaction(&mut registry, id, 60.0, &clock()).unwrap();

    let budget = registry.budget(id).unwrap();
    assert_eq!(budget.spent, 310.0);
    assert_eq!(budget.transactions.len(), 2);
    assert_eq!(
        last,
        Some(Notification::Breach {
            budget_id: id,
            category: SpendCategory::Dining,
            overage: 10.0,
        })
    );
}

#[test]
fn shopping_scan_reports_overage() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Shopping", 500.0);
    BudgetService::add_transaction(&mut registry, id, 120.0, &clock()).unwrap();

    let item = ScanItem::new("Sony Headphones", 650.0, SpendCategory::Shopping);
    let verdict = ScanService::evaluate(&registry, &item).unwrap();
    assert!(!verdict.allowed());
    match verdict {
        ScanVerdict::OverLimit { overage, .. } => assert_eq!(overage, 270.0),
        other => panic!("expected overage, got {other:?}"),
    }
    let budget = registry.budget(id).unwrap();
    assert_eq!(budget.spent, 120.0);
    assert_eq!(budget.transactions.len(), 1);
}

#[test]
fn scan_without_active_budget_is_not_allowed() {
    let mut registry = BudgetRegistry::new();
    BudgetService::create(&mut registry, "Healthcare", 200.0, "1h").unwrap();
    let before = registry.budgets().to_vec();

    let item = ScanItem::new("Vitamins", 20.0, SpendCategory::Healthcare);
    let verdict = ScanService::evaluate(&registry, &item).unwrap();
    assert_eq!(
        verdict,
        ScanVerdict::NoActiveBudget {
            category: SpendCategory::Healthcare
        }
    );
    assert!(verdict.message().contains("No active budget"));
    assert_eq!(registry.budgets(), before.as_slice());
}

#[test]
fn scan_within_limit_reports_headroom_and_confirm_commits() {
    let mut registry = BudgetRegistry::new();
    let id = active_budget(&mut registry, "Education", 400.0);
    let item = ScanItem::new("Textbook", 90.0, SpendCategory::Education);

    let verdict = ScanService::evaluate(&registry, &item).unwrap();
    assert_eq!(
        verdict,
        ScanVerdict::WithinLimit {
            budget_id: id,
            category: SpendCategory::Education,
            projected: 90.0,
            headroom: 310.0,
        }
    );

    ScanService::confirm(&mut registry, &item, &clock()).unwrap();
    assert_eq!(registry.budget(id).unwrap().spent, 90.0);

    let missing = ScanItem::new("Bus pass", 30.0, SpendCategory::Transportation);
    assert!(ScanService::confirm(&mut registry, &missing, &clock()).is_err());
}

struct FailingClassifier;

impl PurchaseClassifier for FailingClassifier {
    fn classify(&self, _request: &PurchaseRequest) -> Result<ClassifierAdvice, CoreError> {
        Err(CoreError::Classifier("endpoint unreachable".into()))
    }
}

#[test]
fn classifier_failure_is_reported_not_fatal() {
    let mut registry = BudgetRegistry::new();
    active_budget(&mut registry, "Shopping", 500.0);
    let item = ScanItem::new("Lamp", 40.0, SpendCategory::Shopping);

    let report = ScanService::scan(&registry, &item, &FailingClassifier).unwrap();
    assert!(report.allowed());
    assert!(report.advice.is_none());
    assert!(report
        .classifier_error
        .as_deref()
        .unwrap()
        .contains("endpoint unreachable"));
}

#[test]
fn classifier_advice_is_attached() {
    let mut registry = BudgetRegistry::new();
    active_budget(&mut registry, "Shopping", 1000.0);
    let item = ScanItem::new("Sony Headphones", 650.0, SpendCategory::Shopping);

    let report = ScanService::scan(&registry, &item, &crate::RuleClassifier::default()).unwrap();
    assert!(report.allowed());
    let advice = report.advice.expect("advice");
    assert!(!advice.allowed);
    assert!(report.classifier_error.is_none());
}

#[test]
fn goals_track_progress() {
    let mut book = GoalBook::new();
    let fund = GoalService::add(&mut book, "Emergency Fund", 6400.0).unwrap();
    let trip = GoalService::add(&mut book, "Europe Trip", 5000.0).unwrap();
    assert_eq!((fund, trip), (1, 2));

    assert_eq!(GoalService::update_value(&mut book, fund, 5000.0).unwrap(), 5000.0);
    GoalService::edit(&mut book, fund, "Rainy Day Fund", 4000.0).unwrap();
    let goal = book.goal(fund).unwrap();
    assert_eq!(goal.label, "Rainy Day Fund");
    assert_eq!(goal.value, 4000.0);
    assert_eq!(goal.progress_percent(), 100);

    GoalService::delete(&mut book, trip).unwrap();
    assert!(matches!(
        GoalService::delete(&mut book, trip),
        Err(CoreError::GoalNotFound(_))
    ));
    assert!(GoalService::add(&mut book, "  ", 10.0).is_err());
}

#[test]
fn profile_requires_every_field() {
    let profile =
        ProfileService::from_fields(Some("Jane"), &["5,000", "$3500", "500", "12000", "0"])
            .unwrap();
    assert_eq!(profile.monthly_income, 5000.0);
    assert_eq!(profile.monthly_expenses, 3500.0);
    assert_eq!(profile.display_name.as_deref(), Some("Jane"));

    assert!(ProfileService::from_fields(None, &["5000", "3500"]).is_err());
    assert!(ProfileService::from_fields(None, &["5000", "", "0", "0", "0"]).is_err());
    assert!(ProfileService::from_fields(None, &["5000", "-1", "0", "0", "0"]).is_err());
    assert!(ProfileService::from_fields(None, &["lots", "1", "0", "0", "0"]).is_err());
}
