//! What-if purchase checks against the active budgets.

use smartspend_domain::{Notification, PurchaseRequest, ScanItem, ScanReport, ScanVerdict};
use tracing::{debug, warn};

use crate::{
    budget_service::BudgetService, classifier::PurchaseClassifier, registry::BudgetRegistry,
    time::Clock, CoreError,
};

pub struct ScanService;

impl ScanService {
    /// Compares the item with the active budget for its category without touching it.
    pub fn evaluate(registry: &BudgetRegistry, item: &ScanItem) -> Result<ScanVerdict, CoreError> {
        validate_price(item)?;
        let verdict = match registry.active_for(item.category) {
            None => ScanVerdict::NoActiveBudget {
                category: item.category,
            },
            Some(budget) => {
                let projected = budget.spent + item.price;
                if projected > budget.limit {
                    ScanVerdict::OverLimit {
                        budget_id: budget.id,
                        category: budget.category,
                        projected,
                        overage: projected - budget.limit,
                    }
                } else {
                    ScanVerdict::WithinLimit {
                        budget_id: budget.id,
                        category: budget.category,
                        projected,
                        headroom: budget.limit - projected,
                    }
                }
            }
        };
        debug!(item = %item.name, price = item.price, allowed = verdict.allowed(), "scan evaluated");
        Ok(verdict)
    }

    /// Evaluates the item and attaches the classifier's advice.
    ///
    /// A failing classifier does not fail the scan; its error is carried on the report.
    pub fn scan(
        registry: &BudgetRegistry,
        item: &ScanItem,
        classifier: &dyn PurchaseClassifier,
    ) -> Result<ScanReport, CoreError> {
        let verdict = Self::evaluate(registry, item)?;
        let (advice, classifier_error) = match classifier.classify(&PurchaseRequest::from(item)) {
            Ok(advice) => (Some(advice), None),
            Err(err) => {
                warn!(item = %item.name, error = %err, "purchase classifier failed");
                (None, Some(err.to_string()))
            }
        };
        Ok(ScanReport {
            item: item.clone(),
            verdict,
            advice,
            classifier_error,
        })
    }

    /// Commits the purchase as a spend on the matching active budget.
    pub fn confirm(
        registry: &mut BudgetRegistry,
        item: &ScanItem,
        clock: &dyn Clock,
    ) -> Result<Option<Notification>, CoreError> {
        validate_price(item)?;
        let budget_id = registry
            .active_for(item.category)
            .map(|budget| budget.id)
            .ok_or_else(|| {
                CoreError::InvalidOperation(format!(
                    "no active budget exists for {}",
                    item.category
                ))
            })?;
        BudgetService::add_transaction(registry, budget_id, item.price, clock)
    }
}

fn validate_price(item: &ScanItem) -> Result<(), CoreError> {
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(CoreError::Validation(format!(
            "price for `{}` must be a non-negative amount",
            item.name
        )));
    }
    Ok(())
}
