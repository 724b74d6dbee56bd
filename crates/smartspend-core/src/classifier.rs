//! Purchase classifiers consulted for advisory scan fields.

use std::collections::BTreeMap;

use smartspend_domain::{ClassifierAdvice, PurchaseRequest, SpendCategory};

use crate::CoreError;

/// Capability that judges a purchase independently of the budget registry.
pub trait PurchaseClassifier {
    fn classify(&self, request: &PurchaseRequest) -> Result<ClassifierAdvice, CoreError>;
}

/// Ceiling applied to categories without an explicit rule.
pub const DEFAULT_PURCHASE_CEILING: f64 = 1000.0;

/// Local classifier that flags single purchases above a per-category ceiling.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    ceilings: BTreeMap<SpendCategory, f64>,
    default_ceiling: f64,
}

impl Default for RuleClassifier {
    fn default() -> Self {
        let ceilings = BTreeMap::from([
            (SpendCategory::Dining, 500.0),
            (SpendCategory::Shopping, 300.0),
            (SpendCategory::Transportation, 200.0),
        ]);
        Self {
            ceilings,
            default_ceiling: DEFAULT_PURCHASE_CEILING,
        }
    }
}

impl RuleClassifier {
    pub fn new(ceilings: BTreeMap<SpendCategory, f64>, default_ceiling: f64) -> Self {
        Self {
            ceilings,
            default_ceiling,
        }
    }

    pub fn ceiling_for(&self, category: SpendCategory) -> f64 {
        self.ceilings
            .get(&category)
            .copied()
            .unwrap_or(self.default_ceiling)
    }
}

impl PurchaseClassifier for RuleClassifier {
    fn classify(&self, request: &PurchaseRequest) -> Result<ClassifierAdvice, CoreError> {
        let ceiling = self.ceiling_for(request.category);
        if request.amount > ceiling {
            return Ok(ClassifierAdvice {
                allowed: false,
                alert: Some(format!(
                    "Alert: This purchase exceeds your {} limit of ${:.0}.",
                    request.category, ceiling
                )),
                suggestion: Some(
                    "Consider deferring this purchase or finding a cheaper alternative.".into(),
                ),
            });
        }
        Ok(ClassifierAdvice::approve())
    }
}
