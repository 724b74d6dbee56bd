//! What-if purchase scans and the advisory payloads that accompany them.

use serde::{Deserialize, Serialize};

use crate::{category::SpendCategory, common::EntityId};

/// A hypothetical purchase checked against the active budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanItem {
    pub name: String,
    pub price: f64,
    pub category: SpendCategory,
}

impl ScanItem {
    pub fn new(name: impl Into<String>, price: f64, category: SpendCategory) -> Self {
        Self {
            name: name.into(),
            price,
            category,
        }
    }
}

/// Outcome of comparing a scanned item with the matching active budget.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanVerdict {
    NoActiveBudget {
        category: SpendCategory,
    },
    OverLimit {
        budget_id: EntityId,
        category: SpendCategory,
        projected: f64,
        overage: f64,
    },
    WithinLimit {
        budget_id: EntityId,
        category: SpendCategory,
        projected: f64,
        headroom: f64,
    },
}

impl ScanVerdict {
    pub fn allowed(&self) -> bool {
        matches!(self, ScanVerdict::WithinLimit { .. })
    }

    pub fn budget_id(&self) -> Option<EntityId> {
        match self {
            ScanVerdict::NoActiveBudget { .. } => None,
            ScanVerdict::OverLimit { budget_id, .. }
            | ScanVerdict::WithinLimit { budget_id, .. } => Some(*budget_id),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ScanVerdict::NoActiveBudget { category } => {
                format!("No active budget exists for {category}.")
            }
            ScanVerdict::OverLimit {
                category, overage, ..
            } => format!("This purchase would exceed your {category} budget by ${overage:.2}."),
            ScanVerdict::WithinLimit {
                category, headroom, ..
            } => format!(
                "Safe to buy. ${headroom:.2} will remain in your {category} budget."
            ),
        }
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ScanVerdict::NoActiveBudget { .. } => {
                Some("Create and activate a budget for this category before buying.")
            }
            ScanVerdict::OverLimit { .. } => {
                Some("Consider reducing the amount or adjusting your budget.")
            }
            ScanVerdict::WithinLimit { .. } => None,
        }
    }
}

/// Request body sent to a purchase classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRequest {
    pub amount: f64,
    pub category: SpendCategory,
}

impl From<&ScanItem> for PurchaseRequest {
    fn from(item: &ScanItem) -> Self {
        Self {
            amount: item.price,
            category: item.category,
        }
    }
}

/// Advisory fields returned by a purchase classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierAdvice {
    pub allowed: bool,
    #[serde(default)]
    pub alert: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

impl ClassifierAdvice {
    pub fn approve() -> Self {
        Self {
            allowed: true,
            alert: None,
            suggestion: None,
        }
    }
}

/// Full result of a scan: the budget verdict plus whatever the classifier said.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub item: ScanItem,
    pub verdict: ScanVerdict,
    pub advice: Option<ClassifierAdvice>,
    pub classifier_error: Option<String>,
}

impl ScanReport {
    pub fn allowed(&self) -> bool {
        self.verdict.allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advice_deserializes_with_missing_optionals() {
        let advice: ClassifierAdvice = serde_json::from_str(r#"{"allowed": true}"#).unwrap();
        assert_eq!(advice, ClassifierAdvice::approve());
    }

    #[test]
    fn only_within_limit_is_allowed() {
        let verdict = ScanVerdict::NoActiveBudget {
            category: SpendCategory::Dining,
        };
        assert!(!verdict.allowed());
        assert!(verdict.message().contains("No active budget"));
        assert!(verdict.budget_id().is_none());
    }
}
