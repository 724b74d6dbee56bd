use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{category::SpendCategory, common::EntityId};

/// Threshold alert raised after a spend lands on an active budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// Spend exceeded the limit; carries the amount over.
    Breach {
        budget_id: EntityId,
        category: SpendCategory,
        overage: f64,
    },
    /// Spend crossed the warning ratio; carries the rounded usage percentage.
    Warning {
        budget_id: EntityId,
        category: SpendCategory,
        percent: u32,
    },
}

impl Notification {
    pub fn budget_id(&self) -> EntityId {
        match self {
            Notification::Breach { budget_id, .. } | Notification::Warning { budget_id, .. } => {
                *budget_id
            }
        }
    }

    pub fn is_breach(&self) -> bool {
        matches!(self, Notification::Breach { .. })
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Breach {
                category, overage, ..
            } => write!(f, "{category} budget exceeded by ${overage:.2}"),
            Notification::Warning {
                category, percent, ..
            } => write!(f, "{category} budget is at {percent}% of its limit"),
        }
    }
}
