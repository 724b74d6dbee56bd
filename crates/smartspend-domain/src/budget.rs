//! Budget definitions tracked by the SmartSpend registry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{category::SpendCategory, common::*};

/// A spend ceiling for one category over a timed window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: EntityId,
    pub category: SpendCategory,
    pub limit: f64,
    pub spent: f64,
    /// Duration label exactly as entered, re-parsed on every activation.
    pub period: String,
    pub active: bool,
    #[serde(default)]
    pub transactions: Vec<SpendRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Budget {
    /// Builds an inactive budget with an empty spend window.
    pub fn new(id: EntityId, category: SpendCategory, limit: f64, period: impl Into<String>) -> Self {
        Self {
            id,
            category,
            limit,
            spent: 0.0,
            period: period.into(),
            active: false,
            transactions: Vec::new(),
            start_time: None,
            end_time: None,
        }
    }

    pub fn usage_percent(&self) -> u32 {
        percent_of(self.spent, self.limit)
    }

    pub fn status(&self, warning_ratio: f64) -> BudgetStatus {
        if self.spent > self.limit {
            BudgetStatus::OverBudget
        } else if self.spent > warning_ratio * self.limit {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// One applied spend inside a budget window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendRecord {
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl SpendRecord {
    pub fn new(amount: f64, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "on track",
            BudgetStatus::NearLimit => "near limit",
            BudgetStatus::OverBudget => "over budget",
        };
        f.write_str(label)
    }
}

/// Time left in a budget window, derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RemainingTime {
    Inactive,
    Expired,
    Left { hours: i64, minutes: i64 },
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemainingTime::Inactive => f.write_str("Inactive"),
            RemainingTime::Expired => f.write_str("Expired"),
            RemainingTime::Left { hours, minutes } => write!(f, "{hours}h {minutes}m left"),
        }
    }
}
