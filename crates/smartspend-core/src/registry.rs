//! Session-local collection of budgets and the single notification slot.

use smartspend_domain::{Budget, EntityId, Notification, SpendCategory};

/// Ratio of the limit above which a spend raises a warning.
pub const DEFAULT_WARNING_RATIO: f64 = 0.8;

/// In-memory budget store for one interactive session.
#[derive(Debug, Clone)]
pub struct BudgetRegistry {
    pub(crate) budgets: Vec<Budget>,
    pub(crate) notification: Option<Notification>,
    warning_ratio: f64,
}

impl Default for BudgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetRegistry {
    pub fn new() -> Self {
        Self::with_warning_ratio(DEFAULT_WARNING_RATIO)
    }

    /// Ratios outside `(0, 1]` fall back to the default.
    pub fn with_warning_ratio(ratio: f64) -> Self {
        let warning_ratio = if ratio.is_finite() && ratio > 0.0 && ratio <= 1.0 {
            ratio
        } else {
            DEFAULT_WARNING_RATIO
        };
        Self {
            budgets: Vec::new(),
            notification: None,
            warning_ratio,
        }
    }

    pub fn warning_ratio(&self) -> f64 {
        self.warning_ratio
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn budget(&self, id: EntityId) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub(crate) fn budget_mut(&mut self, id: EntityId) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }

    pub fn active_budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.iter().filter(|budget| budget.active)
    }

    /// First active budget tracking `category`, in creation order.
    pub fn active_for(&self, category: SpendCategory) -> Option<&Budget> {
        self.active_budgets()
            .find(|budget| budget.category == category)
    }

    /// Currently displayed notification, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub(crate) fn show(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }
}
