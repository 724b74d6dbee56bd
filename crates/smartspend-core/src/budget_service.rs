//! Budget creation, activation windows, and spend accumulation.

use chrono::Duration;
use smartspend_domain::{
    next_id, percent_of, Budget, EntityId, Notification, RemainingTime, SpendCategory,
    SpendRecord,
};
use tracing::{debug, info};

use crate::{
    duration::parse_duration_minutes, registry::BudgetRegistry, time::Clock, CoreError,
};

/// Stateless budgeting operations over a [`BudgetRegistry`].
pub struct BudgetService;

impl BudgetService {
    /// Adds an inactive budget and returns its id.
    ///
    /// Nothing is stored unless the category is recognised, the limit is a positive amount,
    /// and the duration label yields a non-zero number of minutes.
    pub fn create(
        registry: &mut BudgetRegistry,
        category: &str,
        limit: f64,
        duration: &str,
    ) -> Result<EntityId, CoreError> {
        if category.trim().is_empty() {
            return Err(CoreError::Validation("category is required".into()));
        }
        if duration.trim().is_empty() {
            return Err(CoreError::Validation("duration is required".into()));
        }
        let category: SpendCategory = category.parse()?;
        if !limit.is_finite() || limit <= 0.0 {
            return Err(CoreError::Validation(
                "limit must be a positive amount".into(),
            ));
        }
        if parse_duration_minutes(duration) == 0 {
            return Err(CoreError::Validation(format!(
                "could not read a duration from `{}` (use e.g. `2h 30m`)",
                duration.trim()
            )));
        }

        let id = next_id(registry.budgets.iter());
        registry
            .budgets
            .push(Budget::new(id, category, limit, duration.trim()));
        info!(budget_id = id, %category, limit, "budget created");
        Ok(id)
    }

    /// Flips a budget between active and inactive and returns the new state.
    ///
    /// Activation opens a fresh window starting at `clock.now()`; deactivation clears the
    /// window bounds but keeps spend and transactions as they were.
    pub fn toggle(
        registry: &mut BudgetRegistry,
        id: EntityId,
        clock: &dyn Clock,
    ) -> Result<bool, CoreError> {
        let budget = registry
            .budget_mut(id)
            .ok_or(CoreError::BudgetNotFound(id))?;

        if budget.active {
            budget.active = false;
            budget.start_time = None;
            budget.end_time = None;
            info!(budget_id = id, spent = budget.spent, "budget deactivated");
            return Ok(false);
        }

        let minutes = parse_duration_minutes(&budget.period);
        if minutes == 0 {
            return Err(CoreError::Validation(format!(
                "budget {} has no usable duration `{}`",
                id, budget.period
            )));
        }
        let start = clock.now();
        let end = i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|window| start.checked_add_signed(window))
            .ok_or_else(|| {
                CoreError::InvalidOperation(format!(
                    "budget window `{}` is too long to schedule",
                    budget.period
                ))
            })?;

        budget.active = true;
        budget.start_time = Some(start);
        budget.end_time = Some(end);
        budget.spent = 0.0;
        budget.transactions.clear();
        info!(budget_id = id, %start, %end, "budget activated");
        Ok(true)
    }

    /// Removes a budget regardless of its state.
    pub fn delete(registry: &mut BudgetRegistry, id: EntityId) -> Result<Budget, CoreError> {
        let index = registry
            .budgets
            .iter()
            .position(|budget| budget.id == id)
            .ok_or(CoreError::BudgetNotFound(id))?;
        let removed = registry.budgets.remove(index);
        info!(budget_id = id, "budget deleted");
        Ok(removed)
    }

    /// Time left in the budget's window, floored to whole minutes.
    pub fn time_remaining(budget: &Budget, clock: &dyn Clock) -> RemainingTime {
        let end = match (budget.active, budget.end_time) {
            (true, Some(end)) => end,
            _ => return RemainingTime::Inactive,
        };
        let remaining = end - clock.now();
        if remaining <= Duration::zero() {
            return RemainingTime::Expired;
        }
        let total = remaining.num_minutes();
        RemainingTime::Left {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    /// Applies a spend to an active budget and returns the notification it raised, if any.
    ///
    /// The raised notification replaces whatever the registry was showing.
    pub fn add_transaction(
        registry: &mut BudgetRegistry,
        id: EntityId,
        amount: f64,
        clock: &dyn Clock,
    ) -> Result<Option<Notification>, CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(
                "amount must be a non-negative number".into(),
            ));
        }
        let ratio = registry.warning_ratio();
        let budget = registry
            .budget_mut(id)
            .ok_or(CoreError::BudgetNotFound(id))?;
        if !budget.active {
            return Err(CoreError::BudgetInactive(id));
        }

        budget.spent += amount;
        budget.transactions.push(SpendRecord::new(amount, clock.now()));
        info!(budget_id = id, amount, spent = budget.spent, "spend recorded");

        let notification = Self::check_thresholds(budget, ratio);
        if let Some(notification) = &notification {
            debug!(budget_id = id, %notification, "threshold crossed");
            registry.show(notification.clone());
        }
        Ok(notification)
    }

    /// Breach wins over warning; at most one notification is produced.
    pub fn check_thresholds(budget: &Budget, warning_ratio: f64) -> Option<Notification> {
        if budget.spent > budget.limit {
            Some(Notification::Breach {
                budget_id: budget.id,
                category: budget.category,
                overage: budget.spent - budget.limit,
            })
        } else if budget.spent > warning_ratio * budget.limit {
            Some(Notification::Warning {
                budget_id: budget.id,
                category: budget.category,
                percent: percent_of(budget.spent, budget.limit),
            })
        } else {
            None
        }
    }
}
