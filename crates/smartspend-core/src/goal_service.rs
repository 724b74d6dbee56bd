use smartspend_domain::{next_id, EntityId, Goal};
use tracing::info;

use crate::CoreError;

/// Savings goals for one session.
#[derive(Debug, Clone, Default)]
pub struct GoalBook {
    goals: Vec<Goal>,
}

impl GoalBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_goals(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: EntityId) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    fn goal_mut(&mut self, id: EntityId) -> Result<&mut Goal, CoreError> {
        self.goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or(CoreError::GoalNotFound(id))
    }
}

pub struct GoalService;

impl GoalService {
    pub fn add(book: &mut GoalBook, label: &str, target: f64) -> Result<EntityId, CoreError> {
        let label = validate(label, target)?;
        let id = next_id(book.goals.iter());
        book.goals.push(Goal::new(id, label, target));
        info!(goal_id = id, target, "goal added");
        Ok(id)
    }

    /// Renames or retargets a goal; the saved value is kept and re-clamped.
    pub fn edit(
        book: &mut GoalBook,
        id: EntityId,
        label: &str,
        target: f64,
    ) -> Result<(), CoreError> {
        let label = validate(label, target)?;
        let goal = book.goal_mut(id)?;
        goal.label = label;
        goal.target = target;
        let value = goal.value;
        goal.set_value(value);
        info!(goal_id = id, target, "goal edited");
        Ok(())
    }

    pub fn update_value(book: &mut GoalBook, id: EntityId, value: f64) -> Result<f64, CoreError> {
        if !value.is_finite() {
            return Err(CoreError::Validation("goal value must be a number".into()));
        }
        let goal = book.goal_mut(id)?;
        goal.set_value(value);
        Ok(goal.value)
    }

    pub fn delete(book: &mut GoalBook, id: EntityId) -> Result<Goal, CoreError> {
        let index = book
            .goals
            .iter()
            .position(|goal| goal.id == id)
            .ok_or(CoreError::GoalNotFound(id))?;
        Ok(book.goals.remove(index))
    }
}

fn validate(label: &str, target: f64) -> Result<String, CoreError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(CoreError::Validation("goal label is required".into()));
    }
    if !target.is_finite() || target <= 0.0 {
        return Err(CoreError::Validation(
            "goal target must be a positive amount".into(),
        ));
    }
    Ok(label.to_string())
}
