use serde::{Deserialize, Serialize};

use crate::common::*;

/// A savings goal with a target and the amount put aside so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: EntityId,
    pub label: String,
    pub target: f64,
    pub value: f64,
}

impl Goal {
    pub fn new(id: EntityId, label: impl Into<String>, target: f64) -> Self {
        Self {
            id,
            label: label.into(),
            target,
            value: 0.0,
        }
    }

    /// Sets the saved amount, clamped to `0..=target`.
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, self.target);
    }

    pub fn progress_percent(&self) -> u32 {
        percent_of(self.value, self.target)
    }

    pub fn remaining(&self) -> f64 {
        (self.target - self.value).max(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.value >= self.target
    }
}

impl Identifiable for Goal {
    fn id(&self) -> EntityId {
        self.id
    }
}
