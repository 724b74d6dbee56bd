//! Persistence contract for the user's financial profile and goals.

use smartspend_domain::{FinancialProfile, Goal};

use crate::CoreError;

/// Document store for data that outlives a session. Budgets are never stored.
pub trait ProfileStore {
    fn load_profile(&self) -> Result<Option<FinancialProfile>, CoreError>;
    fn save_profile(&self, profile: &FinancialProfile) -> Result<(), CoreError>;
    fn load_goals(&self) -> Result<Vec<Goal>, CoreError>;
    fn save_goals(&self, goals: &[Goal]) -> Result<(), CoreError>;
}
