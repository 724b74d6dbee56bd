//! Session-level facade tying the onboarding flow, budgets, goals, and the profile store together.

use std::time::Duration;

use smartspend_config::Config;
use smartspend_core::{
    extract_spend, BudgetRegistry, BudgetService, Clock, CoreError, ExtractedSpend, GoalBook,
    GoalService, ProfileService, ProfileStore, PurchaseClassifier, RuleClassifier, ScanService,
    Session, SessionEvent, SessionState,
};
use smartspend_domain::{
    Budget, EntityId, FinancialProfile, Goal, Notification, RemainingTime, ScanItem, ScanReport,
};
use smartspend_storage_json::JsonProfileStore;
use tracing::info;

use crate::{
    errors::{Result, SmartSpendError},
    remote::HttpClassifier,
    system_clock::SystemClock,
};

/// Spend recorded from a chat-style message.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedSpend {
    pub extracted: ExtractedSpend,
    pub budget_id: EntityId,
    pub notification: Option<Notification>,
}

/// One user's interactive session.
pub struct SmartSpendApp {
    session: Session,
    registry: BudgetRegistry,
    goals: GoalBook,
    profile: Option<FinancialProfile>,
    /// Name given at sign-up, applied to the profile created by setup.
    pending_name: Option<String>,
    store: Box<dyn ProfileStore>,
    classifier: Box<dyn PurchaseClassifier>,
    clock: Box<dyn Clock>,
    warning_ratio: f64,
}

impl SmartSpendApp {
    pub fn new(
        warning_ratio: f64,
        store: Box<dyn ProfileStore>,
        classifier: Box<dyn PurchaseClassifier>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            session: Session::new(),
            registry: BudgetRegistry::with_warning_ratio(warning_ratio),
            goals: GoalBook::new(),
            profile: None,
            pending_name: None,
            store,
            classifier,
            clock,
            warning_ratio,
        }
    }

    /// Wires the JSON profile store, the configured classifier, and the system clock.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = JsonProfileStore::new(config.resolve_data_dir())?;
        Ok(Self::new(
            config.warning_ratio,
            Box::new(store),
            classifier_from_config(config)?,
            Box::new(SystemClock),
        ))
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn start(&mut self) -> Result<SessionState> {
        Ok(self.session.transition(SessionEvent::Start)?)
    }

    pub fn back(&mut self) -> Result<SessionState> {
        Ok(self.session.transition(SessionEvent::Back)?)
    }

    /// Signs in locally; a stored profile skips financial setup.
    pub fn sign_up(&mut self, display_name: Option<&str>) -> Result<SessionState> {
        if self.session.state() != SessionState::Signup {
            return Err(CoreError::InvalidTransition {
                state: self.session.state(),
                event: SessionEvent::SignedUp { has_profile: false },
            }
            .into());
        }
        let mut profile = self.store.load_profile()?;
        let has_profile = profile.is_some();
        let state = self
            .session
            .transition(SessionEvent::SignedUp { has_profile })?;
        if let (Some(profile), Some(name)) = (profile.as_mut(), display_name) {
            if profile.display_name.as_deref() != Some(name) {
                profile.display_name = Some(name.to_string());
                self.store.save_profile(profile)?;
            }
        }
        self.profile = profile;
        self.pending_name = display_name.map(str::to_string);
        if has_profile {
            self.goals = GoalBook::from_goals(self.store.load_goals()?);
        }
        info!(has_profile, "signed up");
        Ok(state)
    }

    /// Validates and stores the five onboarding answers, then opens the dashboard.
    pub fn complete_setup(&mut self, answers: &[&str]) -> Result<&FinancialProfile> {
        if self.session.state() != SessionState::FinancialSetup {
            return Err(CoreError::InvalidTransition {
                state: self.session.state(),
                event: SessionEvent::SetupCompleted,
            }
            .into());
        }
        let profile = ProfileService::from_fields(self.pending_name.as_deref(), answers)?;
        self.store.save_profile(&profile)?;
        self.session.transition(SessionEvent::SetupCompleted)?;
        self.goals = GoalBook::from_goals(self.store.load_goals()?);
        Ok(self.profile.insert(profile))
    }

    /// Ends the session; budgets are session-local and are dropped.
    pub fn sign_out(&mut self) -> Result<SessionState> {
        let state = self.session.transition(SessionEvent::SignOut)?;
        self.registry = BudgetRegistry::with_warning_ratio(self.warning_ratio);
        self.goals = GoalBook::new();
        self.profile = None;
        self.pending_name = None;
        Ok(state)
    }

    pub fn profile(&self) -> Option<&FinancialProfile> {
        self.profile.as_ref()
    }

    /// Fails unless onboarding has reached the dashboard.
    pub fn require_dashboard(&self) -> Result<()> {
        if self.session.is_dashboard() {
            Ok(())
        } else {
            Err(SmartSpendError::NotOnDashboard(
                self.session.state().to_string(),
            ))
        }
    }

    pub fn registry(&self) -> &BudgetRegistry {
        &self.registry
    }

    pub fn create_budget(&mut self, category: &str, limit: f64, duration: &str) -> Result<EntityId> {
        self.require_dashboard()?;
        Ok(BudgetService::create(
            &mut self.registry,
            category,
            limit,
            duration,
        )?)
    }

    pub fn budget(&self, id: EntityId) -> Result<&Budget> {
        Ok(self
            .registry
            .budget(id)
            .ok_or(CoreError::BudgetNotFound(id))?)
    }

    pub fn toggle_budget(&mut self, id: EntityId) -> Result<bool> {
        self.require_dashboard()?;
        Ok(BudgetService::toggle(
            &mut self.registry,
            id,
            self.clock.as_ref(),
        )?)
    }

    pub fn delete_budget(&mut self, id: EntityId) -> Result<Budget> {
        self.require_dashboard()?;
        Ok(BudgetService::delete(&mut self.registry, id)?)
    }

    pub fn time_remaining(&self, id: EntityId) -> Result<RemainingTime> {
        let budget = self.budget(id)?;
        Ok(BudgetService::time_remaining(budget, self.clock.as_ref()))
    }

    pub fn spend(&mut self, id: EntityId, amount: f64) -> Result<Option<Notification>> {
        self.require_dashboard()?;
        Ok(BudgetService::add_transaction(
            &mut self.registry,
            id,
            amount,
            self.clock.as_ref(),
        )?)
    }

    pub fn scan(&self, item: &ScanItem) -> Result<ScanReport> {
        self.require_dashboard()?;
        Ok(ScanService::scan(
            &self.registry,
            item,
            self.classifier.as_ref(),
        )?)
    }

    pub fn buy(&mut self, item: &ScanItem) -> Result<Option<Notification>> {
        self.require_dashboard()?;
        Ok(ScanService::confirm(
            &mut self.registry,
            item,
            self.clock.as_ref(),
        )?)
    }

    /// Records a spend described in prose, e.g. "Spent $40 on Dining at Burger Barn".
    pub fn log_message(&mut self, message: &str) -> Result<LoggedSpend> {
        self.require_dashboard()?;
        let extracted = extract_spend(message).ok_or_else(|| {
            SmartSpendError::InvalidInput(
                "could not find a spend in that message (try `Spent $50 on Dining at Cafe`)"
                    .into(),
            )
        })?;
        let category = extracted.spend_category().ok_or_else(|| {
            SmartSpendError::InvalidInput(format!(
                "`{}` is not a tracked category",
                extracted.category
            ))
        })?;
        let budget_id = self
            .registry
            .active_for(category)
            .map(|budget| budget.id)
            .ok_or_else(|| {
                CoreError::InvalidOperation(format!("no active budget exists for {category}"))
            })?;
        let notification = BudgetService::add_transaction(
            &mut self.registry,
            budget_id,
            extracted.amount,
            self.clock.as_ref(),
        )?;
        Ok(LoggedSpend {
            extracted,
            budget_id,
            notification,
        })
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.registry.notification()
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.registry.dismiss_notification()
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.goals()
    }

    pub fn add_goal(&mut self, label: &str, target: f64) -> Result<EntityId> {
        self.require_dashboard()?;
        let id = GoalService::add(&mut self.goals, label, target)?;
        self.persist_goals()?;
        Ok(id)
    }

    pub fn edit_goal(&mut self, id: EntityId, label: &str, target: f64) -> Result<()> {
        self.require_dashboard()?;
        GoalService::edit(&mut self.goals, id, label, target)?;
        self.persist_goals()
    }

    pub fn set_goal_value(&mut self, id: EntityId, value: f64) -> Result<f64> {
        self.require_dashboard()?;
        let stored = GoalService::update_value(&mut self.goals, id, value)?;
        self.persist_goals()?;
        Ok(stored)
    }

    pub fn delete_goal(&mut self, id: EntityId) -> Result<Goal> {
        self.require_dashboard()?;
        let removed = GoalService::delete(&mut self.goals, id)?;
        self.persist_goals()?;
        Ok(removed)
    }

    fn persist_goals(&self) -> Result<()> {
        Ok(self.store.save_goals(self.goals.goals())?)
    }
}

/// Remote classifier when an endpoint is configured, otherwise the local rules.
pub fn classifier_from_config(config: &Config) -> Result<Box<dyn PurchaseClassifier>> {
    let settings = &config.classifier;
    match settings.endpoint.as_deref() {
        Some(endpoint) => Ok(Box::new(HttpClassifier::new(
            endpoint,
            Duration::from_secs(settings.timeout_secs.max(1)),
        )?)),
        None => Ok(Box::new(RuleClassifier::new(
            settings.limits.clone(),
            settings.default_limit,
        ))),
    }
}
