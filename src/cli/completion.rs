//! Session-aware completion and usage hints for the interactive shell.

use smartspend_config::Config;
use smartspend_core::SessionState;
use smartspend_domain::{EntityId, SpendCategory};

use super::context::ShellContext;

const BUDGET_ACTIONS: [&str; 6] = ["add", "list", "show", "toggle", "delete", "remaining"];
const GOAL_ACTIONS: [&str; 5] = ["add", "list", "edit", "set", "delete"];
const CONFIG_ACTIONS: [&str; 3] = ["show", "path", "set"];
const NOTICE_ACTIONS: [&str; 1] = ["dismiss"];

/// Whether `command` can succeed at `state`. Commands not tied to a step are always open.
pub(crate) fn offered_at(command: &str, state: SessionState) -> bool {
    use SessionState::*;
    match command {
        "start" => state == Landing,
        "back" => matches!(state, Signup | FinancialSetup),
        "signup" => state == Signup,
        "setup" => state == FinancialSetup,
        "signout" => matches!(state, FinancialSetup | Dashboard),
        "budget" | "spend" | "scan" | "buy" | "log" | "notice" | "goal" => state == Dashboard,
        _ => true,
    }
}

/// What the shell can offer right now, captured before each prompt.
#[derive(Debug, Clone, Default)]
pub(crate) struct CompletionModel {
    /// `(name, usage)` for every command open at the current step, sorted by name.
    commands: Vec<(&'static str, &'static str)>,
    budget_ids: Vec<EntityId>,
    goal_ids: Vec<EntityId>,
}

impl CompletionModel {
    pub(crate) fn snapshot(context: &ShellContext) -> Self {
        let state = context.app.session_state();
        let mut commands: Vec<_> = context
            .registry
            .list()
            .filter(|entry| offered_at(entry.name, state))
            .map(|entry| (entry.name, entry.usage))
            .collect();
        commands.sort_by_key(|(name, _)| *name);
        Self {
            commands,
            budget_ids: context
                .app
                .registry()
                .budgets()
                .iter()
                .map(|budget| budget.id)
                .collect(),
            goal_ids: context.app.goals().iter().map(|goal| goal.id).collect(),
        }
    }

    /// Candidates for the word being typed, given the complete words before it.
    pub(crate) fn candidates(&self, before: &[&str], partial: &str) -> Vec<String> {
        let needle = partial.to_lowercase();
        let pool = match before {
            [] => self.command_names(),
            [command, typed @ ..] => self.arguments(&command.to_lowercase(), typed),
        };
        pool.into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .collect()
    }

    /// Placeholders still to fill for the command on `line`.
    pub(crate) fn usage_hint(&self, line: &str) -> Option<String> {
        if !line.ends_with(char::is_whitespace) {
            return None;
        }
        let mut words = line.split_whitespace();
        let command = words.next()?.to_lowercase();
        let typed: Vec<&str> = words.collect();
        self.usage(&command)?
            .lines()
            .find_map(|form| remaining_placeholders(form, &typed))
    }

    fn usage(&self, command: &str) -> Option<&'static str> {
        self.commands
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, usage)| *usage)
    }

    fn command_names(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    fn arguments(&self, command: &str, typed: &[&str]) -> Vec<String> {
        if self.usage(command).is_none() {
            return Vec::new();
        }
        let action = typed.first().map(|word| word.to_lowercase());
        match (command, typed.len(), action.as_deref()) {
            ("help", 0, _) => self.command_names(),
            ("budget", 0, _) => words(&BUDGET_ACTIONS),
            ("budget", 1, Some("add")) => categories(),
            ("budget", 1, Some("show" | "toggle" | "delete" | "remaining")) => {
                ids(&self.budget_ids)
            }
            ("spend", 0, _) => ids(&self.budget_ids),
            ("scan" | "buy", 2, _) => categories(),
            ("goal", 0, _) => words(&GOAL_ACTIONS),
            ("goal", 1, Some("edit" | "set" | "delete")) => ids(&self.goal_ids),
            ("notice", 0, _) => words(&NOTICE_ACTIONS),
            ("config", 0, _) => words(&CONFIG_ACTIONS),
            ("config", 1, Some("set")) => words(&Config::KEYS),
            _ => Vec::new(),
        }
    }
}

fn words(options: &[&str]) -> Vec<String> {
    options.iter().map(|word| word.to_string()).collect()
}

fn ids(ids: &[EntityId]) -> Vec<String> {
    ids.iter().map(EntityId::to_string).collect()
}

fn categories() -> Vec<String> {
    SpendCategory::ALL
        .iter()
        .map(SpendCategory::to_string)
        .collect()
}

/// Rest of a usage form after `typed`, offered only when a placeholder comes next.
fn remaining_placeholders(form: &str, typed: &[&str]) -> Option<String> {
    let slots: Vec<&str> = form.split_whitespace().skip(1).collect();
    if typed.len() >= slots.len() {
        return None;
    }
    let fits = typed
        .iter()
        .zip(&slots)
        .all(|(word, slot)| is_placeholder(slot) || slot.eq_ignore_ascii_case(word));
    let remaining = &slots[typed.len()..];
    if !fits || !is_placeholder(remaining[0]) {
        return None;
    }
    let hint = remaining.join(" ");
    // an optional group entered part-way leaves a dangling bracket
    if hint.contains(']') && !hint.contains('[') {
        Some(hint.replace(']', ""))
    } else {
        Some(hint)
    }
}

fn is_placeholder(slot: &str) -> bool {
    slot.starts_with('<') || slot.starts_with('[')
}
