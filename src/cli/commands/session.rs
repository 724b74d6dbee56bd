//! Onboarding commands: landing, sign-up, financial setup, sign-out.

use smartspend_core::SessionState;
use smartspend_domain::{FinancialProfile, ProfileField};

use super::rest;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const SETUP_USAGE: &str = "setup <income> <expenses> <loans> <savings> <investments>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "session",
            "Show the current onboarding step",
            "session",
            cmd_session,
        ),
        CommandEntry::new("start", "Leave the landing page", "start", cmd_start),
        CommandEntry::new("back", "Return to the previous step", "back", cmd_back),
        CommandEntry::new(
            "signup",
            "Sign up locally, optionally with a display name",
            "signup [name]",
            cmd_signup,
        ),
        CommandEntry::new(
            "setup",
            "Complete financial setup (prompts when no values are given)",
            SETUP_USAGE,
            cmd_setup,
        ),
        CommandEntry::new("signout", "Sign out and drop session budgets", "signout", cmd_signout),
        CommandEntry::new(
            "profile",
            "Show the stored financial profile",
            "profile",
            cmd_profile,
        ),
    ]
}

fn next_step(state: SessionState) -> &'static str {
    match state {
        SessionState::Landing => "Run `start` to begin.",
        SessionState::Signup => "Run `signup [name]` to create your account.",
        SessionState::FinancialSetup => {
            "Run `setup <income> <expenses> <loans> <savings> <investments>`."
        }
        SessionState::Dashboard => "Create a budget with `budget add <category> <limit> <duration>`.",
    }
}

fn cmd_session(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.app.session_state();
    output::info(format!("Current step: {state}"));
    output::hint(next_step(state));
    Ok(())
}

fn cmd_start(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.app.start()?;
    output::success("Welcome to SmartSpend.");
    output::hint(next_step(state));
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.app.back()?;
    output::info(format!("Back to {state}."));
    Ok(())
}

fn cmd_signup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = rest(args, 0);
    let state = context.app.sign_up(name.as_deref())?;
    match state {
        SessionState::Dashboard => {
            let greeting = name.map(|name| format!(", {name}")).unwrap_or_default();
            output::success(format!("Welcome back{greeting}. Your dashboard is ready."));
        }
        _ => {
            output::success("Account created.");
            output::hint(next_step(state));
        }
    }
    Ok(())
}

fn cmd_setup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let answers: Vec<String> = if args.is_empty() && context.can_prompt() {
        ProfileField::ALL
            .iter()
            .map(|field| context.prompt_text(field.label()))
            .collect::<Result<_, _>>()?
    } else if args.len() == ProfileField::ALL.len() {
        args.iter().map(|value| value.to_string()).collect()
    } else {
        return Err(CommandError::usage(SETUP_USAGE));
    };

    let answers: Vec<&str> = answers.iter().map(String::as_str).collect();
    let profile = context.app.complete_setup(&answers)?.clone();
    output::success("Financial setup complete. Your dashboard is ready.");
    print_profile(context, &profile);
    Ok(())
}

fn cmd_signout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.app.sign_out()?;
    output::success("Signed out.");
    Ok(())
}

fn cmd_profile(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.app.profile() {
        Some(profile) => print_profile(context, profile),
        None => output::info("No financial profile yet. Finish `setup` first."),
    }
    Ok(())
}

fn print_profile(context: &ShellContext, profile: &FinancialProfile) {
    let title = profile.display_name.as_deref().unwrap_or("Financial profile");
    output::section(title);
    let rows = [
        (ProfileField::MonthlyIncome, profile.monthly_income),
        (ProfileField::MonthlyExpenses, profile.monthly_expenses),
        (ProfileField::ExistingLoans, profile.existing_loans),
        (ProfileField::Savings, profile.savings),
        (ProfileField::CurrentInvestments, profile.current_investments),
    ];
    for (field, value) in rows {
        output::info(format!("  {:<20} {}", field.label(), context.money(value)));
    }
    output::info(format!(
        "  {:<20} {}",
        "Monthly surplus",
        context.money(profile.monthly_surplus())
    ));
    output::info(format!("  {:<20} {}", "Net worth", context.money(profile.net_worth())));
    output::info(format!(
        "  {:<20} {}%",
        "Savings rate",
        profile.savings_rate_percent()
    ));
}
