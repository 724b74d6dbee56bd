use smartspend_domain::{Budget, SpendCategory};

use super::{arg, parse_amount, parse_id, rest};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "budget add <category> <limit> <duration>
budget list
budget show <id>
budget toggle <id>
budget delete <id>
budget remaining <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Create, list, toggle, and delete timed category budgets",
        USAGE,
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.app.require_dashboard()?;
    let sub = arg(args, 0, USAGE)?.to_lowercase();
    let rest_args = &args[1..];
    match sub.as_str() {
        "add" => budget_add(context, rest_args),
        "list" => budget_list(context),
        "show" => budget_show(context, rest_args),
        "toggle" => budget_toggle(context, rest_args),
        "delete" => budget_delete(context, rest_args),
        "remaining" => budget_remaining(context, rest_args),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget action `{other}`"
        ))),
    }
}

fn budget_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const ADD_USAGE: &str = "budget add <category> <limit> <duration>";
    let category = arg(args, 0, ADD_USAGE)?;
    let limit = parse_amount(arg(args, 1, ADD_USAGE)?)?;
    let duration = rest(args, 2).ok_or_else(|| CommandError::usage(ADD_USAGE))?;

    let id = context.app.create_budget(category, limit, &duration)?;
    let budget = context.app.budget(id)?;
    output::success(format!(
        "Budget #{id} created: {} {} for {}.",
        budget.category,
        context.money(budget.limit),
        budget.period
    ));
    output::hint(format!("Activate it with `budget toggle {id}`."));
    Ok(())
}

fn budget_list(context: &mut ShellContext) -> CommandResult {
    let registry = context.app.registry();
    if registry.is_empty() {
        output::info("No budgets yet.");
        output::hint(format!("Categories: {}", SpendCategory::options()));
        return Ok(());
    }

    let ratio = registry.warning_ratio();
    let rows: Vec<Vec<String>> = registry
        .budgets()
        .iter()
        .map(|budget| {
            let remaining = context
                .app
                .time_remaining(budget.id)
                .map(|left| left.to_string())
                .unwrap_or_default();
            vec![
                format!("#{}", budget.id),
                budget.category.to_string(),
                context.money(budget.spent),
                context.money(budget.limit),
                format!("{}%", budget.usage_percent()),
                budget.status(ratio).to_string(),
                budget.period.clone(),
                remaining,
            ]
        })
        .collect();

    output::section("Budgets");
    output::table(
        &["ID", "Category", "Spent", "Limit", "Used", "Status", "Window", "Remaining"],
        &rows,
    );
    Ok(())
}

fn budget_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(arg(args, 0, "budget show <id>")?)?;
    let budget = context.app.budget(id)?;
    let remaining = context.app.time_remaining(id)?;
    print_budget(context, budget);
    output::info(format!("  Remaining : {remaining}"));
    Ok(())
}

fn print_budget(context: &ShellContext, budget: &Budget) {
    let ratio = context.app.registry().warning_ratio();
    output::section(format!("Budget #{} {}", budget.id, budget.category));
    output::info(format!("  Limit     : {}", context.money(budget.limit)));
    output::info(format!(
        "  Spent     : {} ({}%, {})",
        context.money(budget.spent),
        budget.usage_percent(),
        budget.status(ratio)
    ));
    output::info(format!("  Window    : {}", budget.period));
    output::info(format!(
        "  Active    : {}",
        if budget.active { "yes" } else { "no" }
    ));
    if let (Some(start), Some(end)) = (budget.start_time, budget.end_time) {
        output::info(format!(
            "  From/To   : {} -> {}",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M")
        ));
    }
    if budget.transactions.is_empty() {
        output::info("  No transactions in this window.");
        return;
    }
    output::info("  Transactions:");
    for record in &budget.transactions {
        output::info(format!(
            "    {}  {}",
            record.date.format("%Y-%m-%d %H:%M"),
            context.money(record.amount)
        ));
    }
}

fn budget_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(arg(args, 0, "budget toggle <id>")?)?;
    if context.app.toggle_budget(id)? {
        let remaining = context.app.time_remaining(id)?;
        output::success(format!("Budget #{id} activated ({remaining})."));
    } else {
        output::success(format!("Budget #{id} deactivated."));
    }
    Ok(())
}

fn budget_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(arg(args, 0, "budget delete <id>")?)?;
    context.app.budget(id)?;
    if !context.confirm(&format!("Delete budget #{id}?"))? {
        output::info("Nothing deleted.");
        return Ok(());
    }
    let removed = context.app.delete_budget(id)?;
    output::success(format!("Budget #{id} ({}) deleted.", removed.category));
    Ok(())
}

fn budget_remaining(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id(arg(args, 0, "budget remaining <id>")?)?;
    let remaining = context.app.time_remaining(id)?;
    output::info(format!("Budget #{id}: {remaining}"));
    Ok(())
}
