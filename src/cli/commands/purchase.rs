//! Spending commands: direct spends, what-if scans, purchases, and chat-style logging.

use smartspend_domain::{Notification, ScanItem, ScanReport, SpendCategory};

use super::{arg, parse_amount, parse_id, rest};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const SCAN_USAGE: &str = "scan [<name> <price> <category>]";
const BUY_USAGE: &str = "buy [<name> <price> <category>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "spend",
            "Record a spend against an active budget",
            "spend <budget-id> <amount>",
            cmd_spend,
        ),
        CommandEntry::new(
            "scan",
            "Check whether an item fits its category budget (demo item when omitted)",
            SCAN_USAGE,
            cmd_scan,
        ),
        CommandEntry::new(
            "buy",
            "Record a purchase against its category budget (last scan when omitted)",
            BUY_USAGE,
            cmd_buy,
        ),
        CommandEntry::new(
            "log",
            "Record a spend described in a sentence",
            "log Spent $40 on Dining at Burger Barn",
            cmd_log,
        ),
        CommandEntry::new(
            "notice",
            "Show or dismiss the current budget notification",
            "notice [dismiss]",
            cmd_notice,
        ),
    ]
}

/// Item shown on the scanner before anything is typed in.
fn demo_item() -> ScanItem {
    ScanItem::new("Sony Headphones", 650.0, SpendCategory::Shopping)
}

fn parse_item(args: &[&str], usage: &str) -> Result<ScanItem, CommandError> {
    let name = arg(args, 0, usage)?;
    let price = parse_amount(arg(args, 1, usage)?)?;
    let category: SpendCategory = rest(args, 2)
        .ok_or_else(|| CommandError::usage(usage))?
        .parse()
        .map_err(|err: smartspend_domain::UnknownCategory| {
            CommandError::InvalidArguments(err.to_string())
        })?;
    Ok(ScanItem::new(name, price, category))
}

fn announce(notification: Option<Notification>) {
    if let Some(notification) = notification {
        output::warning(format!("Budget #{}: {notification}", notification.budget_id()));
    }
}

fn cmd_spend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "spend <budget-id> <amount>";
    let id = parse_id(arg(args, 0, USAGE)?)?;
    let amount = parse_amount(arg(args, 1, USAGE)?)?;
    let notification = context.app.spend(id, amount)?;
    let budget = context.app.budget(id)?;
    output::success(format!(
        "Recorded {} on budget #{id} ({} of {} spent).",
        context.money(amount),
        context.money(budget.spent),
        context.money(budget.limit)
    ));
    announce(notification);
    Ok(())
}

fn cmd_scan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let item = if args.is_empty() {
        demo_item()
    } else {
        parse_item(args, SCAN_USAGE)?
    };
    let report = context.app.scan(&item)?;
    print_report(context, &report);
    context.last_scan = Some(item);
    Ok(())
}

fn print_report(context: &ShellContext, report: &ScanReport) {
    let item = &report.item;
    output::section(format!(
        "Scan: {} ({}, {})",
        item.name,
        context.money(item.price),
        item.category
    ));
    if report.allowed() {
        output::success(report.verdict.message());
    } else {
        output::warning(report.verdict.message());
    }
    if let Some(suggestion) = report.verdict.suggestion() {
        output::hint(suggestion);
    }

    if let Some(advice) = &report.advice {
        let stance = if advice.allowed { "approves" } else { "advises against" };
        output::info(format!("Advisor {stance} this purchase."));
        if let Some(alert) = &advice.alert {
            output::warning(alert);
        }
        if let Some(suggestion) = &advice.suggestion {
            output::hint(suggestion);
        }
    }
    if let Some(err) = &report.classifier_error {
        output::warning(format!("Advisor unavailable: {err}"));
    }
    if report.allowed() {
        output::hint("Run `buy` to record this purchase.");
    }
}

fn cmd_buy(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let item = if args.is_empty() {
        context.last_scan.clone().ok_or_else(|| {
            CommandError::InvalidArguments(format!("nothing scanned yet; usage: {BUY_USAGE}"))
        })?
    } else {
        parse_item(args, BUY_USAGE)?
    };
    let notification = context.app.buy(&item)?;
    output::success(format!(
        "Bought {} for {} ({}).",
        item.name,
        context.money(item.price),
        item.category
    ));
    announce(notification);
    context.last_scan = None;
    Ok(())
}

fn cmd_log(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let message = rest(args, 0).ok_or_else(|| {
        CommandError::usage("log Spent $40 on Dining at Burger Barn")
    })?;
    let logged = context.app.log_message(&message)?;
    output::success(format!(
        "Logged {} at {} to {} (budget #{}).",
        context.money(logged.extracted.amount),
        logged.extracted.merchant,
        logged.extracted.category,
        logged.budget_id
    ));
    announce(logged.notification);
    Ok(())
}

fn cmd_notice(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|value| value.to_lowercase()).as_deref() {
        None => match context.app.notification() {
            Some(notification) => output::warning(notification),
            None => output::info("No notifications."),
        },
        Some("dismiss") => match context.app.dismiss_notification() {
            Some(_) => output::success("Notification dismissed."),
            None => output::info("No notifications."),
        },
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown notice action `{other}`"
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_category_may_span_words_and_case() {
        let item = parse_item(&["Lunch", "$12.50", "dining"], SCAN_USAGE).unwrap();
        assert_eq!(item, ScanItem::new("Lunch", 12.5, SpendCategory::Dining));
    }

    #[test]
    fn unknown_item_category_is_rejected() {
        let err = parse_item(&["Boat", "100", "Yachts"], SCAN_USAGE).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }
}
