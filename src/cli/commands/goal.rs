use super::{arg, parse_amount, parse_id, rest};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "goal add <target> <label>
goal list
goal edit <id> <target> <label>
goal set <id> <value>
goal delete <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Track savings goals",
        USAGE,
        cmd_goal,
    )]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.app.require_dashboard()?;
    let sub = arg(args, 0, USAGE)?.to_lowercase();
    let args = &args[1..];
    match sub.as_str() {
        "add" => {
            const ADD: &str = "goal add <target> <label>";
            let target = parse_amount(arg(args, 0, ADD)?)?;
            let label = rest(args, 1).ok_or_else(|| CommandError::usage(ADD))?;
            let id = context.app.add_goal(&label, target)?;
            output::success(format!(
                "Goal #{id} `{label}` added with target {}.",
                context.money(target)
            ));
        }
        "list" => goal_list(context),
        "edit" => {
            const EDIT: &str = "goal edit <id> <target> <label>";
            let id = parse_id(arg(args, 0, EDIT)?)?;
            let target = parse_amount(arg(args, 1, EDIT)?)?;
            let label = rest(args, 2).ok_or_else(|| CommandError::usage(EDIT))?;
            context.app.edit_goal(id, &label, target)?;
            output::success(format!("Goal #{id} updated."));
        }
        "set" => {
            const SET: &str = "goal set <id> <value>";
            let id = parse_id(arg(args, 0, SET)?)?;
            let value = parse_amount(arg(args, 1, SET)?)?;
            let stored = context.app.set_goal_value(id, value)?;
            if stored != value {
                output::info(format!("Value clamped to {}.", context.money(stored)));
            }
            output::success(format!("Goal #{id} now at {}.", context.money(stored)));
        }
        "delete" => {
            let id = parse_id(arg(args, 0, "goal delete <id>")?)?;
            if context.confirm(&format!("Delete goal #{id}?"))? {
                let removed = context.app.delete_goal(id)?;
                output::success(format!("Goal #{id} `{}` deleted.", removed.label));
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown goal action `{other}`"
            )))
        }
    }
    Ok(())
}

fn goal_list(context: &ShellContext) {
    let goals = context.app.goals();
    if goals.is_empty() {
        output::info("No goals yet. Add one with `goal add <target> <label>`.");
        return;
    }
    let rows: Vec<Vec<String>> = goals
        .iter()
        .map(|goal| {
            vec![
                format!("#{}", goal.id),
                goal.label.clone(),
                context.money(goal.value),
                context.money(goal.target),
                format!("{}%", goal.progress_percent()),
                if goal.is_complete() {
                    "done".to_string()
                } else {
                    format!("{} to go", context.money(goal.remaining()))
                },
            ]
        })
        .collect();
    output::section("Goals");
    output::table(&["ID", "Goal", "Saved", "Target", "Progress", "Status"], &rows);
}
