use super::rest;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const SET_USAGE: &str = "config set <key> <value>";

/// Keys read only when the app is wired at startup.
const STARTUP_KEYS: [&str; 5] = [
    "warning_ratio",
    "data_dir",
    "classifier.endpoint",
    "classifier.timeout_secs",
    "classifier.default_limit",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|path|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|value| value.to_lowercase()).as_deref() {
        None | Some("show") => show_config(context),
        Some("path") => {
            output::info(context.config_manager.config_path().display());
            Ok(())
        }
        Some("set") => {
            let key = args.get(1).ok_or_else(|| CommandError::usage(SET_USAGE))?;
            let value = rest(args, 2).unwrap_or_default();
            set_config_value(context, key, &value)
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  locale                   : {}", config.locale));
    output::info(format!("  currency                 : {}", config.currency));
    output::info(format!("  ui_color_enabled         : {}", config.ui_color_enabled));
    output::info(format!("  warning_ratio            : {}", config.warning_ratio));
    output::info(format!(
        "  data_dir                 : {}",
        config.resolve_data_dir().display()
    ));
    output::info(format!(
        "  classifier.endpoint      : {}",
        config.classifier.endpoint.as_deref().unwrap_or("none (local rules)")
    ));
    output::info(format!(
        "  classifier.timeout_secs  : {}",
        config.classifier.timeout_secs
    ));
    output::info(format!(
        "  classifier.default_limit : {}",
        config.classifier.default_limit
    ));
    for (category, limit) in &config.classifier.limits {
        output::info(format!("    limit {category:<15}: {limit}"));
    }
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    context.config.set(key, value)?;
    context.persist_config()?;
    output::apply_config(&context.config);
    output::success(format!("Updated `{key}`."));
    if STARTUP_KEYS.contains(&key) {
        output::hint("Takes effect the next time SmartSpend starts.");
    }
    Ok(())
}
