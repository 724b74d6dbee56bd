pub mod budget;
pub mod config;
pub mod goal;
pub mod purchase;
pub mod session;
pub mod system;

use smartspend_domain::EntityId;

use crate::cli::context::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        session::definitions(),
        budget::definitions(),
        purchase::definitions(),
        goal::definitions(),
        config::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Positional argument or a usage error.
pub(crate) fn arg<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(index).copied().ok_or_else(|| CommandError::usage(usage))
}

pub(crate) fn parse_id(value: &str) -> Result<EntityId, CommandError> {
    value
        .trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{value}` is not a valid id")))
}

/// Parses a money amount, tolerating `$` and thousands separators.
pub(crate) fn parse_amount(value: &str) -> Result<f64, CommandError> {
    let cleaned: String = value.chars().filter(|ch| !matches!(ch, '$' | ',')).collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{value}` is not a valid amount")))
}

/// Remaining arguments joined back into one phrase, e.g. a multi-word label.
pub(crate) fn rest(args: &[&str], from: usize) -> Option<String> {
    let joined = args.get(from..)?.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
