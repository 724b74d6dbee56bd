//! Shared traits and helpers for the SmartSpend primitives.

/// Numeric identifier assigned by the owning registry.
pub type EntityId = u64;

/// Exposes a stable identifier for entities held in a registry.
pub trait Identifiable {
    fn id(&self) -> EntityId;
}

/// Returns one more than the largest identifier in `items`, or 1 when empty.
pub fn next_id<'a, T, I>(items: I) -> EntityId
where
    T: Identifiable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(Identifiable::id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// Rounds a ratio to a whole percentage, half away from zero.
pub fn percent_of(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 || !part.is_finite() {
        return 0;
    }
    let percent = (part / whole * 100.0).round();
    if percent <= 0.0 {
        0
    } else if percent >= u32::MAX as f64 {
        u32::MAX
    } else {
        percent as u32
    }
}
