//! FILENAME: core/engine/src/resolver.rs
//! Option resolution: the distinct values a selector may offer.

use crate::error::EngineError;
use crate::schema;
use crate::source::TabularSource;

/// Resolves the distinct values of `target` consistent with an optional
/// (column, value) constraint, ordered for presentation: case-insensitive
/// lexicographic ascending, exact duplicates removed.
///
/// The `Any` sentinel is prepended by the session/shell, never here. No
/// caching: every call re-queries the source of truth, so repeated calls
/// always reflect the current dataset state.
pub fn resolve_options(
    source: &dyn TabularSource,
    target: &str,
    constraint: Option<(&str, &str)>,
) -> Result<Vec<String>, EngineError> {
    schema::validate_column(target)?;
    if let Some((column, _)) = constraint {
        schema::validate_column(column)?;
    }

    let mut values = source.list_distinct(target, constraint)?;
    // The exact-string tie-break keeps equal values adjacent even when they
    // share a lowercase key with differently-cased neighbours, so dedup
    // removes every exact duplicate regardless of what the source returned.
    values.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    values.dedup();
    log::debug!(
        "resolved {} option(s) for {:?} (constraint: {:?})",
        values.len(),
        target,
        constraint
    );
    Ok(values)
}
