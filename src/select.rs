use crate::subtitle::Subtitle;
use crate::version::{normalize, CompatibilityTable};

/// Pick the single best candidate for a target release version.
///
/// Only completed candidates compatible with the target are considered; among
/// those, a left fold with `can_replace` keeps the incumbent on ties, so the
/// first usable candidate encountered wins when download counts are equal.
pub fn best_subtitle<'a>(
    pool: &'a [Subtitle],
    target_version: &str,
    table: &CompatibilityTable,
) -> Option<&'a Subtitle> {
    let target = normalize(Some(target_version));
    pool.iter()
        .filter(|sub| sub.works_for(&target, table))
        .fold(None, |best, sub| {
            if sub.can_replace(best, table) {
                Some(sub)
            } else {
                best
            }
        })
}
