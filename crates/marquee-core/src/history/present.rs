//! Sort & present: stamp `last_activity` and order newest first.

use crate::history::MergedEventEntry;

/// Compute `last_activity` for every entry and sort descending by it.
///
/// The sort is stable, so entries with equal activity keep their input
/// order.
pub fn present<I>(entries: I) -> Vec<MergedEventEntry>
where
  I: IntoIterator<Item = MergedEventEntry>,
{
  let mut out: Vec<MergedEventEntry> = entries
    .into_iter()
    .map(|mut entry| {
      entry.last_activity = entry.compute_last_activity();
      entry
    })
    .collect();

  out.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
  out
}
