//! Timeline merger: the keyed fold from raw records to one entry per event.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{history::MergedEventEntry, id::EventRef, record::RelationshipRecord};

/// Fold `records` into a map keyed by event reference.
///
/// Records without an event reference have nothing to key on and are
/// dropped. The map is ordered by reference so repeated runs iterate
/// identically.
pub fn merge_records<I>(records: I) -> BTreeMap<EventRef, MergedEventEntry>
where
  I: IntoIterator<Item = RelationshipRecord>,
{
  let mut entries: BTreeMap<EventRef, MergedEventEntry> = BTreeMap::new();
  let mut orphans = 0usize;

  for record in records {
    let Some(event_ref) = record.event_ref().cloned() else {
      orphans += 1;
      continue;
    };
    entries
      .entry(event_ref)
      .or_insert_with_key(|key| MergedEventEntry::new(key.clone()))
      .attach(record);
  }

  if orphans > 0 {
    debug!(orphans, "dropped relationship records without an event reference");
  }

  entries
}
