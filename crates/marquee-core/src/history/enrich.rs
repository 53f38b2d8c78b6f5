//! Event enricher: one batched lookup for every distinct event reference.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{history::MergedEventEntry, id::EventRef, source::ActivitySource};

/// Attach an [`EventSummary`](crate::event::EventSummary) to each entry the
/// backend can resolve. Entries it cannot resolve, or all entries if the
/// lookup fails outright, keep `event: None`.
pub async fn enrich_entries<S>(
  source: &S,
  entries: &mut BTreeMap<EventRef, MergedEventEntry>,
) where
  S: ActivitySource,
{
  if entries.is_empty() {
    return;
  }

  let refs: Vec<EventRef> = entries.keys().cloned().collect();
  match source.fetch_event_summaries(&refs).await {
    Ok(summaries) => {
      for summary in summaries {
        // First summary per reference wins.
        if let Some(entry) = entries.get_mut(&summary.eid) {
          if entry.event.is_none() {
            entry.event = Some(summary);
          }
        }
      }
    }
    Err(error) => {
      warn!(
        events = refs.len(),
        %error,
        "event lookup failed; showing raw references"
      );
    }
  }

  let unresolved = entries.values().filter(|e| e.event.is_none()).count();
  if unresolved > 0 {
    debug!(unresolved, "events left without details");
  }
}
