//! Per-subject activity aggregation.
//!
//! ```text
//! subject id ─► fetch (3 queries, concurrent) ─► merge (keyed fold)
//!            ─► enrich (one batched lookup)   ─► present (newest first)
//! ```
//!
//! Every stage tolerates failure of the stage before it: a broken
//! relationship query contributes no records, a failed event lookup leaves
//! entries unlabelled. [`aggregate_history`] itself cannot fail.

mod entry;
mod enrich;
mod fetch;
mod merge;
mod present;

pub use entry::MergedEventEntry;
pub use enrich::enrich_entries;
pub use fetch::{FetchedRecords, fetch_records};
pub use merge::merge_records;
pub use present::present;

use tracing::debug;

use crate::{id::SubjectId, source::ActivitySource};

/// Build the activity timeline for `subject_id`, most recent event first.
///
/// Returns an empty vector when the subject has no activity (or when every
/// source failed).
pub async fn aggregate_history<S>(
  source: &S,
  subject_id: &SubjectId,
) -> Vec<MergedEventEntry>
where
  S: ActivitySource,
{
  let fetched = fetch_records(source, subject_id).await;
  let records = fetched.into_successful(subject_id);

  let mut entries = merge_records(records);
  enrich_entries(source, &mut entries).await;

  let timeline = present(entries.into_values());
  debug!(%subject_id, events = timeline.len(), "aggregated activity history");
  timeline
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    record::RelationshipKind,
    testing::{
      FakeSource, application, confirmation, date, eid, event_summary,
      invitation, subject,
    },
  };

  #[tokio::test]
  async fn no_records_yields_empty_timeline() {
    let source = FakeSource::default();
    let timeline = aggregate_history(&source, &subject("4821")).await;
    assert!(timeline.is_empty());
    assert_eq!(source.event_calls(), 0, "no lookup without events");
  }

  #[tokio::test]
  async fn example_timeline_orders_by_last_activity() {
    let mut source = FakeSource::with_records(vec![
      application("4821", Some("AB3041"), Some(date(2024, 3, 1))),
      confirmation("4821", Some("AB3041"), Some(date(2024, 3, 10))),
      invitation("4821", Some("AB2990"), Some(date(2024, 1, 15))),
      // Another artist's activity must not leak in.
      application("9999", Some("AB1000"), Some(date(2024, 6, 1))),
    ]);
    source.events = vec![
      event_summary("AB3041", "Art Battle Toronto"),
      event_summary("AB2990", "Art Battle Montreal"),
    ];

    let timeline = aggregate_history(&source, &subject("4821")).await;

    let order: Vec<&str> =
      timeline.iter().map(|e| e.event_ref.as_str()).collect();
    assert_eq!(order, ["AB3041", "AB2990"]);

    let first = &timeline[0];
    assert_eq!(first.last_activity, date(2024, 3, 10));
    assert!(first.application.is_some());
    assert!(first.confirmation.is_some());
    assert!(first.invitation.is_none());
    assert_eq!(first.title(), "Art Battle Toronto");

    let second = &timeline[1];
    assert_eq!(second.last_activity, date(2024, 1, 15));
    assert!(second.invitation.is_some());
    assert!(second.application.is_none());
    assert!(second.confirmation.is_none());

    assert_eq!(source.event_calls(), 1, "events resolved in one batch");
  }

  #[tokio::test]
  async fn one_failing_source_does_not_blank_the_others() {
    let mut source = FakeSource::with_records(vec![
      application("4821", Some("AB3041"), Some(date(2024, 3, 1))),
      invitation("4821", Some("AB2990"), Some(date(2024, 1, 15))),
      confirmation("4821", Some("AB3041"), Some(date(2024, 3, 10))),
    ]);
    source.failing_kinds = vec![RelationshipKind::Confirmation];

    let fetched = fetch_records(&source, &subject("4821")).await;
    assert_eq!(fetched.failed_kinds(), [RelationshipKind::Confirmation]);

    let timeline = aggregate_history(&source, &subject("4821")).await;
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].event_ref, eid("AB3041"));
    assert_eq!(timeline[0].last_activity, date(2024, 3, 1));
    assert!(timeline[0].confirmation.is_none());
  }

  #[tokio::test]
  async fn all_sources_failing_yields_empty_timeline() {
    let mut source = FakeSource::with_records(vec![application(
      "4821",
      Some("AB3041"),
      Some(date(2024, 3, 1)),
    )]);
    source.failing_kinds = RelationshipKind::ALL.to_vec();

    assert!(aggregate_history(&source, &subject("4821")).await.is_empty());
  }

  #[tokio::test]
  async fn missing_event_keeps_others_enriched() {
    let mut source = FakeSource::with_records(vec![
      application("4821", Some("AB3041"), Some(date(2024, 3, 1))),
      application("4821", Some("GHOST"), Some(date(2024, 4, 1))),
      invitation("4821", Some("AB2990"), Some(date(2024, 1, 15))),
    ]);
    source.events = vec![
      event_summary("AB3041", "Art Battle Toronto"),
      event_summary("AB2990", "Art Battle Montreal"),
    ];

    let timeline = aggregate_history(&source, &subject("4821")).await;
    assert_eq!(timeline.len(), 3);

    let ghost = &timeline[0];
    assert_eq!(ghost.event_ref, eid("GHOST"));
    assert!(ghost.event.is_none());
    assert_eq!(ghost.title(), "GHOST");

    assert!(timeline[1..].iter().all(|e| e.event.is_some()));
  }

  #[tokio::test]
  async fn failed_event_lookup_degrades_to_raw_references() {
    let mut source = FakeSource::with_records(vec![
      application("4821", Some("AB3041"), Some(date(2024, 3, 1))),
      invitation("4821", Some("AB2990"), Some(date(2024, 1, 15))),
    ]);
    source.events = vec![event_summary("AB3041", "Art Battle Toronto")];
    source.fail_events = true;

    let timeline = aggregate_history(&source, &subject("4821")).await;
    assert_eq!(timeline.len(), 2);
    assert!(timeline.iter().all(|e| e.event.is_none()));
    assert_eq!(timeline[0].title(), "AB3041");
  }

  #[tokio::test]
  async fn aggregation_is_idempotent() {
    let mut source = FakeSource::with_records(vec![
      application("4821", Some("AB3041"), None),
      invitation("4821", Some("AB2990"), None),
      confirmation("4821", Some("AB1111"), Some(date(2023, 5, 5))),
      invitation("4821", None, Some(date(2024, 1, 1))),
    ]);
    source.events = vec![event_summary("AB3041", "Art Battle Toronto")];

    let first = aggregate_history(&source, &subject("4821")).await;
    let second = aggregate_history(&source, &subject("4821")).await;
    assert_eq!(first, second);
  }
}
