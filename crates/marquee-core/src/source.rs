//! The `ActivitySource` trait, the read contract the aggregation consumes.
//!
//! Implemented by storage backends (e.g. `marquee-store-sqlite`) and by
//! in-memory fakes in tests. Higher layers (`marquee-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  event::EventSummary,
  id::{EventRef, SubjectId},
  record::{RelationshipKind, RelationshipRecord},
};

/// Read access to relationship records and event metadata.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ActivitySource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All records of `kind` belonging to `subject_id`.
  ///
  /// "No rows" is an empty vector, never an error. Every returned record must
  /// be of the requested kind.
  fn fetch_relationship_records<'a>(
    &'a self,
    kind: RelationshipKind,
    subject_id: &'a SubjectId,
  ) -> impl Future<Output = Result<Vec<RelationshipRecord>, Self::Error>> + Send + 'a;

  /// Resolve many event references in one round-trip.
  ///
  /// References the backend does not know are simply absent from the result.
  /// At most one summary is returned per reference.
  fn fetch_event_summaries<'a>(
    &'a self,
    refs: &'a [EventRef],
  ) -> impl Future<Output = Result<Vec<EventSummary>, Self::Error>> + Send + 'a;

  /// The `limit` most recent records of `kind` across all subjects, newest
  /// first. Records without any timestamp come last.
  fn fetch_recent_records(
    &self,
    kind: RelationshipKind,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<RelationshipRecord>, Self::Error>> + Send + '_;
}
