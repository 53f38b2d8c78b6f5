//! Record fetcher: the concurrent fan-out over the three relationship
//! streams.

use tracing::warn;

use crate::{
  id::SubjectId,
  record::{RelationshipKind, RelationshipRecord},
  source::ActivitySource,
};

/// The outcome of each sub-fetch, kept separate so one failure cannot hide
/// the others.
#[derive(Debug)]
pub struct FetchedRecords<E> {
  pub applications:  Result<Vec<RelationshipRecord>, E>,
  pub invitations:   Result<Vec<RelationshipRecord>, E>,
  pub confirmations: Result<Vec<RelationshipRecord>, E>,
}

/// Issue all three queries for `subject_id` and wait for every one of them
/// to settle.
pub async fn fetch_records<S>(
  source: &S,
  subject_id: &SubjectId,
) -> FetchedRecords<S::Error>
where
  S: ActivitySource,
{
  let (applications, invitations, confirmations) = tokio::join!(
    source.fetch_relationship_records(RelationshipKind::Application, subject_id),
    source.fetch_relationship_records(RelationshipKind::Invitation, subject_id),
    source.fetch_relationship_records(RelationshipKind::Confirmation, subject_id),
  );

  FetchedRecords { applications, invitations, confirmations }
}

impl<E: std::error::Error> FetchedRecords<E> {
  /// Kinds whose query failed.
  pub fn failed_kinds(&self) -> Vec<RelationshipKind> {
    let mut failed = Vec::new();
    if self.applications.is_err() {
      failed.push(RelationshipKind::Application);
    }
    if self.invitations.is_err() {
      failed.push(RelationshipKind::Invitation);
    }
    if self.confirmations.is_err() {
      failed.push(RelationshipKind::Confirmation);
    }
    failed
  }

  /// Flatten the successful sets. A failed set is logged and contributes
  /// nothing.
  pub fn into_successful(self, subject_id: &SubjectId) -> Vec<RelationshipRecord> {
    [
      (RelationshipKind::Application, self.applications),
      (RelationshipKind::Invitation, self.invitations),
      (RelationshipKind::Confirmation, self.confirmations),
    ]
    .into_iter()
    .flat_map(|(kind, result)| match result {
      Ok(records) => records,
      Err(error) => {
        warn!(
          %subject_id,
          %kind,
          %error,
          "relationship fetch failed; treating as empty"
        );
        Vec::new()
      }
    })
    .collect()
  }
}
