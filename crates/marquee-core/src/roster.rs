//! Workflow roster: the most recently active artists across all subjects.
//!
//! Each kind contributes its `limit` newest records. Kinds are visited in
//! priority order (confirmation, then invitation, then application) and an
//! artist is listed once, under the first kind that mentions them. The
//! combined list is then ordered by activity date, newest first.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
  id::{EventRef, SubjectId},
  record::{RelationshipKind, RelationshipRecord},
  source::ActivitySource,
};

pub const DEFAULT_ROSTER_LIMIT: usize = 25;

/// One artist's row in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
  pub subject_id:    SubjectId,
  /// The highest-priority stream this artist appeared in.
  pub workflow:      RelationshipKind,
  pub event_ref:     Option<EventRef>,
  pub last_activity: Option<DateTime<Utc>>,
}

/// Parameters for [`build_roster`].
#[derive(Debug, Clone)]
pub struct RosterQuery {
  /// Records taken per kind.
  pub limit: usize,
  /// Kinds to include; others are skipped without querying.
  pub kinds: Vec<RelationshipKind>,
}

impl Default for RosterQuery {
  fn default() -> Self {
    Self {
      limit: DEFAULT_ROSTER_LIMIT,
      kinds: RelationshipKind::ALL.to_vec(),
    }
  }
}

impl RosterQuery {
  fn includes(&self, kind: RelationshipKind) -> bool { self.kinds.contains(&kind) }
}

/// Query the enabled kinds concurrently and assemble the roster. A failed
/// kind is logged and contributes nothing.
pub async fn build_roster<S>(source: &S, query: &RosterQuery) -> Vec<RosterEntry>
where
  S: ActivitySource,
{
  let (confirmations, invitations, applications) = tokio::join!(
    fetch_recent(source, query, RelationshipKind::Confirmation),
    fetch_recent(source, query, RelationshipKind::Invitation),
    fetch_recent(source, query, RelationshipKind::Application),
  );

  assemble_roster(
    [
      (RelationshipKind::Confirmation, confirmations),
      (RelationshipKind::Invitation, invitations),
      (RelationshipKind::Application, applications),
    ],
    query.limit,
  )
}

async fn fetch_recent<S>(
  source: &S,
  query: &RosterQuery,
  kind: RelationshipKind,
) -> Vec<RelationshipRecord>
where
  S: ActivitySource,
{
  if !query.includes(kind) || query.limit == 0 {
    return Vec::new();
  }
  match source.fetch_recent_records(kind, query.limit).await {
    Ok(records) => records,
    Err(error) => {
      warn!(%kind, %error, "recent record fetch failed; omitting from roster");
      Vec::new()
    }
  }
}

/// Pure roster assembly over per-kind record sets given in priority order.
pub fn assemble_roster<I>(sets: I, limit: usize) -> Vec<RosterEntry>
where
  I: IntoIterator<Item = (RelationshipKind, Vec<RelationshipRecord>)>,
{
  let mut seen: HashSet<SubjectId> = HashSet::new();
  let mut roster = Vec::new();

  for (kind, mut records) in sets {
    records.sort_by(|a, b| b.activity_date().cmp(&a.activity_date()));
    for record in records.into_iter().take(limit) {
      if !seen.insert(record.subject_id().clone()) {
        continue;
      }
      roster.push(RosterEntry {
        subject_id:    record.subject_id().clone(),
        workflow:      kind,
        event_ref:     record.event_ref().cloned(),
        last_activity: record.activity_date(),
      });
    }
  }

  roster.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
  roster
}
