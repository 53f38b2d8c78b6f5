//! In-memory [`ActivitySource`] and record builders for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

use crate::{
  event::EventSummary,
  id::{EventRef, SubjectId},
  record::{
    Application, Confirmation, Invitation, RelationshipKind, RelationshipRecord,
  },
  source::ActivitySource,
};

#[derive(Debug, Error)]
#[error("fake source: {0}")]
pub struct FakeError(pub String);

#[derive(Default)]
pub struct FakeSource {
  pub records:       Vec<RelationshipRecord>,
  pub events:        Vec<EventSummary>,
  pub failing_kinds: Vec<RelationshipKind>,
  pub fail_events:   bool,
  pub event_calls:   AtomicUsize,
}

impl FakeSource {
  pub fn with_records(records: Vec<RelationshipRecord>) -> Self {
    Self { records, ..Self::default() }
  }

  pub fn event_calls(&self) -> usize { self.event_calls.load(Ordering::SeqCst) }
}

impl ActivitySource for FakeSource {
  type Error = FakeError;

  async fn fetch_relationship_records(
    &self,
    kind: RelationshipKind,
    subject_id: &SubjectId,
  ) -> Result<Vec<RelationshipRecord>, FakeError> {
    if self.failing_kinds.contains(&kind) {
      return Err(FakeError(format!("{kind} table unavailable")));
    }
    Ok(
      self
        .records
        .iter()
        .filter(|r| r.kind() == kind && r.subject_id() == subject_id)
        .cloned()
        .collect(),
    )
  }

  async fn fetch_event_summaries(
    &self,
    refs: &[EventRef],
  ) -> Result<Vec<EventSummary>, FakeError> {
    self.event_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_events {
      return Err(FakeError("events table unavailable".into()));
    }
    Ok(
      self
        .events
        .iter()
        .filter(|e| refs.contains(&e.eid))
        .cloned()
        .collect(),
    )
  }

  async fn fetch_recent_records(
    &self,
    kind: RelationshipKind,
    limit: usize,
  ) -> Result<Vec<RelationshipRecord>, FakeError> {
    if self.failing_kinds.contains(&kind) {
      return Err(FakeError(format!("{kind} table unavailable")));
    }
    let mut out: Vec<RelationshipRecord> = self
      .records
      .iter()
      .filter(|r| r.kind() == kind)
      .cloned()
      .collect();
    out.sort_by(|a, b| b.activity_date().cmp(&a.activity_date()));
    out.truncate(limit);
    Ok(out)
  }
}

// ─── Builders ────────────────────────────────────────────────────────────────

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn subject(id: &str) -> SubjectId { SubjectId::parse(id).unwrap() }

pub fn eid(code: &str) -> EventRef { EventRef::parse(code).unwrap() }

pub fn application(
  who: &str,
  event: Option<&str>,
  at: Option<DateTime<Utc>>,
) -> RelationshipRecord {
  Application {
    subject_id:          subject(who),
    event_ref:           event.map(eid),
    applied_at:          at,
    entry_date:          None,
    message_to_producer: Some(format!("application from {who}")),
  }
  .into()
}

pub fn invitation(
  who: &str,
  event: Option<&str>,
  at: Option<DateTime<Utc>>,
) -> RelationshipRecord {
  Invitation {
    subject_id:            subject(who),
    event_ref:             event.map(eid),
    entry_date:            at,
    created_at:            None,
    message_from_producer: None,
  }
  .into()
}

pub fn confirmation(
  who: &str,
  event: Option<&str>,
  at: Option<DateTime<Utc>>,
) -> RelationshipRecord {
  Confirmation {
    subject_id:            subject(who),
    event_ref:             event.map(eid),
    created_at:            at,
    entry_date:            None,
    message_to_organizers: Some("see you there".into()),
  }
  .into()
}

pub fn event_summary(code: &str, name: &str) -> EventSummary {
  EventSummary {
    id:      0,
    eid:     eid(code),
    name:    Some(name.into()),
    venue:   None,
    start:   None,
    city:    Some("Toronto".into()),
    country: Some("Canada".into()),
  }
}
