//! Relationship records: typed links between a subject and an event.
//!
//! Each variant carries two optional timestamps. Which one is authoritative
//! differs per kind, so every variant exposes an `activity_date` that applies
//! the right preference and fallback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{EventRef, SubjectId};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The three relationship streams.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RelationshipKind {
  Application,
  Invitation,
  Confirmation,
}

impl RelationshipKind {
  /// All kinds in the order the per-subject fetch issues them.
  pub const ALL: [Self; 3] =
    [Self::Application, Self::Invitation, Self::Confirmation];
}

// ─── Variants ────────────────────────────────────────────────────────────────

/// An artist applied to perform at an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
  pub subject_id:          SubjectId,
  pub event_ref:           Option<EventRef>,
  pub applied_at:          Option<DateTime<Utc>>,
  pub entry_date:          Option<DateTime<Utc>>,
  pub message_to_producer: Option<String>,
}

impl Application {
  pub fn activity_date(&self) -> Option<DateTime<Utc>> {
    self.applied_at.or(self.entry_date)
  }
}

/// A producer invited an artist to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
  pub subject_id:            SubjectId,
  pub event_ref:             Option<EventRef>,
  pub entry_date:            Option<DateTime<Utc>>,
  pub created_at:            Option<DateTime<Utc>>,
  pub message_from_producer: Option<String>,
}

impl Invitation {
  pub fn activity_date(&self) -> Option<DateTime<Utc>> {
    self.entry_date.or(self.created_at)
  }
}

/// An artist confirmed participation in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
  pub subject_id:            SubjectId,
  pub event_ref:             Option<EventRef>,
  pub created_at:            Option<DateTime<Utc>>,
  pub entry_date:            Option<DateTime<Utc>>,
  pub message_to_organizers: Option<String>,
}

impl Confirmation {
  pub fn activity_date(&self) -> Option<DateTime<Utc>> {
    self.created_at.or(self.entry_date)
  }
}

// ─── RelationshipRecord ──────────────────────────────────────────────────────

/// One row from any of the three relationship streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationshipRecord {
  Application(Application),
  Invitation(Invitation),
  Confirmation(Confirmation),
}

impl RelationshipRecord {
  pub fn kind(&self) -> RelationshipKind {
    match self {
      Self::Application(_) => RelationshipKind::Application,
      Self::Invitation(_) => RelationshipKind::Invitation,
      Self::Confirmation(_) => RelationshipKind::Confirmation,
    }
  }

  pub fn subject_id(&self) -> &SubjectId {
    match self {
      Self::Application(r) => &r.subject_id,
      Self::Invitation(r) => &r.subject_id,
      Self::Confirmation(r) => &r.subject_id,
    }
  }

  pub fn event_ref(&self) -> Option<&EventRef> {
    match self {
      Self::Application(r) => r.event_ref.as_ref(),
      Self::Invitation(r) => r.event_ref.as_ref(),
      Self::Confirmation(r) => r.event_ref.as_ref(),
    }
  }

  /// The record's preferred timestamp, falling back to its secondary one.
  pub fn activity_date(&self) -> Option<DateTime<Utc>> {
    match self {
      Self::Application(r) => r.activity_date(),
      Self::Invitation(r) => r.activity_date(),
      Self::Confirmation(r) => r.activity_date(),
    }
  }
}

impl From<Application> for RelationshipRecord {
  fn from(r: Application) -> Self { Self::Application(r) }
}

impl From<Invitation> for RelationshipRecord {
  fn from(r: Invitation) -> Self { Self::Invitation(r) }
}

impl From<Confirmation> for RelationshipRecord {
  fn from(r: Confirmation) -> Self { Self::Confirmation(r) }
}
