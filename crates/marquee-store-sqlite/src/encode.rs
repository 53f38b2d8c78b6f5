//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are written as RFC 3339 strings. Reads are lenient because
//! imported rows also carry `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`
//! values; those are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use marquee_core::{
  event::EventSummary,
  id::{EventRef, SubjectId},
  record::{
    Application, Confirmation, Invitation, RelationshipKind, RelationshipRecord,
  },
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_opt_dt(dt: Option<DateTime<Utc>>) -> Option<String> {
  dt.map(encode_dt)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
    return Ok(naive.and_utc());
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// `NULL` and blank cells are both "no timestamp".
pub fn decode_opt_dt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(str::trim)
    .filter(|s| !s.is_empty())
    .map(decode_dt)
    .transpose()
}

// ─── Relationship tables ─────────────────────────────────────────────────────

/// Where a relationship kind lives and which of its columns play which role.
pub struct KindColumns {
  pub table:       &'static str,
  /// The preferred activity timestamp.
  pub primary_at:  &'static str,
  pub fallback_at: &'static str,
  pub message:     &'static str,
}

pub fn kind_columns(kind: RelationshipKind) -> KindColumns {
  match kind {
    RelationshipKind::Application => KindColumns {
      table:       "artist_applications",
      primary_at:  "applied_at",
      fallback_at: "entry_date",
      message:     "message_to_producer",
    },
    RelationshipKind::Invitation => KindColumns {
      table:       "artist_invitations",
      primary_at:  "entry_date",
      fallback_at: "created_at",
      message:     "message_from_producer",
    },
    RelationshipKind::Confirmation => KindColumns {
      table:       "artist_confirmations",
      primary_at:  "created_at",
      fallback_at: "entry_date",
      message:     "message_to_organizers",
    },
  }
}

impl KindColumns {
  /// Column list matching [`RawRecord`]'s field order.
  pub fn select_list(&self) -> String {
    format!(
      "id, artist_number, event_eid, {}, {}, {}",
      self.primary_at, self.fallback_at, self.message
    )
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw cells read from any relationship table, in role order.
pub struct RawRecord {
  pub id:            i64,
  pub artist_number: String,
  pub event_eid:     Option<String>,
  pub primary_at:    Option<String>,
  pub fallback_at:   Option<String>,
  pub message:       Option<String>,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      artist_number: row.get(1)?,
      event_eid:     row.get(2)?,
      primary_at:    row.get(3)?,
      fallback_at:   row.get(4)?,
      message:       row.get(5)?,
    })
  }

  pub fn into_record(self, kind: RelationshipKind) -> Result<RelationshipRecord> {
    let subject_id = SubjectId::parse(&self.artist_number)?;
    let event_ref = EventRef::from_column(self.event_eid);
    let primary = decode_opt_dt(self.primary_at.as_deref())?;
    let fallback = decode_opt_dt(self.fallback_at.as_deref())?;

    Ok(match kind {
      RelationshipKind::Application => Application {
        subject_id,
        event_ref,
        applied_at: primary,
        entry_date: fallback,
        message_to_producer: self.message,
      }
      .into(),
      RelationshipKind::Invitation => Invitation {
        subject_id,
        event_ref,
        entry_date: primary,
        created_at: fallback,
        message_from_producer: self.message,
      }
      .into(),
      RelationshipKind::Confirmation => Confirmation {
        subject_id,
        event_ref,
        created_at: primary,
        entry_date: fallback,
        message_to_organizers: self.message,
      }
      .into(),
    })
  }
}

/// Split a record into the cells [`kind_columns`] names, in the same order
/// as [`RawRecord`].
pub struct RecordCells {
  pub artist_number: String,
  pub event_eid:     Option<String>,
  pub primary_at:    Option<String>,
  pub fallback_at:   Option<String>,
  pub message:       Option<String>,
}

pub fn encode_record(record: &RelationshipRecord) -> RecordCells {
  let event_eid = record.event_ref().map(|e| e.as_str().to_owned());
  let artist_number = record.subject_id().as_str().to_owned();
  match record {
    RelationshipRecord::Application(r) => RecordCells {
      artist_number,
      event_eid,
      primary_at: encode_opt_dt(r.applied_at),
      fallback_at: encode_opt_dt(r.entry_date),
      message: r.message_to_producer.clone(),
    },
    RelationshipRecord::Invitation(r) => RecordCells {
      artist_number,
      event_eid,
      primary_at: encode_opt_dt(r.entry_date),
      fallback_at: encode_opt_dt(r.created_at),
      message: r.message_from_producer.clone(),
    },
    RelationshipRecord::Confirmation(r) => RecordCells {
      artist_number,
      event_eid,
      primary_at: encode_opt_dt(r.created_at),
      fallback_at: encode_opt_dt(r.entry_date),
      message: r.message_to_organizers.clone(),
    },
  }
}

/// Raw cells of an `events` row joined with its city and country.
pub struct RawEvent {
  pub id:      i64,
  pub eid:     String,
  pub name:    Option<String>,
  pub venue:   Option<String>,
  pub start:   Option<String>,
  pub city:    Option<String>,
  pub country: Option<String>,
}

impl RawEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:      row.get(0)?,
      eid:     row.get(1)?,
      name:    row.get(2)?,
      venue:   row.get(3)?,
      start:   row.get(4)?,
      city:    row.get(5)?,
      country: row.get(6)?,
    })
  }

  pub fn into_summary(self) -> Result<EventSummary> {
    Ok(EventSummary {
      id:      self.id,
      eid:     EventRef::parse(&self.eid)?,
      name:    self.name,
      venue:   self.venue,
      start:   decode_opt_dt(self.start.as_deref())?,
      city:    self.city,
      country: self.country,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn decodes_supported_timestamp_shapes() {
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap();
    assert_eq!(decode_dt("2024-03-01T18:30:00+00:00").unwrap(), expected);
    assert_eq!(decode_dt("2024-03-01T13:30:00-05:00").unwrap(), expected);
    assert_eq!(decode_dt("2024-03-01 18:30:00").unwrap(), expected);
    assert_eq!(
      decode_dt("2024-03-01").unwrap(),
      Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    );
  }

  #[test]
  fn blank_timestamp_is_absent() {
    assert_eq!(decode_opt_dt(Some("  ")).unwrap(), None);
    assert_eq!(decode_opt_dt(None).unwrap(), None);
    assert!(matches!(decode_opt_dt(Some("soon")), Err(Error::DateParse(_))));
  }
}
