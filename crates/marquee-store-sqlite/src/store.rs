//! [`SqliteStore`] — the SQLite implementation of [`ActivitySource`].

use std::path::Path;

use chrono::{DateTime, Utc};
use marquee_core::{
  event::EventSummary,
  id::{EventRef, SubjectId},
  record::{RelationshipKind, RelationshipRecord},
  source::ActivitySource,
};
use tracing::warn;

use crate::{
  Result,
  encode::{RawEvent, RawRecord, encode_opt_dt, encode_record, kind_columns},
  schema::SCHEMA,
};

/// Upper bound on references per `IN (...)` lookup, well below SQLite's
/// host-parameter limit.
const EVENT_BATCH: usize = 500;

const EVENT_SELECT: &str = "
SELECT e.id, e.eid, e.name, e.venue, e.event_start_datetime,
       c.name  AS city,
       co.name AS country
FROM events e
LEFT JOIN cities    c  ON c.id  = e.city_id
LEFT JOIN countries co ON co.id = c.country_id";

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`SqliteStore::add_event`].
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub eid:     EventRef,
  pub name:    Option<String>,
  pub venue:   Option<String>,
  pub start:   Option<DateTime<Utc>>,
  pub city_id: Option<i64>,
}

impl NewEvent {
  pub fn new(eid: EventRef) -> Self {
    Self { eid, name: None, venue: None, start: None, city_id: None }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Marquee activity store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests and throwaway runs.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  pub async fn add_country(&self, name: &str) -> Result<i64> {
    let name = name.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (name) VALUES (?1)",
          rusqlite::params![name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_city(&self, name: &str, country_id: Option<i64>) -> Result<i64> {
    let name = name.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cities (name, country_id) VALUES (?1, ?2)",
          rusqlite::params![name, country_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_event(&self, event: NewEvent) -> Result<i64> {
    let eid       = event.eid.as_str().to_owned();
    let start_str = encode_opt_dt(event.start);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (eid, name, venue, event_start_datetime, city_id)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![eid, event.name, event.venue, start_str, event.city_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  /// Insert `record` into the table of its kind and return the row id.
  pub async fn record_relationship(&self, record: &RelationshipRecord) -> Result<i64> {
    let cols  = kind_columns(record.kind());
    let cells = encode_record(record);
    let sql   = format!(
      "INSERT INTO {} (artist_number, event_eid, {}, {}, {})
       VALUES (?1, ?2, ?3, ?4, ?5)",
      cols.table, cols.primary_at, cols.fallback_at, cols.message
    );

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          &sql,
          rusqlite::params![
            cells.artist_number,
            cells.event_eid,
            cells.primary_at,
            cells.fallback_at,
            cells.message,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  /// Run arbitrary SQL; tests use it to plant rows the typed writers refuse
  /// to produce.
  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn select_records(
    &self,
    kind: RelationshipKind,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<RelationshipRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      raws
        .into_iter()
        .filter_map(|raw| {
          let row_id = raw.id;
          raw
            .into_record(kind)
            .inspect_err(|error| {
              warn!(%kind, row_id, %error, "skipping undecodable relationship row");
            })
            .ok()
        })
        .collect(),
    )
  }
}

// ─── ActivitySource impl ─────────────────────────────────────────────────────

impl ActivitySource for SqliteStore {
  type Error = crate::Error;

  async fn fetch_relationship_records(
    &self,
    kind: RelationshipKind,
    subject_id: &SubjectId,
  ) -> Result<Vec<RelationshipRecord>> {
    let cols = kind_columns(kind);
    let sql = format!(
      "SELECT {} FROM {} WHERE artist_number = ?1 ORDER BY id",
      cols.select_list(),
      cols.table
    );
    let params = vec![rusqlite::types::Value::Text(subject_id.as_str().to_owned())];
    self.select_records(kind, sql, params).await
  }

  async fn fetch_event_summaries(&self, refs: &[EventRef]) -> Result<Vec<EventSummary>> {
    let mut summaries = Vec::with_capacity(refs.len());

    for chunk in refs.chunks(EVENT_BATCH) {
      let placeholders = vec!["?"; chunk.len()].join(", ");
      let sql = format!("{EVENT_SELECT} WHERE e.eid IN ({placeholders})");
      let params: Vec<String> = chunk.iter().map(|r| r.as_str().to_owned()).collect();

      let raws: Vec<RawEvent> = self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map(rusqlite::params_from_iter(params), RawEvent::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?;

      summaries.extend(raws.into_iter().filter_map(|raw| {
        let eid = raw.eid.clone();
        raw
          .into_summary()
          .inspect_err(|error| {
            warn!(%eid, %error, "skipping undecodable event row");
          })
          .ok()
      }));
    }

    Ok(summaries)
  }

  async fn fetch_recent_records(
    &self,
    kind: RelationshipKind,
    limit: usize,
  ) -> Result<Vec<RelationshipRecord>> {
    let cols = kind_columns(kind);
    // Stored timestamps mix RFC 3339 (any offset), `YYYY-MM-DD HH:MM:SS` and
    // bare dates; `julianday` parses all three to a UTC instant.
    let sql = format!(
      "SELECT {} FROM {}
       ORDER BY julianday(COALESCE(NULLIF({p}, ''), NULLIF({f}, ''))) DESC NULLS LAST,
                id DESC
       LIMIT ?1",
      cols.select_list(),
      cols.table,
      p = cols.primary_at,
      f = cols.fallback_at,
    );
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    self
      .select_records(kind, sql, vec![rusqlite::types::Value::Integer(limit)])
      .await
  }
}
