//! Opaque identifiers for subjects and events.
//!
//! Both are stored as trimmed strings. The backend owns their format (an
//! artist number may be numeric or a UUID, an event code looks like
//! `AB3041`); this crate only compares them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── SubjectId ───────────────────────────────────────────────────────────────

/// The artist (or person) whose activity is being aggregated.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
  /// Parse a subject id from user input. Blank input is rejected so callers
  /// never start an aggregation without a subject.
  pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
    let trimmed = raw.as_ref().trim();
    if trimmed.is_empty() {
      return Err(Error::EmptySubjectId);
    }
    Ok(Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for SubjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for SubjectId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

// ─── EventRef ────────────────────────────────────────────────────────────────

/// The code used to key relationship records to a specific event.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventRef(String);

impl EventRef {
  pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
    let trimmed = raw.as_ref().trim();
    if trimmed.is_empty() {
      return Err(Error::EmptyEventRef);
    }
    Ok(Self(trimmed.to_owned()))
  }

  /// Read a nullable reference column. `NULL` and blank strings both mean
  /// "no event".
  pub fn from_column(raw: Option<String>) -> Option<Self> {
    raw.and_then(|s| Self::parse(s).ok())
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EventRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for EventRef {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}
