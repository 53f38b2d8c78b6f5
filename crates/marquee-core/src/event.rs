//! Denormalized event metadata used to label history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EventRef;

/// Placeholder shown when neither a city/country pair nor a venue is known.
pub const LOCATION_TBD: &str = "Location TBD";

/// Read-only projection of an event row joined with its city and country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
  pub id:      i64,
  pub eid:     EventRef,
  pub name:    Option<String>,
  pub venue:   Option<String>,
  pub start:   Option<DateTime<Utc>>,
  pub city:    Option<String>,
  pub country: Option<String>,
}

impl EventSummary {
  /// `"City, Country"` when both are known, otherwise the venue, otherwise
  /// [`LOCATION_TBD`].
  pub fn location_label(&self) -> String {
    match (non_blank(&self.city), non_blank(&self.country)) {
      (Some(city), Some(country)) => format!("{city}, {country}"),
      _ => non_blank(&self.venue).unwrap_or(LOCATION_TBD).to_owned(),
    }
  }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
