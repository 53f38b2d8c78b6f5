//! Human-readable time labels.

use chrono::{DateTime, Utc};

/// Coarse "time since" label: whole days, else whole hours, else
/// `"Recently"`. Future instants also read as `"Recently"`.
pub fn format_time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let elapsed = now - then;
  if elapsed.num_days() > 0 {
    format!("{}d ago", elapsed.num_days())
  } else if elapsed.num_hours() > 0 {
    format!("{}h ago", elapsed.num_hours())
  } else {
    "Recently".to_owned()
  }
}
