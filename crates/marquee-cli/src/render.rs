//! Plain-text rendering of history and roster responses.

use chrono::{DateTime, Utc};
use marquee_core::{
  display::format_time_since,
  event::{EventSummary, LOCATION_TBD},
  history::MergedEventEntry,
  roster::RosterEntry,
};

pub const NO_HISTORY: &str = "No event history found";
pub const NO_ROSTER: &str = "No recent artist activity";

fn day(dt: DateTime<Utc>) -> String { dt.format("%Y-%m-%d").to_string() }

/// One block per event, separated by blank lines.
pub fn render_history(entries: &[MergedEventEntry]) -> String {
  if entries.is_empty() {
    return format!("{NO_HISTORY}\n");
  }

  let blocks: Vec<String> = entries.iter().map(history_block).collect();
  blocks.join("\n")
}

fn history_block(entry: &MergedEventEntry) -> String {
  let location = entry
    .event
    .as_ref()
    .map(EventSummary::location_label)
    .unwrap_or_else(|| LOCATION_TBD.to_owned());

  let mut lines = vec![
    entry.title().to_owned(),
    format!("  {} • {location}", entry.event_ref),
  ];
  if let Some(start) = entry.event.as_ref().and_then(|e| e.start) {
    lines.push(format!("  Event date: {}", day(start)));
  }

  for (label, date) in [
    ("Applied", entry.applied_date),
    ("Invited", entry.invited_date),
    ("Confirmed", entry.confirmed_date),
  ] {
    if let Some(date) = date {
      lines.push(format!("  {label:<10} {}", day(date)));
    }
  }

  // Invitation messages are producer-internal and stay hidden.
  if let Some(msg) = entry
    .application
    .as_ref()
    .and_then(|a| a.message_to_producer.as_deref())
  {
    lines.push(format!("  Application message: {msg}"));
  }
  if let Some(msg) = entry
    .confirmation
    .as_ref()
    .and_then(|c| c.message_to_organizers.as_deref())
  {
    lines.push(format!("  Confirmation message: {msg}"));
  }

  lines.into_iter().map(|line| line + "\n").collect()
}

/// One aligned line per artist.
pub fn render_roster(rows: &[RosterEntry], now: DateTime<Utc>) -> String {
  if rows.is_empty() {
    return format!("{NO_ROSTER}\n");
  }

  rows
    .iter()
    .map(|row| {
      let event = row.event_ref.as_ref().map_or("-", |e| e.as_str());
      let since = row
        .last_activity
        .map(|at| format_time_since(at, now))
        .unwrap_or_default();
      format!(
        "{:<12} {:<13} {:<10} {since}\n",
        row.subject_id,
        row.workflow.to_string(),
        event
      )
    })
    .collect()
}
