//! [`MergedEventEntry`] — one event in a subject's activity timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  event::EventSummary,
  id::EventRef,
  record::{Application, Confirmation, Invitation, RelationshipRecord},
};

/// Everything a subject did around one event. Never stored; rebuilt on every
/// aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEventEntry {
  pub event_ref:      EventRef,
  /// `None` when the event could not be resolved.
  pub event:          Option<EventSummary>,
  pub application:    Option<Application>,
  pub invitation:     Option<Invitation>,
  pub confirmation:   Option<Confirmation>,
  pub applied_date:   Option<DateTime<Utc>>,
  pub invited_date:   Option<DateTime<Utc>>,
  pub confirmed_date: Option<DateTime<Utc>>,
  /// Latest of the three dates; the Unix epoch when none is present.
  pub last_activity:  DateTime<Utc>,
}

impl MergedEventEntry {
  pub fn new(event_ref: EventRef) -> Self {
    Self {
      event_ref,
      event: None,
      application: None,
      invitation: None,
      confirmation: None,
      applied_date: None,
      invited_date: None,
      confirmed_date: None,
      last_activity: DateTime::<Utc>::UNIX_EPOCH,
    }
  }

  /// Put `record` into its slot. An occupied slot is only replaced by a
  /// record with a strictly later activity date.
  pub fn attach(&mut self, record: RelationshipRecord) {
    let date = record.activity_date();
    match record {
      RelationshipRecord::Application(app) => {
        if replaces(self.application.is_some(), self.applied_date, date) {
          self.application = Some(app);
          self.applied_date = date;
        }
      }
      RelationshipRecord::Invitation(inv) => {
        if replaces(self.invitation.is_some(), self.invited_date, date) {
          self.invitation = Some(inv);
          self.invited_date = date;
        }
      }
      RelationshipRecord::Confirmation(conf) => {
        if replaces(self.confirmation.is_some(), self.confirmed_date, date) {
          self.confirmation = Some(conf);
          self.confirmed_date = date;
        }
      }
    }
  }

  /// Max of the applied, invited and confirmed dates, absent dates counting
  /// as the epoch.
  pub fn compute_last_activity(&self) -> DateTime<Utc> {
    [self.applied_date, self.invited_date, self.confirmed_date]
      .into_iter()
      .flatten()
      .fold(DateTime::<Utc>::UNIX_EPOCH, |latest, date| latest.max(date))
  }

  /// Event name if resolved, otherwise the raw reference.
  pub fn title(&self) -> &str {
    self
      .event
      .as_ref()
      .and_then(|e| e.name.as_deref())
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .unwrap_or(self.event_ref.as_str())
  }
}

fn replaces(
  occupied: bool,
  current: Option<DateTime<Utc>>,
  candidate: Option<DateTime<Utc>>,
) -> bool {
  !occupied || candidate > current
}
