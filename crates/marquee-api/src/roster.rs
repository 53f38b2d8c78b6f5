//! Handler for `GET /roster`.
//!
//! `kinds` is accepted as a comma-separated list, e.g.
//! `?kinds=confirmation,invitation`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use marquee_core::{
  record::RelationshipKind,
  roster::{DEFAULT_ROSTER_LIMIT, RosterEntry, RosterQuery, build_roster},
  source::ActivitySource,
};
use serde::Deserialize;

use crate::error::ApiError;

/// Hard ceiling on `limit`, per kind.
pub const MAX_ROSTER_LIMIT: usize = 500;

#[derive(Debug, Deserialize, Default)]
pub struct RosterParams {
  /// Records taken per kind; defaults to [`DEFAULT_ROSTER_LIMIT`].
  pub limit: Option<usize>,
  /// Comma-separated relationship kinds; defaults to all.
  pub kinds: Option<String>,
}

impl RosterParams {
  fn into_query(self) -> Result<RosterQuery, ApiError> {
    let limit = self.limit.unwrap_or(DEFAULT_ROSTER_LIMIT);
    if limit > MAX_ROSTER_LIMIT {
      return Err(ApiError::BadRequest(format!(
        "limit must be at most {MAX_ROSTER_LIMIT}"
      )));
    }

    let kinds = match self.kinds {
      None => RelationshipKind::ALL.to_vec(),
      Some(list) => list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
          s.parse::<RelationshipKind>()
            .map_err(|_| ApiError::BadRequest(format!("unknown kind: {s:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(RosterQuery { limit, kinds })
  }
}

/// `GET /roster[?limit=...][&kinds=...]`
pub async fn handler<S>(
  State(source): State<Arc<S>>,
  Query(params): Query<RosterParams>,
) -> Result<Json<Vec<RosterEntry>>, ApiError>
where
  S: ActivitySource,
{
  let query = params.into_query()?;
  Ok(Json(build_roster(source.as_ref(), &query).await))
}
