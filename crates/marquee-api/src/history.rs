//! Handler for `GET /subjects/{id}/history`.
//!
//! Responds with the subject's [`MergedEventEntry`] timeline, newest first.
//! An unknown subject is not an error: it simply has no history.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use marquee_core::{
  history::{MergedEventEntry, aggregate_history},
  id::SubjectId,
  source::ActivitySource,
};

use crate::error::ApiError;

/// `GET /subjects/{id}/history`. Answers 400 if `id` is blank.
pub async fn handler<S>(
  State(source): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Vec<MergedEventEntry>>, ApiError>
where
  S: ActivitySource,
{
  let subject_id = SubjectId::parse(&raw_id)?;
  let timeline = aggregate_history(source.as_ref(), &subject_id).await;
  Ok(Json(timeline))
}
