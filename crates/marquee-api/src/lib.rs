//! JSON REST API for Marquee.
//!
//! Exposes an axum [`Router`] backed by any
//! [`marquee_core::source::ActivitySource`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subjects/{id}/history` | Activity timeline, newest first |
//! | `GET`  | `/roster` | Optional `limit`, `kinds` |
//! | `GET`  | `/health` | Liveness probe |

pub mod error;
pub mod history;
pub mod roster;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use marquee_core::source::ActivitySource;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `source`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(source: Arc<S>) -> Router<()>
where
  S: ActivitySource + 'static,
{
  Router::new()
    .route("/subjects/{id}/history", get(history::handler::<S>))
    .route("/roster", get(roster::handler::<S>))
    .route("/health", get(health))
    .with_state(source)
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }
