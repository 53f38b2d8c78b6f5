//! Error types for `marquee-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("subject id must not be empty")]
  EmptySubjectId,

  #[error("event reference must not be empty")]
  EmptyEventRef,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
