//! Error type for `dealdesk-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("decimal parse error: {0:?}")]
  DecimalParse(String),

  #[error("unknown status in database: {0:?}")]
  StatusParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
