//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, statuses as their lowercase
//! wire names, and monetary values as exact decimal strings.

use chrono::{DateTime, Utc};
use dealdesk_core::deal::{Deal, DealStatus};
use rust_decimal::Decimal;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── DealStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(status: DealStatus) -> &'static str { status.as_str() }

pub fn decode_status(s: &str) -> Result<DealStatus> {
  DealStatus::parse(s).ok_or_else(|| Error::StatusParse(s.to_owned()))
}

// ─── Decimal ─────────────────────────────────────────────────────────────────

pub fn encode_value(value: Decimal) -> String { value.to_string() }

pub fn decode_value(s: &str) -> Result<Decimal> {
  s.parse().map_err(|_| Error::DecimalParse(s.to_owned()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw column values read directly from a `deals` row.
pub struct RawDeal {
  pub id:                  i64,
  pub name:                String,
  pub description:         String,
  pub status:              String,
  pub assigned_to_user_id: i64,
  pub value:               String,
  pub creation_date:       String,
  pub last_updated:        String,
}

impl RawDeal {
  pub fn into_deal(self) -> Result<Deal> {
    Ok(Deal {
      id:                  self.id,
      name:                self.name,
      description:         self.description,
      status:              decode_status(&self.status)?,
      assigned_to_user_id: self.assigned_to_user_id,
      value:               decode_value(&self.value)?,
      creation_date:       decode_dt(&self.creation_date)?,
      last_updated:        decode_dt(&self.last_updated)?,
    })
  }
}
