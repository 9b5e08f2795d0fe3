//! [`SqliteStore`] — the SQLite implementation of [`DealStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use dealdesk_core::{
  deal::{Deal, DealPatch, NewDeal},
  store::{DealFilter, DealStore},
};

use crate::{
  Error, Result,
  encode::{RawDeal, decode_dt, encode_dt, encode_status, encode_value},
  schema::SCHEMA,
};

const COLUMNS: &str =
  "id, name, description, status, assigned_to_user_id, value, creation_date, last_updated";

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawDeal> {
  Ok(RawDeal {
    id:                  row.get(0)?,
    name:                row.get(1)?,
    description:         row.get(2)?,
    status:              row.get(3)?,
    assigned_to_user_id: row.get(4)?,
    value:               row.get(5)?,
    creation_date:       row.get(6)?,
    last_updated:        row.get(7)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A deal store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements execute serially on the connection's dedicated thread, so each
/// operation has atomic single-record semantics.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Overwrite every caller-writable column of `id` and stamp
  /// `last_updated`. Returns `false` if the row is gone.
  async fn write_fields(
    &self,
    id: i64,
    input: &NewDeal,
    last_updated: String,
  ) -> Result<bool> {
    let name        = input.name.clone();
    let description = input.description.clone();
    let status      = encode_status(input.status).to_owned();
    let user_id     = input.assigned_to_user_id;
    let value       = encode_value(input.value);

    let affected = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "UPDATE deals
           SET name = ?1, description = ?2, status = ?3,
               assigned_to_user_id = ?4, value = ?5, last_updated = ?6
           WHERE id = ?7",
          rusqlite::params![
            name,
            description,
            status,
            user_id,
            value,
            last_updated,
            id,
          ],
        )?;
        Ok(affected)
      })
      .await?;

    Ok(affected > 0)
  }
}

// ─── DealStore impl ──────────────────────────────────────────────────────────

impl DealStore for SqliteStore {
  type Error = Error;

  async fn create_deal(&self, input: NewDeal) -> Result<Deal> {
    let now = Utc::now();

    let name        = input.name.clone();
    let description = input.description.clone();
    let status      = encode_status(input.status).to_owned();
    let user_id     = input.assigned_to_user_id;
    let value       = encode_value(input.value);
    let at_str      = encode_dt(now);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO deals
             (name, description, status, assigned_to_user_id, value,
              creation_date, last_updated)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![name, description, status, user_id, value, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Deal {
      id,
      name:                input.name,
      description:         input.description,
      status:              input.status,
      assigned_to_user_id: input.assigned_to_user_id,
      value:               input.value,
      creation_date:       now,
      last_updated:        now,
    })
  }

  async fn get_deal(&self, id: i64) -> Result<Option<Deal>> {
    let raw: Option<RawDeal> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM deals WHERE id = ?1"),
              rusqlite::params![id],
              row_to_raw,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDeal::into_deal).transpose()
  }

  async fn list_deals(&self, filter: DealFilter) -> Result<Vec<Deal>> {
    use rusqlite::types::Value;

    let mut clauses = Vec::new();
    let mut params: Vec<Value> = Vec::new();
    if let Some(status) = filter.status {
      params.push(Value::Text(encode_status(status).to_owned()));
      clauses.push(format!("status = ?{}", params.len()));
    }
    if let Some(user_id) = filter.assigned_to_user_id {
      params.push(Value::Integer(user_id));
      clauses.push(format!("assigned_to_user_id = ?{}", params.len()));
    }

    let sql = if clauses.is_empty() {
      format!("SELECT {COLUMNS} FROM deals ORDER BY id")
    } else {
      format!(
        "SELECT {COLUMNS} FROM deals WHERE {} ORDER BY id",
        clauses.join(" AND ")
      )
    };

    let raws: Vec<RawDeal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), row_to_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDeal::into_deal).collect()
  }

  async fn replace_deal(&self, id: i64, input: NewDeal) -> Result<Option<Deal>> {
    let created: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT creation_date FROM deals WHERE id = ?1",
              rusqlite::params![id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    let Some(created) = created else {
      return Ok(None);
    };
    let creation_date = decode_dt(&created)?;

    let now = Utc::now();
    if !self.write_fields(id, &input, encode_dt(now)).await? {
      // Deleted between the read and the write; treat as not found.
      return Ok(None);
    }

    Ok(Some(Deal {
      id,
      name:                input.name,
      description:         input.description,
      status:              input.status,
      assigned_to_user_id: input.assigned_to_user_id,
      value:               input.value,
      creation_date,
      last_updated:        now,
    }))
  }

  async fn patch_deal(&self, id: i64, patch: DealPatch) -> Result<Option<Deal>> {
    let Some(existing) = self.get_deal(id).await? else {
      return Ok(None);
    };

    let merged = NewDeal {
      name:                patch.name.unwrap_or(existing.name),
      description:         patch.description.unwrap_or(existing.description),
      status:              patch.status.unwrap_or(existing.status),
      assigned_to_user_id: patch
        .assigned_to_user_id
        .unwrap_or(existing.assigned_to_user_id),
      value:               patch.value.unwrap_or(existing.value),
    };

    let now = Utc::now();
    if !self.write_fields(id, &merged, encode_dt(now)).await? {
      return Ok(None);
    }

    Ok(Some(Deal {
      id,
      name:                merged.name,
      description:         merged.description,
      status:              merged.status,
      assigned_to_user_id: merged.assigned_to_user_id,
      value:               merged.value,
      creation_date:       existing.creation_date,
      last_updated:        now,
    }))
  }

  async fn delete_deal(&self, id: i64) -> Result<bool> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM deals WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(affected > 0)
  }
}
