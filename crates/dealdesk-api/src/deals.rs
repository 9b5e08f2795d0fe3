//! Handlers for `/deals` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/deals` | Optional `?status=...&assigned_to_user_id=...`, AND semantics |
//! | `POST`   | `/deals` | Full body; 201 + created deal |
//! | `GET`    | `/deals/:id` | 404 if not found |
//! | `PUT`    | `/deals/:id` | Full replace; omitted optionals reset to defaults |
//! | `PATCH`  | `/deals/:id` | Partial update; only supplied fields change |
//! | `DELETE` | `/deals/:id` | 204 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use dealdesk_core::{
  FieldErrors,
  deal::{Deal, DealDraft, DealStatus},
  store::{DealFilter, DealStore},
};
use serde::Deserialize;

use crate::error::ApiError;

fn store_err<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Store(Box::new(e))
}

fn not_found(id: i64) -> ApiError {
  ApiError::NotFound(format!("deal {id} not found"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status:              Option<String>,
  pub assigned_to_user_id: Option<i64>,
}

impl ListParams {
  /// Turn raw query values into a [`DealFilter`].
  ///
  /// An absent or empty `status` is no constraint; a non-empty value outside
  /// the enumeration is a field error rather than an empty result set.
  fn into_filter(self) -> Result<DealFilter, FieldErrors> {
    let status = match self.status.as_deref() {
      None | Some("") => None,
      Some(raw) => match DealStatus::parse(raw) {
        Some(status) => Some(status),
        None => {
          let mut errors = FieldErrors::new();
          errors.push(
            "status",
            format!(
              "Select a valid choice. {raw} is not one of the available choices."
            ),
          );
          return Err(errors);
        }
      },
    };

    Ok(DealFilter {
      status,
      assigned_to_user_id: self.assigned_to_user_id,
    })
  }
}

/// `GET /deals[?status=<status>][&assigned_to_user_id=<id>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Deal>>, ApiError>
where
  S: DealStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let filter = params.into_filter()?;
  let deals = store.list_deals(filter).await.map_err(store_err)?;
  Ok(Json(deals))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /deals` — full payload; returns 201 + the stored deal.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(draft): Json<DealDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DealStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = draft.into_new_deal()?;
  let deal = store.create_deal(input).await.map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(deal)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /deals/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Deal>, ApiError>
where
  S: DealStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deal = store
    .get_deal(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(deal))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /deals/:id` — full replace; validated exactly like create.
pub async fn replace<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(draft): Json<DealDraft>,
) -> Result<Json<Deal>, ApiError>
where
  S: DealStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = draft.into_new_deal()?;
  let deal = store
    .replace_deal(id, input)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(deal))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /deals/:id` — partial update; only supplied fields are validated
/// and applied.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(draft): Json<DealDraft>,
) -> Result<Json<Deal>, ApiError>
where
  S: DealStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let patch = draft.into_patch()?;
  let deal = store
    .patch_deal(id, patch)
    .await
    .map_err(store_err)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(deal))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /deals/:id` — 204 with an empty body.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: DealStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if store.delete_deal(id).await.map_err(store_err)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}
