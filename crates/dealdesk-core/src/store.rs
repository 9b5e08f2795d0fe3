//! The `DealStore` trait and list-filter type.
//!
//! The trait is implemented by storage backends (e.g.
//! `dealdesk-store-sqlite`). The API layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::deal::{Deal, DealPatch, DealStatus, NewDeal};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Equality constraints applied by [`DealStore::list_deals`].
///
/// An absent field places no constraint; present fields must match exactly
/// and combine with logical AND. Filtering is read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DealFilter {
  pub status:              Option<DealStatus>,
  pub assigned_to_user_id: Option<i64>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a deal storage backend.
///
/// Every operation reads or writes a single record (or performs one filtered
/// scan) with the backend's atomic single-record semantics. Concurrent writes
/// to the same record are last-writer-wins; no version tokens are kept.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DealStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new deal. The store assigns `id` and sets both
  /// `creation_date` and `last_updated` to the current instant.
  fn create_deal(
    &self,
    input: NewDeal,
  ) -> impl Future<Output = Result<Deal, Self::Error>> + Send + '_;

  /// Retrieve a deal by id. Returns `None` if not found.
  fn get_deal(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Deal>, Self::Error>> + Send + '_;

  /// List deals matching `filter`, ordered by ascending id.
  fn list_deals(
    &self,
    filter: DealFilter,
  ) -> impl Future<Output = Result<Vec<Deal>, Self::Error>> + Send + '_;

  /// Overwrite every caller-writable field of an existing deal and refresh
  /// `last_updated`. `id` and `creation_date` are preserved. Returns `None`
  /// if the id does not resolve.
  fn replace_deal(
    &self,
    id: i64,
    input: NewDeal,
  ) -> impl Future<Output = Result<Option<Deal>, Self::Error>> + Send + '_;

  /// Apply the supplied fields of `patch` to an existing deal and refresh
  /// `last_updated` (even for an empty patch). Returns `None` if the id does
  /// not resolve.
  fn patch_deal(
    &self,
    id: i64,
    patch: DealPatch,
  ) -> impl Future<Output = Result<Option<Deal>, Self::Error>> + Send + '_;

  /// Delete a deal. Returns `false` if the id did not resolve; afterwards the
  /// id is gone for good (ids are never reused).
  fn delete_deal(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
