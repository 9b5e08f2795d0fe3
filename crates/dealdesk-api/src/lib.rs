//! JSON REST API for Dealdesk.
//!
//! Exposes an axum [`Router`] backed by any [`dealdesk_core::store::DealStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", dealdesk_api::api_router(store.clone()))
//! ```

pub mod deals;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::get,
};
use dealdesk_core::store::DealStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DealStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/deals", get(deals::list::<S>).post(deals::create::<S>))
    .route(
      "/deals/{id}",
      get(deals::get_one::<S>)
        .put(deals::replace::<S>)
        .patch(deals::update::<S>)
        .delete(deals::delete::<S>),
    )
    .with_state(store)
}
