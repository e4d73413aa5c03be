//! The `CaseStore` trait — the repository seam over case records.
//!
//! The trait is implemented by storage backends (e.g.
//! `radicar-store-sqlite`). The engine depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::case::Case;

/// Abstraction over a case repository backend.
///
/// The visible collection is ordered most-recent-first: newly inserted
/// cases come back at the head of `get_all`, and `replace` keeps a case in
/// its original position.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CaseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All cases, most recently inserted first.
  fn get_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// Retrieve a case by id. Returns `None` if not found.
  fn get(
    &self,
    case_id: Uuid,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// Persist a new case and return it.
  fn insert(
    &self,
    case: Case,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Replace the stored record for `case_id` wholesale, keeping its
  /// position in the collection. Returns `None` if no such case exists.
  fn replace(
    &self,
    case_id: Uuid,
    case: Case,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// Atomically take the next value of the repository-owned counter that
  /// numbers tracking codes. Values start at 1 and never repeat, including
  /// across restarts.
  fn allocate_sequence(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
