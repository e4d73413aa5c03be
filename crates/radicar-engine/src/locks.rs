//! Per-case write serialisation.
//!
//! Every mutating command holds its case's lock across the whole
//! read-modify-write round trip, so two concurrent commands on the same
//! case cannot interleave between load and persist. Reads never lock.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// A map of per-case async mutexes, created on first use.
///
/// Entries live for the life of the service; the map grows with the set of
/// cases ever written, which the store bounds anyway.
#[derive(Default)]
pub(crate) struct CaseLocks {
  inner: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl CaseLocks {
  /// Take the write lock for `case_id`.
  pub(crate) async fn acquire(&self, case_id: Uuid) -> OwnedMutexGuard<()> {
    let lock = {
      let mut map = self.inner.lock().await;
      Arc::clone(map.entry(case_id).or_default())
    };
    lock.lock_owned().await
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use tokio::time::timeout;

  use super::*;

  #[tokio::test]
  async fn same_case_is_serialised() {
    let locks = CaseLocks::default();
    let case_id = Uuid::new_v4();

    let guard = locks.acquire(case_id).await;
    let blocked = timeout(Duration::from_millis(20), locks.acquire(case_id)).await;
    assert!(blocked.is_err(), "second acquire should block");

    drop(guard);
    let reacquired = timeout(Duration::from_millis(20), locks.acquire(case_id)).await;
    assert!(reacquired.is_ok());
  }

  #[tokio::test]
  async fn different_cases_do_not_contend() {
    let locks = CaseLocks::default();

    let _held = locks.acquire(Uuid::new_v4()).await;
    let other = timeout(Duration::from_millis(20), locks.acquire(Uuid::new_v4())).await;
    assert!(other.is_ok());
  }
}
