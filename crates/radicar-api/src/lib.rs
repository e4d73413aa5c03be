//! JSON HTTP surface for the radicar case tracker.
//!
//! Exposes an axum [`Router`] over a [`CaseService`] backed by any
//! [`CaseStore`] and [`Notifier`]. Every route requires an `x-actor-id`
//! header naming a roster member; what that actor may then do is the
//! engine's decision, surfaced here as one status code per failure
//! family.

pub mod actor;
pub mod cases;
pub mod departments;
pub mod error;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use radicar_core::{
  directory::{CaseType, Department, Directory, Staff},
  notify::Notifier,
  store::CaseStore,
};
use radicar_engine::CaseService;
use serde::Deserialize;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
///
/// The reference data — departments, case types, the staff roster — lives
/// here too: it changes at configuration time, not at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  #[serde(default)]
  pub departments: Vec<Department>,
  #[serde(default)]
  pub case_types:  Vec<CaseType>,
  #[serde(default)]
  pub staff:       Vec<Staff>,
}

impl ServerConfig {
  /// The in-memory reference directory the engine consults.
  pub fn directory(&self) -> Directory {
    Directory::new(
      self.departments.clone(),
      self.case_types.clone(),
      self.staff.clone(),
    )
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: CaseStore, N: Notifier> {
  pub service:   Arc<CaseService<S, N>>,
  pub directory: Arc<Directory>,
}

impl<S: CaseStore, N: Notifier> Clone for AppState<S, N> {
  fn clone(&self) -> Self {
    Self {
      service:   Arc::clone(&self.service),
      directory: Arc::clone(&self.directory),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the tracker API.
pub fn router<S, N>(state: AppState<S, N>) -> Router
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  Router::new()
    .route(
      "/cases",
      get(cases::list::<S, N>).post(cases::create::<S, N>),
    )
    .route(
      "/cases/{id}",
      get(cases::get_one::<S, N>).patch(cases::update::<S, N>),
    )
    .route("/cases/{id}/department", post(cases::assign_department::<S, N>))
    .route("/cases/{id}/technician", post(cases::assign_technician::<S, N>))
    .route("/cases/{id}/visit", post(cases::submit_visit::<S, N>))
    .route(
      "/departments/{id}/coordinator",
      get(departments::coordinator::<S, N>),
    )
    .with_state(state)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
