//! Handlers for `/departments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/departments/:id/coordinator` | Advisory quick-assign suggestion; `null` when the roster has none |

use axum::{
  Json,
  extract::{Path, State},
};
use radicar_core::{directory::Staff, notify::Notifier, store::CaseStore};

use crate::{AppState, actor::ActorContext, error::ApiError};

/// `GET /departments/:id/coordinator`
pub async fn coordinator<S, N>(
  State(state): State<AppState<S, N>>,
  _actor: ActorContext,
  Path(id): Path<String>,
) -> Result<Json<Option<Staff>>, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let staff = state.service.suggest_coordinator(&id)?.cloned();
  Ok(Json(staff))
}
