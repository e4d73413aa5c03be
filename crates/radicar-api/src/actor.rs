//! Actor-context extractor.
//!
//! Every request names who is acting through the `x-actor-id` header and
//! the id is resolved against the staff roster before any handler runs.
//! Session mechanics (login, tokens) live in the fronting identity proxy;
//! this server trusts the header it is handed.

use axum::{extract::FromRequestParts, http::request::Parts};
use radicar_core::{actor::Actor, notify::Notifier, store::CaseStore};

use crate::{AppState, error::ApiError};

pub const ACTOR_HEADER: &str = "x-actor-id";

/// The resolved caller, ready for policy checks.
pub struct ActorContext(pub Actor);

impl<S, N> FromRequestParts<AppState<S, N>> for ActorContext
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, N>,
  ) -> Result<Self, Self::Rejection> {
    let staff_id = parts
      .headers
      .get(ACTOR_HEADER)
      .and_then(|value| value.to_str().ok())
      .ok_or(ApiError::Unauthorized)?;
    let staff = state
      .directory
      .staff(staff_id)
      .ok_or(ApiError::Unauthorized)?;
    Ok(Self(staff.actor()))
  }
}
