//! Handlers for `/cases` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/cases` | Optional `status`, `department`, `technician`, `text`, `limit` filters |
//! | `POST`  | `/cases` | Body: [`NewCase`]; 201 with the stored case |
//! | `GET`   | `/cases/:id` | The case plus its display status |
//! | `PATCH` | `/cases/:id` | Body: [`CasePatch`]; admin only |
//! | `POST`  | `/cases/:id/department` | Body: [`AssignDepartment`] |
//! | `POST`  | `/cases/:id/technician` | Body: `{"technician": "usr-6"}`, `null` to clear |
//! | `POST`  | `/cases/:id/visit` | Body: [`NewVisit`] |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use radicar_core::{
  case::Case,
  lifecycle::CaseView,
  notify::Notifier,
  store::CaseStore,
};
use radicar_engine::request::{AssignDepartment, CasePatch, CaseQuery, NewCase, NewVisit};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, actor::ActorContext, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /cases[?status=…&department=…&technician=…&text=…&limit=…]`
pub async fn list<S, N>(
  State(state): State<AppState<S, N>>,
  _actor: ActorContext,
  Query(query): Query<CaseQuery>,
) -> Result<Json<Vec<CaseView>>, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let views = state.service.list_cases(&query).await?;
  Ok(Json(views))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /cases`
pub async fn create<S, N>(
  State(state): State<AppState<S, N>>,
  ActorContext(actor): ActorContext,
  Json(body): Json<NewCase>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let case = state.service.create_case(body, &actor).await?;
  Ok((StatusCode::CREATED, Json(case)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /cases/:id`
pub async fn get_one<S, N>(
  State(state): State<AppState<S, N>>,
  _actor: ActorContext,
  Path(id): Path<Uuid>,
) -> Result<Json<CaseView>, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let view = state.service.get_case(id).await?;
  Ok(Json(view))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PATCH /cases/:id` — admin full edit; absent fields stay untouched.
pub async fn update<S, N>(
  State(state): State<AppState<S, N>>,
  ActorContext(actor): ActorContext,
  Path(id): Path<Uuid>,
  Json(patch): Json<CasePatch>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let case = state.service.update_case(id, patch, &actor).await?;
  Ok(Json(case))
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// `POST /cases/:id/department`
pub async fn assign_department<S, N>(
  State(state): State<AppState<S, N>>,
  ActorContext(actor): ActorContext,
  Path(id): Path<Uuid>,
  Json(body): Json<AssignDepartment>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let case = state.service.assign_to_department(id, body, &actor).await?;
  Ok(Json(case))
}

#[derive(Debug, Deserialize)]
pub struct TechnicianBody {
  pub technician: Option<String>,
}

/// `POST /cases/:id/technician` — `{"technician": null}` drops the case
/// back to the assignment queue.
pub async fn assign_technician<S, N>(
  State(state): State<AppState<S, N>>,
  ActorContext(actor): ActorContext,
  Path(id): Path<Uuid>,
  Json(body): Json<TechnicianBody>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let case = state
    .service
    .assign_technician(id, body.technician.as_deref(), &actor)
    .await?;
  Ok(Json(case))
}

// ─── Visit ───────────────────────────────────────────────────────────────────

/// `POST /cases/:id/visit`
pub async fn submit_visit<S, N>(
  State(state): State<AppState<S, N>>,
  ActorContext(actor): ActorContext,
  Path(id): Path<Uuid>,
  Json(body): Json<NewVisit>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore + 'static,
  N: Notifier + 'static,
{
  let case = state.service.submit_visit_record(id, body, &actor).await?;
  Ok(Json(case))
}
