//! [`CaseService`] — the command and query surface of the tracker.
//!
//! Every mutating command runs the same gauntlet, in an order callers can
//! observe through the error they get back: load the case, authorise the
//! actor, check the transition table, validate the input, then mutate,
//! persist and fire side effects. An actor without permission learns
//! nothing about the validity of their payload.

use std::sync::Arc;

use chrono::Utc;
use radicar_core::{
  Error, Result,
  actor::Actor,
  case::{self, Case},
  deadline,
  directory::{Directory, Staff},
  lifecycle::{self, CaseEvent, CaseStatus, CaseView},
  notify::Notifier,
  policy,
  store::CaseStore,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
  dispatch,
  locks::CaseLocks,
  request::{AssignDepartment, CasePatch, CaseQuery, NewCase, NewVisit},
};

/// The tracker's single entry point, generic over storage and the
/// notification gateway.
pub struct CaseService<S, N> {
  store:     Arc<S>,
  notifier:  Arc<N>,
  directory: Arc<Directory>,
  locks:     CaseLocks,
}

impl<S, N> CaseService<S, N>
where
  S: CaseStore,
  N: Notifier + 'static,
{
  pub fn new(store: Arc<S>, notifier: Arc<N>, directory: Arc<Directory>) -> Self {
    Self { store, notifier, directory, locks: CaseLocks::default() }
  }

  // ─── Queries ───────────────────────────────────────────────────────────────

  /// A single case with its display status resolved against now.
  pub async fn get_case(&self, case_id: Uuid) -> Result<CaseView> {
    let case = self.load(case_id).await?;
    Ok(CaseView::resolve(case, Utc::now()))
  }

  /// Cases matching `query`, most recently filed first. All views share
  /// one resolution instant so a listing is internally consistent.
  pub async fn list_cases(&self, query: &CaseQuery) -> Result<Vec<CaseView>> {
    let now = Utc::now();
    let mut views: Vec<CaseView> = self
      .store
      .get_all()
      .await
      .map_err(Error::storage)?
      .into_iter()
      .map(|case| CaseView::resolve(case, now))
      .filter(|view| query.matches(view))
      .collect();
    if let Some(limit) = query.limit {
      views.truncate(limit);
    }
    Ok(views)
  }

  /// Advisory quick-assign lookup: who would coordinate a case routed to
  /// `department_id`. Touches no case.
  pub fn suggest_coordinator(&self, department_id: &str) -> Result<Option<&Staff>> {
    if self.directory.department(department_id).is_none() {
      return Err(Error::UnknownDepartment(department_id.to_owned()));
    }
    Ok(self.directory.coordinator_for(department_id))
  }

  // ─── Commands ──────────────────────────────────────────────────────────────

  /// Open a case. Anyone may file an unrouted case; pre-assigning a
  /// department (and optionally a technician) at intake is admin-only.
  pub async fn create_case(&self, input: NewCase, actor: &Actor) -> Result<Case> {
    if !policy::can_create_case(actor, input.department.is_some()) {
      return Err(Error::Forbidden {
        role:   actor.role,
        action: "create a pre-assigned case",
      });
    }
    input.validate()?;

    let case_type = self
      .directory
      .case_type(&input.case_type)
      .ok_or_else(|| Error::UnknownCaseType(input.case_type.clone()))?;
    let department = match input.department.as_deref() {
      Some(id) => Some(
        self
          .directory
          .department(id)
          .ok_or_else(|| Error::UnknownDepartment(id.to_owned()))?,
      ),
      None => None,
    };
    if let (Some(technician), Some(department)) = (input.technician.as_deref(), department) {
      self.require_member(technician, &department.department_id)?;
    }

    let created_at = Utc::now();
    let due_at = match input.due_override {
      Some(due) if due < created_at => {
        return Err(Error::InvalidField("due date must not precede creation".into()));
      }
      Some(due) => due,
      None => deadline::due_date(created_at, case_type.sla_days),
    };

    let sequence = self.store.allocate_sequence().await.map_err(Error::storage)?;
    let tracking_code =
      case::tracking_code(department.map(|d| d.code.as_str()), created_at, sequence);

    let status = match (&input.department, &input.technician) {
      (None, _) => CaseStatus::New,
      (Some(_), None) => CaseStatus::PendingAssignment,
      (Some(_), Some(_)) => CaseStatus::InProgress,
    };
    let coordinator = input
      .department
      .as_deref()
      .and_then(|id| self.directory.coordinator_for(id))
      .map(|staff| staff.staff_id.clone());
    let technician = input.technician.clone();

    let case = Case {
      case_id: Uuid::new_v4(),
      tracking_code,
      created_at,
      due_at,
      closed_at: None,
      case_type: input.case_type,
      department: input.department,
      status,
      technician,
      coordinator,
      title: input.title,
      description: input.description,
      requester: input.requester,
      location: input.location,
      visit: None,
    };

    let stored = self.store.insert(case).await.map_err(Error::storage)?;
    info!(
      case_id = %stored.case_id,
      code = %stored.tracking_code,
      status = %stored.status,
      "case created"
    );
    if let Some(technician) = stored.technician.clone() {
      self.spawn_assignment_dispatch(&technician, &stored);
    }
    Ok(stored)
  }

  /// Route a case to a department, deriving its coordinator from the
  /// roster and optionally staffing it in the same step.
  pub async fn assign_to_department(
    &self,
    case_id: Uuid,
    req: AssignDepartment,
    actor: &Actor,
  ) -> Result<Case> {
    let _guard = self.locks.acquire(case_id).await;
    let mut case = self.load(case_id).await?;

    if !policy::can_assign(actor, &case) {
      return Err(Error::Forbidden { role: actor.role, action: "assign this case" });
    }
    self.check_transition(CaseEvent::AssignDepartment, &case)?;

    let department = self
      .directory
      .department(&req.department)
      .ok_or_else(|| Error::UnknownDepartment(req.department.clone()))?;
    if let Some(technician) = req.technician.as_deref() {
      self.require_member(technician, &department.department_id)?;
    }

    case.department = Some(department.department_id.clone());
    case.coordinator = self
      .directory
      .coordinator_for(&department.department_id)
      .map(|staff| staff.staff_id.clone());
    if let Some(zone) = req.zone.filter(|zone| !zone.trim().is_empty()) {
      case.location.zone = Some(zone);
    }
    match req.technician.as_deref() {
      Some(technician) => {
        case.technician = Some(technician.to_owned());
        case.status = CaseStatus::InProgress;
      }
      None => {
        case.technician = None;
        case.status = CaseStatus::PendingAssignment;
      }
    }

    let stored = self.persist(case).await?;
    if let Some(technician) = req.technician.as_deref() {
      self.spawn_assignment_dispatch(technician, &stored);
    }
    Ok(stored)
  }

  /// Put a technician on a routed case, or take the current one off
  /// (`None`), dropping the case back to the assignment queue.
  pub async fn assign_technician(
    &self,
    case_id: Uuid,
    technician: Option<&str>,
    actor: &Actor,
  ) -> Result<Case> {
    let _guard = self.locks.acquire(case_id).await;
    let mut case = self.load(case_id).await?;

    if !policy::can_assign(actor, &case) {
      return Err(Error::Forbidden { role: actor.role, action: "assign this case" });
    }
    let event = match technician {
      Some(_) => CaseEvent::AssignTechnician,
      None => CaseEvent::ClearTechnician,
    };
    self.check_transition(event, &case)?;

    match technician {
      Some(id) => {
        let department = match case.department.as_deref() {
          Some(department) => department.to_owned(),
          // Unreachable once the transition check passed; New is the only
          // status without a department.
          None => return Err(Error::InvalidTransition { event, from: case.status }),
        };
        self.require_member(id, &department)?;
        case.technician = Some(id.to_owned());
        case.status = CaseStatus::InProgress;
      }
      None => {
        case.technician = None;
        case.status = CaseStatus::PendingAssignment;
      }
    }

    let stored = self.persist(case).await?;
    if let Some(id) = technician {
      self.spawn_assignment_dispatch(id, &stored);
    }
    Ok(stored)
  }

  /// Admin full edit. A patch that carries a status is a manual status
  /// correction and is the one edit allowed on a terminal case — that is
  /// how a wrongly-closed case gets reopened.
  pub async fn update_case(&self, case_id: Uuid, patch: CasePatch, actor: &Actor) -> Result<Case> {
    let _guard = self.locks.acquire(case_id).await;
    let mut case = self.load(case_id).await?;

    if !policy::can_edit_case_fields(actor, &case) {
      return Err(Error::Forbidden { role: actor.role, action: "edit case fields" });
    }
    let event = match patch.status {
      Some(_) => CaseEvent::EditStatus,
      None => CaseEvent::EditFields,
    };
    self.check_transition(event, &case)?;
    patch.validate(&case)?;
    if let Some(case_type) = patch.case_type.as_deref() {
      if self.directory.case_type(case_type).is_none() {
        return Err(Error::UnknownCaseType(case_type.to_owned()));
      }
    }

    if let Some(title) = patch.title {
      case.title = title;
    }
    if let Some(description) = patch.description {
      case.description = description;
    }
    if let Some(case_type) = patch.case_type {
      case.case_type = case_type;
    }
    if let Some(requester) = patch.requester {
      case.requester = requester;
    }
    if let Some(location) = patch.location {
      case.location = location;
    }
    if let Some(due_at) = patch.due_at {
      case.due_at = due_at;
    }
    if let Some(status) = patch.status {
      if status.is_terminal() {
        // First closure instant stands across repeated closes.
        if case.closed_at.is_none() {
          case.closed_at = Some(Utc::now());
        }
      } else {
        case.closed_at = None;
      }
      case.status = status;
    }

    self.persist(case).await
  }

  /// File the field-visit outcome, resolving the case. Legal only once a
  /// technician is on the case; re-submission on a resolved case
  /// overwrites the record and the original closure instant stands.
  pub async fn submit_visit_record(
    &self,
    case_id: Uuid,
    visit: NewVisit,
    actor: &Actor,
  ) -> Result<Case> {
    let _guard = self.locks.acquire(case_id).await;
    let mut case = self.load(case_id).await?;

    if !policy::can_submit_visit(actor, &case) {
      return Err(Error::Forbidden { role: actor.role, action: "submit a visit record" });
    }
    self.check_transition(CaseEvent::SubmitVisit, &case)?;
    visit.validate()?;

    let now = Utc::now();
    case.visit = Some(visit.into_record(now));
    case.status = CaseStatus::Resolved;
    if case.closed_at.is_none() {
      case.closed_at = Some(now);
    }

    self.persist(case).await
  }

  // ─── Helpers ───────────────────────────────────────────────────────────────

  async fn load(&self, case_id: Uuid) -> Result<Case> {
    self
      .store
      .get(case_id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::CaseNotFound(case_id))
  }

  async fn persist(&self, case: Case) -> Result<Case> {
    let case_id = case.case_id;
    self
      .store
      .replace(case_id, case)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::CaseNotFound(case_id))
  }

  fn check_transition(&self, event: CaseEvent, case: &Case) -> Result<()> {
    if lifecycle::permits(event, case.status) {
      Ok(())
    } else {
      Err(Error::InvalidTransition { event, from: case.status })
    }
  }

  fn require_member(&self, staff_id: &str, department_id: &str) -> Result<()> {
    let staff = self
      .directory
      .staff(staff_id)
      .ok_or_else(|| Error::UnknownStaff(staff_id.to_owned()))?;
    if staff.department.as_deref() != Some(department_id) {
      return Err(Error::TechnicianOutsideDepartment {
        technician: staff_id.to_owned(),
        department: department_id.to_owned(),
      });
    }
    Ok(())
  }

  /// Fire the assignment notification as a detached task. The caller
  /// observes the persisted transition immediately; delivery is logged,
  /// never awaited.
  fn spawn_assignment_dispatch(&self, technician_id: &str, case: &Case) {
    // The id was validated against the roster by the calling command.
    let Some(technician) = self.directory.staff(technician_id).cloned() else {
      return;
    };
    let notifier = Arc::clone(&self.notifier);
    let case = case.clone();
    tokio::spawn(async move {
      let report = dispatch::notify_assignment(notifier.as_ref(), &technician, &case).await;
      if report.complete(technician.phone.is_some()) {
        info!(
          code = %case.tracking_code,
          technician = %technician.staff_id,
          whatsapp = report.whatsapp_sent,
          "assignment notification delivered"
        );
      } else {
        warn!(
          code = %case.tracking_code,
          technician = %technician.staff_id,
          email = report.email_sent,
          whatsapp = report.whatsapp_sent,
          "assignment notification incomplete"
        );
      }
    });
  }
}
