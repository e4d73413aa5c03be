//! Case lifecycle: statuses, the transition table, and the derived
//! display status.
//!
//! Stored statuses are written only by commands. `Expired` is different: the
//! automatic paths never persist it. It is computed at read time for any
//! non-terminal case past its due date, so single-case reads and listings
//! agree without a background sweep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::Case;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a case sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
  /// Filed, not yet routed to a department.
  New,
  /// Routed to a department, waiting for a technician.
  PendingAssignment,
  InProgress,
  VisitScheduled,
  /// Finalised with a field-visit record.
  Resolved,
  /// Handed back to the requester without a field resolution.
  Returned,
  Closed,
  /// Overdue display status; derived, never written by the automatic paths.
  Expired,
}

impl CaseStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::New => "new",
      Self::PendingAssignment => "pending_assignment",
      Self::InProgress => "in_progress",
      Self::VisitScheduled => "visit_scheduled",
      Self::Resolved => "resolved",
      Self::Returned => "returned",
      Self::Closed => "closed",
      Self::Expired => "expired",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "new" => Some(Self::New),
      "pending_assignment" => Some(Self::PendingAssignment),
      "in_progress" => Some(Self::InProgress),
      "visit_scheduled" => Some(Self::VisitScheduled),
      "resolved" => Some(Self::Resolved),
      "returned" => Some(Self::Returned),
      "closed" => Some(Self::Closed),
      "expired" => Some(Self::Expired),
      _ => None,
    }
  }

  /// Terminal statuses carry a closure timestamp and admit no further
  /// automatic transitions.
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Resolved | Self::Closed)
  }
}

impl std::fmt::Display for CaseStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The status a reader should see at `now`. Overdue non-terminal cases
/// display as [`CaseStatus::Expired`]; a case due exactly now is not yet
/// overdue.
pub fn effective_status(
  stored: CaseStatus,
  due_at: DateTime<Utc>,
  now: DateTime<Utc>,
) -> CaseStatus {
  if !stored.is_terminal() && now > due_at {
    CaseStatus::Expired
  } else {
    stored
  }
}

// ─── Transition table ────────────────────────────────────────────────────────

/// The mutating commands the state machine recognises. Creation is absent;
/// it has no source state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseEvent {
  AssignDepartment,
  AssignTechnician,
  ClearTechnician,
  EditFields,
  EditStatus,
  SubmitVisit,
}

impl CaseEvent {
  /// Verb phrase used in error messages: "cannot {verb} a case in ...".
  pub fn verb(&self) -> &'static str {
    match self {
      Self::AssignDepartment => "assign a department to",
      Self::AssignTechnician => "assign a technician to",
      Self::ClearTechnician => "clear the technician on",
      Self::EditFields => "edit",
      Self::EditStatus => "set the status of",
      Self::SubmitVisit => "submit a visit record for",
    }
  }
}

impl std::fmt::Display for CaseEvent {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.verb())
  }
}

/// May `event` fire from `from`?
///
/// This table answers legality of the source status only. The resulting
/// status is decided by the command (department assignment lands on
/// `PendingAssignment` or `InProgress` depending on whether a technician
/// came with it).
pub fn permits(event: CaseEvent, from: CaseStatus) -> bool {
  use CaseStatus::*;
  match event {
    CaseEvent::AssignDepartment => matches!(from, New | PendingAssignment),
    CaseEvent::AssignTechnician | CaseEvent::ClearTechnician => {
      matches!(from, PendingAssignment | InProgress)
    }
    CaseEvent::EditFields => !from.is_terminal(),
    // A manual status correction may touch a terminal case; this is how a
    // wrongly-closed case gets reopened.
    CaseEvent::EditStatus => true,
    // A visit resolves the case, so its source must already be staffed;
    // resolving New or PendingAssignment would leave the assignment fields
    // contradicting the status. Resolved stays legal: a record may be
    // re-submitted and the original closure timestamp stands.
    CaseEvent::SubmitVisit => {
      matches!(from, InProgress | VisitScheduled | Returned | Resolved)
    }
  }
}

/// Does a stored `status` agree with the assignment fields?
///
/// Two couplings hold for every persisted case: a case without a
/// department is exactly a `New` case, and a routed case without a
/// technician is exactly a `PendingAssignment` case. A technician with no
/// department is not a shape the tracker ever produces.
pub fn status_agrees_with_assignment(
  status: CaseStatus,
  has_department: bool,
  has_technician: bool,
) -> bool {
  match (has_department, has_technician) {
    (false, false) => status == CaseStatus::New,
    (false, true) => false,
    (true, false) => status == CaseStatus::PendingAssignment,
    (true, true) => !matches!(status, CaseStatus::New | CaseStatus::PendingAssignment),
  }
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// A case bundled with its display status — never stored, always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseView {
  pub case:             Case,
  /// The point in time at which this view was resolved.
  pub as_of:            DateTime<Utc>,
  /// [`effective_status`] of the case at `as_of`.
  pub effective_status: CaseStatus,
}

impl CaseView {
  pub fn resolve(case: Case, as_of: DateTime<Utc>) -> Self {
    let effective_status = effective_status(case.status, case.due_at, as_of);
    Self { case, as_of, effective_status }
  }
}
