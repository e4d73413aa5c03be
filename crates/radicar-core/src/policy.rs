//! Role-based access policy.
//!
//! Pure predicates answering "may this actor perform this command on this
//! case". Every predicate is total; the engine evaluates the relevant one
//! before touching a case, and a refusal surfaces as an authorization
//! error, never a silent no-op.

use crate::{
  actor::{Actor, Role},
  case::Case,
};

/// Anyone on staff may file a case through open intake; pre-selecting a
/// department (and optionally a technician) at creation is an admin path.
pub fn can_create_case(actor: &Actor, with_department: bool) -> bool {
  !with_department || actor.role == Role::Admin
}

/// General field edits (title, status, due date, ...) are admin-only.
pub fn can_edit_case_fields(actor: &Actor, _case: &Case) -> bool {
  actor.role == Role::Admin
}

/// Department and technician assignment: admins anywhere, coordinators
/// inside their own department. A case not yet routed to any department
/// admits only admins.
pub fn can_assign(actor: &Actor, case: &Case) -> bool {
  match actor.role {
    Role::Admin => true,
    Role::Coordinator => {
      actor.department.is_some() && actor.department == case.department
    }
    Role::Technician => false,
  }
}

/// Visit-record submission: admins, the coordinator of the case's
/// department, or the technician the case is assigned to.
pub fn can_submit_visit(actor: &Actor, case: &Case) -> bool {
  match actor.role {
    Role::Admin => true,
    Role::Coordinator => {
      actor.department.is_some() && actor.department == case.department
    }
    Role::Technician => {
      case.technician.as_deref() == Some(actor.staff_id.as_str())
    }
  }
}

/// Reads are not narrowed by role; listing scope is a presentation concern.
pub fn can_view(_actor: &Actor, _case: &Case) -> bool {
  true
}
