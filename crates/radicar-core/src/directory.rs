//! Reference data: departments, case types, and the staff roster.
//!
//! Loaded once at startup (server configuration) or built inline in tests.
//! The tracker treats it as read-only; personnel management is someone
//! else's system.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Role};

/// An organisational unit responsible for one category of infrastructure.
/// `code` feeds tracking-code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
  pub department_id: String,
  pub name:          String,
  pub code:          String,
}

/// A case classification carrying its service-level deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseType {
  pub case_type_id: String,
  pub name:         String,
  pub sla_days:     u32,
  pub category:     String,
}

/// One person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
  pub staff_id:   String,
  pub name:       String,
  pub role:       Role,
  pub department: Option<String>,
  pub email:      String,
  /// WhatsApp-capable number; notification dispatch skips the channel
  /// when absent.
  pub phone:      Option<String>,
}

impl Staff {
  /// The access-policy view of this person.
  pub fn actor(&self) -> Actor {
    Actor {
      staff_id:   self.staff_id.clone(),
      role:       self.role,
      department: self.department.clone(),
    }
  }
}

/// In-memory lookup over the reference data.
#[derive(Debug, Clone, Default)]
pub struct Directory {
  departments:  HashMap<String, Department>,
  case_types:   HashMap<String, CaseType>,
  staff:        HashMap<String, Staff>,
  /// Department id to staff id of its coordinator; the first coordinator
  /// listed for each department wins.
  coordinators: HashMap<String, String>,
}

impl Directory {
  pub fn new(
    departments: Vec<Department>,
    case_types: Vec<CaseType>,
    staff: Vec<Staff>,
  ) -> Self {
    let mut coordinators = HashMap::new();
    for member in &staff {
      if member.role == Role::Coordinator {
        if let Some(dept) = &member.department {
          coordinators
            .entry(dept.clone())
            .or_insert_with(|| member.staff_id.clone());
        }
      }
    }

    Self {
      departments: departments
        .into_iter()
        .map(|d| (d.department_id.clone(), d))
        .collect(),
      case_types: case_types
        .into_iter()
        .map(|t| (t.case_type_id.clone(), t))
        .collect(),
      staff: staff.into_iter().map(|s| (s.staff_id.clone(), s)).collect(),
      coordinators,
    }
  }

  pub fn department(&self, department_id: &str) -> Option<&Department> {
    self.departments.get(department_id)
  }

  pub fn case_type(&self, case_type_id: &str) -> Option<&CaseType> {
    self.case_types.get(case_type_id)
  }

  pub fn staff(&self, staff_id: &str) -> Option<&Staff> {
    self.staff.get(staff_id)
  }

  /// The coordinator running `department_id`, if the roster names one.
  pub fn coordinator_for(&self, department_id: &str) -> Option<&Staff> {
    self
      .coordinators
      .get(department_id)
      .and_then(|id| self.staff.get(id))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roster() -> Vec<Staff> {
    vec![
      Staff {
        staff_id:   "usr-1".into(),
        name:       "Ana".into(),
        role:       Role::Coordinator,
        department: Some("dep-1".into()),
        email:      "ana@example.org".into(),
        phone:      None,
      },
      Staff {
        staff_id:   "usr-2".into(),
        name:       "Bruno".into(),
        role:       Role::Coordinator,
        department: Some("dep-1".into()),
        email:      "bruno@example.org".into(),
        phone:      None,
      },
      Staff {
        staff_id:   "usr-3".into(),
        name:       "Carla".into(),
        role:       Role::Technician,
        department: Some("dep-2".into()),
        email:      "carla@example.org".into(),
        phone:      Some("+57 300 000 0000".into()),
      },
    ]
  }

  #[test]
  fn first_listed_coordinator_wins() {
    let directory = Directory::new(vec![], vec![], roster());
    let coordinator = directory.coordinator_for("dep-1").unwrap();
    assert_eq!(coordinator.staff_id, "usr-1");
  }

  #[test]
  fn technicians_do_not_coordinate() {
    let directory = Directory::new(vec![], vec![], roster());
    assert!(directory.coordinator_for("dep-2").is_none());
  }
}
