//! Typed command and query inputs.
//!
//! These are the shapes the API layer deserialises request bodies into;
//! each carries its own boundary validation. Checks that need the
//! reference directory (does the case type exist, is the technician in
//! the department) live with the commands in [`crate::service`].

use chrono::{DateTime, Utc};
use radicar_core::{
  Error, Result,
  case::{Case, Location, Requester, VisitRecord},
  lifecycle::{self, CaseStatus, CaseView},
};
use serde::Deserialize;

// ─── Commands ────────────────────────────────────────────────────────────────

/// Input for opening a case.
///
/// `department` and `technician` pre-assign the case at intake, which only
/// an admin may do; a technician without a department is never accepted.
/// `due_override` replaces the SLA-computed deadline.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCase {
  pub case_type:    String,
  pub title:        String,
  pub description:  String,
  pub requester:    Requester,
  pub location:     Location,
  #[serde(default)]
  pub department:   Option<String>,
  #[serde(default)]
  pub technician:   Option<String>,
  #[serde(default)]
  pub due_override: Option<DateTime<Utc>>,
}

impl NewCase {
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::InvalidField("title must not be empty".into()));
    }
    if self.requester.name.trim().is_empty() {
      return Err(Error::InvalidField("requester name must not be empty".into()));
    }
    if self.technician.is_some() && self.department.is_none() {
      return Err(Error::InvalidField(
        "a technician cannot be assigned without a department".into(),
      ));
    }
    Ok(())
  }
}

/// Input for routing a case to a department.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignDepartment {
  pub department: String,
  /// Overwrites the case's zone when present and non-empty.
  #[serde(default)]
  pub zone:       Option<String>,
  /// Staffs the case in the same command; must belong to `department`.
  #[serde(default)]
  pub technician: Option<String>,
}

/// Admin full edit. Absent fields are left untouched; identity fields
/// (id, tracking code, creation instant) are not representable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CasePatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub case_type:   Option<String>,
  pub status:      Option<CaseStatus>,
  pub due_at:      Option<DateTime<Utc>>,
  pub requester:   Option<Requester>,
  pub location:    Option<Location>,
}

impl CasePatch {
  /// Directory-free validation against the case being patched.
  pub fn validate(&self, case: &Case) -> Result<()> {
    if let Some(title) = &self.title {
      if title.trim().is_empty() {
        return Err(Error::InvalidField("title must not be empty".into()));
      }
    }
    if let Some(due_at) = self.due_at {
      if due_at < case.created_at {
        return Err(Error::InvalidField(
          "due date must not precede creation".into(),
        ));
      }
    }
    if let Some(status) = self.status {
      if status == CaseStatus::Expired {
        return Err(Error::InvalidField(
          "expired is derived from the due date, never stored".into(),
        ));
      }
      if !lifecycle::status_agrees_with_assignment(
        status,
        case.department.is_some(),
        case.technician.is_some(),
      ) {
        return Err(Error::InvalidField(format!(
          "status {status} does not agree with the case's assignment"
        )));
      }
    }
    Ok(())
  }
}

/// Input for filing the field-visit outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVisit {
  #[serde(default)]
  pub before_photos:   Vec<String>,
  #[serde(default)]
  pub after_photos:    Vec<String>,
  #[serde(default)]
  pub on_site_contact: Option<String>,
  #[serde(default)]
  pub observations:    String,
  pub resolution:      String,
  /// When the visit happened; defaults to the submission instant.
  #[serde(default)]
  pub visited_at:      Option<DateTime<Utc>>,
}

impl NewVisit {
  pub fn validate(&self) -> Result<()> {
    if self.resolution.trim().is_empty() {
      return Err(Error::InvalidField("resolution must not be empty".into()));
    }
    Ok(())
  }

  pub(crate) fn into_record(self, submitted_at: DateTime<Utc>) -> VisitRecord {
    VisitRecord {
      before_photos:   self.before_photos,
      after_photos:    self.after_photos,
      on_site_contact: self.on_site_contact,
      observations:    self.observations,
      resolution:      self.resolution,
      visited_at:      self.visited_at.unwrap_or(submitted_at),
    }
  }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Listing filter. All criteria are conjunctive; `status` matches the
/// display status, so filtering on `expired` finds overdue cases whatever
/// their stored status says.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseQuery {
  pub status:     Option<CaseStatus>,
  pub department: Option<String>,
  pub technician: Option<String>,
  /// Case-insensitive substring over title, description and tracking code.
  pub text:       Option<String>,
  pub limit:      Option<usize>,
}

impl CaseQuery {
  pub fn matches(&self, view: &CaseView) -> bool {
    if let Some(status) = self.status {
      if view.effective_status != status {
        return false;
      }
    }
    if let Some(department) = &self.department {
      if view.case.department.as_deref() != Some(department.as_str()) {
        return false;
      }
    }
    if let Some(technician) = &self.technician {
      if view.case.technician.as_deref() != Some(technician.as_str()) {
        return false;
      }
    }
    if let Some(text) = &self.text {
      let needle = text.to_lowercase();
      let found = [&view.case.title, &view.case.description, &view.case.tracking_code]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle));
      if !found {
        return false;
      }
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;
  use radicar_core::{ErrorKind, case::LegalKind};
  use uuid::Uuid;

  use super::*;

  fn new_case() -> NewCase {
    NewCase {
      case_type:    "ct-pothole".into(),
      title:        "Pothole on Carrera 45".into(),
      description:  "Deep pothole in the right lane".into(),
      requester:    Requester {
        name:       "Rosa Diaz".into(),
        email:      None,
        phone:      None,
        legal_kind: Some(LegalKind::NaturalPerson),
      },
      location:     Location {
        latitude:  6.2442,
        longitude: -75.5812,
        address:   "Cra 45 # 10-11".into(),
        zone:      None,
      },
      department:   None,
      technician:   None,
      due_override: None,
    }
  }

  fn case(department: Option<&str>, technician: Option<&str>, status: CaseStatus) -> Case {
    let created_at = Utc::now();
    Case {
      case_id: Uuid::new_v4(),
      tracking_code: "INF-2026-0001".into(),
      created_at,
      due_at: created_at + Duration::days(15),
      closed_at: None,
      case_type: "ct-pothole".into(),
      department: department.map(str::to_owned),
      status,
      technician: technician.map(str::to_owned),
      coordinator: None,
      title: "Pothole on Carrera 45".into(),
      description: "Deep pothole in the right lane".into(),
      requester: new_case().requester,
      location: new_case().location,
      visit: None,
    }
  }

  #[test]
  fn creation_requires_title_and_requester_name() {
    let mut input = new_case();
    input.title = "  ".into();
    assert_eq!(input.validate().unwrap_err().kind(), ErrorKind::Validation);

    let mut input = new_case();
    input.requester.name = String::new();
    assert_eq!(input.validate().unwrap_err().kind(), ErrorKind::Validation);

    assert!(new_case().validate().is_ok());
  }

  #[test]
  fn creation_rejects_technician_without_department() {
    let mut input = new_case();
    input.technician = Some("usr-6".into());
    assert_eq!(input.validate().unwrap_err().kind(), ErrorKind::Validation);

    input.department = Some("dep-2".into());
    assert!(input.validate().is_ok());
  }

  #[test]
  fn patch_due_date_must_not_precede_creation() {
    let case = case(None, None, CaseStatus::New);
    let patch = CasePatch {
      due_at: Some(case.created_at - Duration::seconds(1)),
      ..CasePatch::default()
    };
    assert_eq!(patch.validate(&case).unwrap_err().kind(), ErrorKind::Validation);

    // Exactly the creation instant is allowed.
    let patch = CasePatch { due_at: Some(case.created_at), ..CasePatch::default() };
    assert!(patch.validate(&case).is_ok());
  }

  #[test]
  fn patch_rejects_stored_expired() {
    let case = case(Some("dep-2"), Some("usr-6"), CaseStatus::InProgress);
    let patch = CasePatch { status: Some(CaseStatus::Expired), ..CasePatch::default() };
    assert_eq!(patch.validate(&case).unwrap_err().kind(), ErrorKind::Validation);
  }

  #[test]
  fn patch_status_must_fit_assignment() {
    // No department: only New fits.
    let unrouted = case(None, None, CaseStatus::New);
    let patch = CasePatch { status: Some(CaseStatus::InProgress), ..CasePatch::default() };
    assert_eq!(patch.validate(&unrouted).unwrap_err().kind(), ErrorKind::Validation);

    // Department and technician: anything past PendingAssignment fits.
    let staffed = case(Some("dep-2"), Some("usr-6"), CaseStatus::InProgress);
    let patch = CasePatch { status: Some(CaseStatus::PendingAssignment), ..CasePatch::default() };
    assert_eq!(patch.validate(&staffed).unwrap_err().kind(), ErrorKind::Validation);
    let patch = CasePatch { status: Some(CaseStatus::Returned), ..CasePatch::default() };
    assert!(patch.validate(&staffed).is_ok());
  }

  #[test]
  fn visit_requires_a_resolution() {
    let visit = NewVisit {
      before_photos:   Vec::new(),
      after_photos:    Vec::new(),
      on_site_contact: None,
      observations:    "crew on site".into(),
      resolution:      " ".into(),
      visited_at:      None,
    };
    assert_eq!(visit.validate().unwrap_err().kind(), ErrorKind::Validation);
  }

  #[test]
  fn query_text_matches_code_title_and_description_case_insensitively() {
    let view = CaseView::resolve(case(None, None, CaseStatus::New), Utc::now());

    for text in ["carrera", "RIGHT LANE", "inf-2026"] {
      let query = CaseQuery { text: Some(text.into()), ..CaseQuery::default() };
      assert!(query.matches(&view), "{text:?} should match");
    }

    let query = CaseQuery { text: Some("sidewalk".into()), ..CaseQuery::default() };
    assert!(!query.matches(&view));
  }

  #[test]
  fn query_status_filters_on_display_status() {
    let mut overdue = case(Some("dep-2"), Some("usr-6"), CaseStatus::InProgress);
    overdue.due_at = overdue.created_at;
    let view = CaseView::resolve(overdue, Utc::now() + Duration::hours(1));

    let query = CaseQuery { status: Some(CaseStatus::Expired), ..CaseQuery::default() };
    assert!(query.matches(&view));
    let query = CaseQuery { status: Some(CaseStatus::InProgress), ..CaseQuery::default() };
    assert!(!query.matches(&view));
  }
}
