//! Case — the central record of the tracker.
//!
//! A case is a citizen infrastructure complaint (pothole, broken street
//! light, drainage failure) followed from intake to resolution. Identity
//! fields are assigned at creation and never change; everything else is
//! mutated only through commands that keep the lifecycle and assignment
//! invariants intact.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::CaseStatus;

// ─── Requester ───────────────────────────────────────────────────────────────

/// Legal classification of the requesting party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalKind {
  NaturalPerson,
  LegalEntity,
}

/// The citizen (or entity) who filed the complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requester {
  pub name:       String,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub legal_kind: Option<LegalKind>,
}

// ─── Location ────────────────────────────────────────────────────────────────

/// Where the reported issue is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub latitude:  f64,
  pub longitude: f64,
  pub address:   String,
  /// Administrative-zone label (comuna, vereda); assignable at triage.
  pub zone:      Option<String>,
}

// ─── Visit record ────────────────────────────────────────────────────────────

/// The structured outcome of a completed field visit. Writing one is what
/// finalises a case to [`CaseStatus::Resolved`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
  /// Opaque references to photo evidence; binary storage lives elsewhere.
  pub before_photos:   Vec<String>,
  pub after_photos:    Vec<String>,
  /// Whoever received the crew on site, if anyone.
  pub on_site_contact: Option<String>,
  pub observations:    String,
  /// Technical narrative of how the issue was fixed.
  pub resolution:      String,
  pub visited_at:      DateTime<Utc>,
}

// ─── Case ────────────────────────────────────────────────────────────────────

/// A tracked complaint. `case_id`, `tracking_code`, and `created_at` are
/// fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
  pub case_id:       Uuid,
  /// Public reference the requester quotes when asking after their case.
  pub tracking_code: String,
  pub created_at:    DateTime<Utc>,
  pub due_at:        DateTime<Utc>,
  /// Set once, when the case first enters a terminal status.
  pub closed_at:     Option<DateTime<Utc>>,
  pub case_type:     String,
  pub department:    Option<String>,
  pub status:        CaseStatus,
  pub technician:    Option<String>,
  /// Coordinator of the assigned department, captured at assignment time.
  pub coordinator:   Option<String>,
  pub title:         String,
  pub description:   String,
  pub requester:     Requester,
  pub location:      Location,
  pub visit:         Option<VisitRecord>,
}

impl Case {
  /// The status a reader should see at `now`; overdue non-terminal cases
  /// display as [`CaseStatus::Expired`].
  pub fn effective_status(&self, now: DateTime<Utc>) -> CaseStatus {
    crate::lifecycle::effective_status(self.status, self.due_at, now)
  }
}

// ─── Tracking code ───────────────────────────────────────────────────────────

/// Department code used in tracking codes for cases filed before triage.
pub const GENERAL_DEPT_CODE: &str = "INF";

/// Render the public tracking code: `{DEPT_CODE}-{YEAR}-{SEQUENCE}`, with
/// the sequence zero-padded to four digits and [`GENERAL_DEPT_CODE`]
/// standing in when no department is chosen at intake.
pub fn tracking_code(
  dept_code: Option<&str>,
  created_at: DateTime<Utc>,
  sequence: u64,
) -> String {
  format!(
    "{}-{}-{:04}",
    dept_code.unwrap_or(GENERAL_DEPT_CODE),
    created_at.year(),
    sequence
  )
}
