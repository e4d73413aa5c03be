//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Structured fields
//! (requester, location, visit record) are stored as compact JSON. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use radicar_core::{
  case::{Case, Location, Requester, VisitRecord},
  lifecycle::CaseStatus,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── CaseStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(status: CaseStatus) -> &'static str { status.as_str() }

pub fn decode_status(s: &str) -> Result<CaseStatus> {
  CaseStatus::parse(s).ok_or_else(|| Error::UnknownStatus(s.to_owned()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Plain column values for one `cases` row, in schema order. The single
/// place where the row layout meets the domain type; both queries and both
/// writes go through it.
pub struct RawCase {
  pub case_id:       String,
  pub tracking_code: String,
  pub created_at:    String,
  pub due_at:        String,
  pub closed_at:     Option<String>,
  pub case_type:     String,
  pub department:    Option<String>,
  pub status:        String,
  pub technician:    Option<String>,
  pub coordinator:   Option<String>,
  pub title:         String,
  pub description:   String,
  pub requester:     String,
  pub location:      String,
  pub visit:         Option<String>,
}

impl RawCase {
  /// Read all fifteen columns of a row produced by a `SELECT` listing the
  /// columns in schema order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      case_id:       row.get(0)?,
      tracking_code: row.get(1)?,
      created_at:    row.get(2)?,
      due_at:        row.get(3)?,
      closed_at:     row.get(4)?,
      case_type:     row.get(5)?,
      department:    row.get(6)?,
      status:        row.get(7)?,
      technician:    row.get(8)?,
      coordinator:   row.get(9)?,
      title:         row.get(10)?,
      description:   row.get(11)?,
      requester:     row.get(12)?,
      location:      row.get(13)?,
      visit:         row.get(14)?,
    })
  }

  pub fn from_case(case: &Case) -> Result<Self> {
    Ok(Self {
      case_id:       encode_uuid(case.case_id),
      tracking_code: case.tracking_code.clone(),
      created_at:    encode_dt(case.created_at),
      due_at:        encode_dt(case.due_at),
      closed_at:     case.closed_at.map(encode_dt),
      case_type:     case.case_type.clone(),
      department:    case.department.clone(),
      status:        encode_status(case.status).to_owned(),
      technician:    case.technician.clone(),
      coordinator:   case.coordinator.clone(),
      title:         case.title.clone(),
      description:   case.description.clone(),
      requester:     serde_json::to_string(&case.requester)?,
      location:      serde_json::to_string(&case.location)?,
      visit:         case
        .visit
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?,
    })
  }

  pub fn into_case(self) -> Result<Case> {
    let requester: Requester = serde_json::from_str(&self.requester)?;
    let location: Location = serde_json::from_str(&self.location)?;
    let visit: Option<VisitRecord> = self
      .visit
      .as_deref()
      .map(serde_json::from_str)
      .transpose()?;

    Ok(Case {
      case_id:       decode_uuid(&self.case_id)?,
      tracking_code: self.tracking_code,
      created_at:    decode_dt(&self.created_at)?,
      due_at:        decode_dt(&self.due_at)?,
      closed_at:     self.closed_at.as_deref().map(decode_dt).transpose()?,
      case_type:     self.case_type,
      department:    self.department,
      status:        decode_status(&self.status)?,
      technician:    self.technician,
      coordinator:   self.coordinator,
      title:         self.title,
      description:   self.description,
      requester,
      location,
      visit,
    })
  }
}
