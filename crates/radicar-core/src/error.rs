//! Error types for `radicar-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::{actor::Role, lifecycle::CaseEvent, lifecycle::CaseStatus};

#[derive(Debug, Error)]
pub enum Error {
  #[error("case not found: {0}")]
  CaseNotFound(Uuid),

  #[error("unknown department: {0:?}")]
  UnknownDepartment(String),

  #[error("unknown case type: {0:?}")]
  UnknownCaseType(String),

  #[error("unknown staff member: {0:?}")]
  UnknownStaff(String),

  #[error("technician {technician} does not belong to department {department}")]
  TechnicianOutsideDepartment {
    technician: String,
    department: String,
  },

  #[error("a {role} may not {action}")]
  Forbidden { role: Role, action: &'static str },

  #[error("cannot {event} a case in status {from}")]
  InvalidTransition { event: CaseEvent, from: CaseStatus },

  #[error("invalid field: {0}")]
  InvalidField(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure so callers above the store seam see one
  /// storage variant regardless of backend.
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }

  /// Coarse classification for callers that map errors onto their own
  /// vocabulary (HTTP status codes, exit codes).
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::CaseNotFound(_) => ErrorKind::NotFound,
      Self::UnknownDepartment(_)
      | Self::UnknownCaseType(_)
      | Self::UnknownStaff(_)
      | Self::TechnicianOutsideDepartment { .. }
      | Self::InvalidField(_) => ErrorKind::Validation,
      Self::Forbidden { .. } => ErrorKind::Authorization,
      Self::InvalidTransition { .. } => ErrorKind::InvalidState,
      Self::Serialization(_) | Self::Storage(_) => ErrorKind::Internal,
    }
  }
}

/// The five failure families commands can produce. Every [`Error`] variant
/// maps to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  NotFound,
  Authorization,
  InvalidState,
  Internal,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
