//! Actor — the identity context a command is issued under.
//!
//! Session mechanics (login, tokens) live outside this crate. Callers
//! resolve whoever is at the keyboard into an [`Actor`] and pass it
//! explicitly into every mutating command; the core keeps no ambient
//! "current user" state.

use serde::{Deserialize, Serialize};

/// The staff roles recognised by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  /// Unrestricted access, including general field edits.
  Admin,
  /// Runs one department; assigns work within it.
  Coordinator,
  /// Performs and records field visits.
  Technician,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Coordinator => "coordinator",
      Self::Technician => "technician",
    }
  }
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Who is acting, in what role, and for which department (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
  pub staff_id:   String,
  pub role:       Role,
  pub department: Option<String>,
}
