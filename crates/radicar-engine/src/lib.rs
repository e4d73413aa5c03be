//! Case lifecycle engine.
//!
//! [`CaseService`] is the tracker's single entry point: it authorises
//! each command against the access policy, holds the transitions to the
//! lifecycle table, serialises writes per case, persists through any
//! [`radicar_core::store::CaseStore`] and fires assignment notifications
//! through any [`radicar_core::notify::Notifier`] without ever blocking a
//! command on delivery.

pub mod dispatch;
mod locks;
pub mod request;
pub mod service;

pub use dispatch::{DispatchReport, LogNotifier, notify_assignment};
pub use request::{AssignDepartment, CasePatch, CaseQuery, NewCase, NewVisit};
pub use service::CaseService;
