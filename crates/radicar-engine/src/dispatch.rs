//! Assignment notification dispatch.
//!
//! When a technician lands on a case, the tracker tells them over email
//! and, when a phone number is on file, WhatsApp. Both channels go out
//! concurrently and a per-channel failure never fails the other — or the
//! command that triggered the dispatch.

use radicar_core::{
  case::Case,
  directory::Staff,
  notify::{Channel, Notifier},
};
use tracing::info;

/// Per-channel outcome of one assignment dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
  pub email_sent:    bool,
  pub whatsapp_sent: bool,
}

impl DispatchReport {
  /// Did every channel that should have been attempted go through?
  pub fn complete(&self, whatsapp_expected: bool) -> bool {
    self.email_sent && (!whatsapp_expected || self.whatsapp_sent)
  }
}

/// Notify `technician` that `case` is now theirs.
///
/// Email always goes out; WhatsApp only when the roster has a phone number
/// (reported as not sent otherwise). The two sends run concurrently.
pub async fn notify_assignment<N: Notifier>(
  notifier: &N,
  technician: &Staff,
  case: &Case,
) -> DispatchReport {
  let message = assignment_message(technician, case);

  let email = notifier.send(Channel::Email, &technician.email, &message);
  let whatsapp = async {
    match technician.phone.as_deref() {
      Some(phone) => notifier.send(Channel::Whatsapp, phone, &message).await,
      None => false,
    }
  };

  let (email_sent, whatsapp_sent) = tokio::join!(email, whatsapp);
  DispatchReport { email_sent, whatsapp_sent }
}

/// Body text shared by both channels.
fn assignment_message(technician: &Staff, case: &Case) -> String {
  format!(
    "{name}, case {code} has been assigned to you: {title}. Address: {address}. Due {due}.",
    name = technician.name,
    code = case.tracking_code,
    title = case.title,
    address = case.location.address,
    due = case.due_at.format("%Y-%m-%d"),
  )
}

/// [`Notifier`] that writes the message to the log and reports success.
/// The stand-in until a real gateway is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  async fn send(&self, channel: Channel, recipient: &str, message: &str) -> bool {
    info!(%channel, recipient, message, "notification");
    true
  }
}
