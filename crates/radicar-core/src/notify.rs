//! The `Notifier` trait — the message-send seam.
//!
//! Delivery mechanics (SMTP, WhatsApp gateway) live behind this trait. The
//! boolean result is an observation, not an error: a failed or skipped send
//! never affects the case transition that triggered it.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Channels a notification can go out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
  Email,
  Whatsapp,
}

impl Channel {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::Whatsapp => "whatsapp",
    }
  }
}

impl std::fmt::Display for Channel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A message-send adapter. `true` means the channel accepted the message.
pub trait Notifier: Send + Sync {
  fn send(
    &self,
    channel: Channel,
    recipient: &str,
    message: &str,
  ) -> impl Future<Output = bool> + Send;
}
