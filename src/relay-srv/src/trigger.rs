use serde::{Deserialize, Serialize};

use crate::errors::DirectoryError;

/// The gpio pin a trigger request activates. Fixed by the relay hardware.
pub const TRIGGER_GPIO: u8 = 1;

/// The only action the relay command vocabulary currently defines.
pub const TRIGGER_ACTION: &str = "trigger";

/// The payload sent onward to a physical device to fire its relay. Built on demand, never
/// persisted. Field order here is the serialized order.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TriggerRequest {
  /// Copied from the target device record.
  pub uid: String,

  /// Always [`TRIGGER_GPIO`].
  pub gpio: u8,

  /// Always [`TRIGGER_ACTION`].
  pub action: String,
}

/// Builds the trigger payload for a device. Pure; the only failure mode is an empty `uid`.
pub fn build_trigger_request<S>(uid: S) -> Result<TriggerRequest, DirectoryError>
where
  S: AsRef<str>,
{
  let uid = uid.as_ref();

  if uid.trim().is_empty() {
    return Err(DirectoryError::Validation("uid"));
  }

  Ok(TriggerRequest {
    uid: uid.to_string(),
    gpio: TRIGGER_GPIO,
    action: TRIGGER_ACTION.to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::build_trigger_request;
  use crate::errors::DirectoryError;

  #[test]
  fn test_exact_payload() {
    let request = build_trigger_request("X").expect("failed build");
    let serialized = serde_json::to_string(&request).expect("failed serialization");
    assert_eq!(serialized, r#"{"uid":"X","gpio":1,"action":"trigger"}"#);
  }

  #[test]
  fn test_reproducible() {
    let first = build_trigger_request("10").expect("failed build");
    let second = build_trigger_request("10").expect("failed build");
    assert_eq!(first, second);
  }

  #[test]
  fn test_empty_uid() {
    assert_eq!(build_trigger_request(""), Err(DirectoryError::Validation("uid")));
  }

  #[test]
  fn test_whitespace_uid() {
    assert_eq!(build_trigger_request("  "), Err(DirectoryError::Validation("uid")));
  }
}
