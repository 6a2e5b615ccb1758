use serde::{Deserialize, Serialize};

/// The persisted record for a single relay-capable device: four required string fields, with
/// `uid` held unique by the storage layer.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DeviceRecord {
  /// Globally unique identifier for one physical device. A unique index on this field is the
  /// only uniqueness guarantee in the system.
  pub uid: String,

  /// Opaque reference into the relay-data store.
  pub data: String,

  /// The last network address this device registered from.
  pub ip: String,

  /// Device category/model tag.
  #[serde(rename = "type")]
  pub device_type: String,
}

impl std::fmt::Display for DeviceRecord {
  fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(
      formatter,
      "[{}] {} @ {} (data {})",
      self.uid, self.device_type, self.ip, self.data
    )
  }
}

/// The document a device's `data` field points at. Devices update this as they hear signals;
/// a freshly seeded document starts at zero.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub struct RelayData {
  /// Milliseconds timestamp of the last signal received from the device.
  pub last_signal_timestamp: i64,
}

#[cfg(test)]
mod tests {
  use super::DeviceRecord;

  #[test]
  fn test_type_field_rename() {
    let record = DeviceRecord {
      uid: "10".to_string(),
      data: "633f0e14".to_string(),
      ip: "10.0.0.2".to_string(),
      device_type: "relay".to_string(),
    };

    let value = serde_json::to_value(&record).expect("failed serialization");
    assert_eq!(value.get("type").and_then(|field| field.as_str()), Some("relay"));
    assert!(value.get("device_type").is_none());
  }

  #[test]
  fn test_document_field_names() {
    let record = serde_json::from_str::<DeviceRecord>(
      r#"{"uid":"10","data":"633f0e14","ip":"10.0.0.2","type":"relay"}"#,
    )
    .expect("failed deserialization");

    assert_eq!(record.uid, "10");
    assert_eq!(record.device_type, "relay");
  }
}
