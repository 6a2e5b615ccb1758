use serde::Deserialize;

use crate::config::MongoConfiguration;
use crate::errors::DirectoryError;
use crate::schema::{DeviceRecord, RelayData};

/// The inbound registration fields. Deserializes straight from the http payload; `type` maps
/// onto `device_type` the same way it does on the persisted record.
#[derive(Deserialize, Debug, Clone)]
pub struct RegistrationRequest {
  /// The device identifier being registered.
  pub uid: String,

  /// The address the device is reachable at.
  pub ip: String,

  /// Device category/model tag.
  #[serde(rename = "type")]
  pub device_type: String,

  /// Opaque reference into the relay-data store.
  pub data: String,
}

impl RegistrationRequest {
  /// Every field is required; the first empty one names the validation failure.
  fn validate(&self) -> Result<(), DirectoryError> {
    let fields = [
      ("uid", &self.uid),
      ("data", &self.data),
      ("ip", &self.ip),
      ("type", &self.device_type),
    ];

    for (name, value) in fields {
      if value.trim().is_empty() {
        return Err(DirectoryError::Validation(name));
      }
    }

    Ok(())
  }
}

fn device_collection(mongo: &mongodb::Client, config: &MongoConfiguration) -> mongodb::Collection<DeviceRecord> {
  mongo
    .database(&config.database)
    .collection(&config.collections.devices)
}

fn relay_data_collection(mongo: &mongodb::Client, config: &MongoConfiguration) -> mongodb::Collection<RelayData> {
  mongo
    .database(&config.database)
    .collection(&config.collections.relay_data)
}

/// Creates the unique index backing the one-record-per-`uid` invariant. Runs once at startup;
/// callers treat failure as fatal since nothing else enforces uniqueness.
pub async fn prepare(mongo: &mongodb::Client, config: &MongoConfiguration) -> Result<(), DirectoryError> {
  let index = mongodb::IndexModel::builder()
    .keys(bson::doc! { "uid": 1 })
    .options(mongodb::options::IndexOptions::builder().unique(true).build())
    .build();

  device_collection(mongo, config)
    .create_index(index, None)
    .await
    .map(|_| ())
    .map_err(|error| {
      log::warn!("unable to create unique uid index - {error}");
      DirectoryError::Storage(format!("{error}"))
    })
}

/// Registers a device. The first sight of a `uid` creates the record; every registration after
/// that overwrites `ip`, `type` and `data` in place. Two racing first-registrations are
/// serialized by the unique index, with the loser surfaced as a conflict.
pub async fn register(
  mongo: &mongodb::Client,
  config: &MongoConfiguration,
  request: RegistrationRequest,
) -> Result<DeviceRecord, DirectoryError> {
  request.validate()?;

  log::debug!("registering device '{}' from {}", request.uid, request.ip);

  let updates = bson::doc! {
    "$set": { "data": &request.data, "ip": &request.ip, "type": &request.device_type },
    "$setOnInsert": { "uid": &request.uid },
  };

  let options = mongodb::options::FindOneAndUpdateOptions::builder()
    .upsert(true)
    .return_document(mongodb::options::ReturnDocument::After)
    .build();

  device_collection(mongo, config)
    .find_one_and_update(bson::doc! { "uid": &request.uid }, updates, Some(options))
    .await
    .map_err(|error| {
      log::warn!("unable to upsert device '{}' - {error}", request.uid);
      DirectoryError::from_write(&request.uid, error)
    })?
    .ok_or_else(|| DirectoryError::Storage(format!("upsert for '{}' returned no document", request.uid)))
}

/// Looks up a device by `uid`. Read-only; a miss is a typed `NotFound`, not an empty value.
pub async fn find(mongo: &mongodb::Client, config: &MongoConfiguration, uid: &str) -> Result<DeviceRecord, DirectoryError> {
  device_collection(mongo, config)
    .find_one(bson::doc! { "uid": uid }, None)
    .await
    .map_err(|error| {
      log::warn!("device lookup failed - {error}");
      DirectoryError::Storage(format!("{error}"))
    })?
    .ok_or_else(|| DirectoryError::NotFound(uid.to_string()))
}

/// Inserts a fresh relay-data document and returns its id, giving registrations something for
/// their `data` field to reference.
pub async fn seed_relay_data(mongo: &mongodb::Client, config: &MongoConfiguration) -> Result<String, DirectoryError> {
  let result = relay_data_collection(mongo, config)
    .insert_one(RelayData::default(), None)
    .await
    .map_err(|error| {
      log::warn!("unable to seed relay data - {error}");
      DirectoryError::Storage(format!("{error}"))
    })?;

  let id = result
    .inserted_id
    .as_object_id()
    .map(|id| id.to_hex())
    .unwrap_or_else(|| result.inserted_id.to_string());

  Ok(id)
}

/// Walks the device collection for the admin cli. Capped; this is diagnostics, not pagination.
pub async fn list(
  mongo: &mongodb::Client,
  config: &MongoConfiguration,
  limit: i64,
) -> Result<Vec<DeviceRecord>, DirectoryError> {
  let mut cursor = device_collection(mongo, config)
    .find(None, Some(mongodb::options::FindOptions::builder().limit(limit).build()))
    .await
    .map_err(|error| {
      log::warn!("failed mongo query - {error}");
      DirectoryError::Storage(format!("{error}"))
    })?;

  let mut found = Vec::with_capacity(limit.max(0) as usize);

  while cursor.advance().await.map_err(|error| {
    log::warn!("unable to advance cursor - {error}");
    DirectoryError::Storage(format!("{error}"))
  })? {
    match cursor.deserialize_current() {
      Ok(device) => found.push(device),
      Err(error) => log::warn!("unable to deserialize device - {error}"),
    }
  }

  Ok(found)
}

#[cfg(test)]
mod tests {
  use super::RegistrationRequest;
  use crate::errors::DirectoryError;

  fn valid() -> RegistrationRequest {
    RegistrationRequest {
      uid: "10".to_string(),
      ip: "10.0.0.2".to_string(),
      device_type: "relay".to_string(),
      data: "633f0e14".to_string(),
    }
  }

  #[test]
  fn test_valid_request() {
    assert!(valid().validate().is_ok());
  }

  #[test]
  fn test_missing_uid() {
    let request = RegistrationRequest {
      uid: "".to_string(),
      ..valid()
    };
    assert_eq!(request.validate(), Err(DirectoryError::Validation("uid")));
  }

  #[test]
  fn test_missing_data() {
    let request = RegistrationRequest {
      data: "".to_string(),
      ..valid()
    };
    assert_eq!(request.validate(), Err(DirectoryError::Validation("data")));
  }

  #[test]
  fn test_missing_ip() {
    let request = RegistrationRequest {
      ip: "".to_string(),
      ..valid()
    };
    assert_eq!(request.validate(), Err(DirectoryError::Validation("ip")));
  }

  #[test]
  fn test_missing_type() {
    let request = RegistrationRequest {
      device_type: "".to_string(),
      ..valid()
    };
    assert_eq!(request.validate(), Err(DirectoryError::Validation("type")));
  }

  #[test]
  fn test_whitespace_only_field() {
    let request = RegistrationRequest {
      uid: "   ".to_string(),
      ..valid()
    };
    assert_eq!(request.validate(), Err(DirectoryError::Validation("uid")));
  }

  #[test]
  fn test_payload_type_rename() {
    let request = serde_json::from_str::<RegistrationRequest>(
      r#"{"uid":"10","ip":"10.0.0.2","type":"relay","data":"633f0e14"}"#,
    )
    .expect("failed deserialization");

    assert_eq!(request.device_type, "relay");
    assert!(request.validate().is_ok());
  }
}
