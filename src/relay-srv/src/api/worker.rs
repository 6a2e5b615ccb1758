use crate::errors::DirectoryError;
use crate::schema::DeviceRecord;

/// Shared state for every http handler: the mongo client plus the configuration naming the
/// database and collections it should touch.
#[derive(Clone)]
pub struct Worker {
  pub(super) mongo: (mongodb::Client, crate::config::MongoConfiguration),
}

impl Worker {
  pub fn new(mongo: mongodb::Client, config: crate::config::MongoConfiguration) -> Self {
    Worker {
      mongo: (mongo, config),
    }
  }

  pub(super) async fn register(&self, request: crate::directory::RegistrationRequest) -> Result<DeviceRecord, DirectoryError> {
    crate::directory::register(&self.mongo.0, &self.mongo.1, request).await
  }

  pub(super) async fn find(&self, uid: &str) -> Result<DeviceRecord, DirectoryError> {
    crate::directory::find(&self.mongo.0, &self.mongo.1, uid).await
  }
}
