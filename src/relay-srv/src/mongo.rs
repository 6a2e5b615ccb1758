use std::io::{Error, ErrorKind, Result};

/// Builds the mongo client from our configuration and verifies the deployment is actually
/// reachable. The client itself connects lazily, and startup wants connection failures to be
/// fatal, so we issue a ping before handing it back.
pub async fn connect(config: &crate::config::MongoConfiguration) -> Result<mongodb::Client> {
  let mongo_options = mongodb::options::ClientOptions::parse(&config.url)
    .await
    .map_err(|error| Error::new(ErrorKind::Other, format!("invalid mongodb url - {error}")))?;

  let mongo = mongodb::Client::with_options(mongo_options)
    .map_err(|error| Error::new(ErrorKind::Other, format!("failed mongodb client - {error}")))?;

  mongo
    .database(&config.database)
    .run_command(bson::doc! { "ping": 1 }, None)
    .await
    .map_err(|error| {
      log::warn!("mongodb unreachable - {error}");
      Error::new(ErrorKind::Other, format!("mongodb unreachable - {error}"))
    })?;

  Ok(mongo)
}
