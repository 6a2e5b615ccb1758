use serde::{Deserialize, Serialize};

mod devices;
mod trigger;
mod worker;

pub use worker::Worker;

/// These configuration definitions make it easy for the web binary to deserialize a
/// configuration file (e.g toml) and have everything ready for the server to run.

#[derive(Deserialize, Debug, Clone)]
pub struct WebConfiguration {
  /// The address the http listener binds to.
  pub addr: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Configuration {
  /// Http listener settings.
  pub web: WebConfiguration,

  /// The mongo configuration.
  pub mongo: crate::config::MongoConfiguration,
}

#[derive(Serialize, Debug)]
struct HeartbeatPayload {
  version: String,
  timestamp: chrono::DateTime<chrono::Utc>,
}

impl Default for HeartbeatPayload {
  fn default() -> Self {
    HeartbeatPayload {
      version: option_env!("RELAY_VERSION").unwrap_or("dev").into(),
      timestamp: chrono::Utc::now(),
    }
  }
}

/// Collapses a directory error onto the one status code it maps to.
fn error_response(error: crate::errors::DirectoryError) -> tide::Error {
  tide::Error::from_str(error.status(), format!("{error}"))
}

async fn heartbeat(_request: tide::Request<Worker>) -> tide::Result {
  Ok(
    tide::Response::builder(200)
      .body(tide::Body::from_json(&HeartbeatPayload::default())?)
      .build(),
  )
}

async fn missing(_request: tide::Request<Worker>) -> tide::Result {
  log::debug!("not-found");
  Ok(tide::Response::builder(404).build())
}

pub fn new(worker: Worker) -> tide::Server<Worker> {
  let mut app = tide::with_state(worker);

  app.at("/devices/register").post(devices::register);
  app.at("/device-info").get(devices::info);
  app.at("/relay-request").get(trigger::build);

  app.at("/status").get(heartbeat);
  app.at("/*").all(missing);
  app.at("/").all(missing);

  app
}
