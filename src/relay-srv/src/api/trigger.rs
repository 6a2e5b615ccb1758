use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TriggerQuery {
  uid: String,
}

/// Route: relay-request
///
/// Confirms the device is known to the directory, then responds with the payload that would be
/// sent to it. Actually delivering the payload to hardware is somebody else's job.
pub async fn build(request: tide::Request<super::Worker>) -> tide::Result {
  let query = request.query::<TriggerQuery>().map_err(|error| {
    log::warn!("invalid trigger query - {error}");
    tide::Error::from_str(422, "bad-query")
  })?;

  let device = request.state().find(&query.uid).await.map_err(super::error_response)?;

  let payload = crate::trigger::build_trigger_request(&device.uid).map_err(super::error_response)?;

  log::debug!("built trigger payload for '{}'", device.uid);

  tide::Body::from_json(&payload).map(|body| tide::Response::builder(200).body(body).build())
}
