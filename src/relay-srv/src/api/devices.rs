use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LookupQuery {
  uid: String,
}

/// Route: register
///
/// This api route will attempt to parse the registration payload and hand it to the directory;
/// the first sight of a `uid` creates the record, repeats overwrite the mutable fields.
pub async fn register(mut request: tide::Request<super::Worker>) -> tide::Result {
  let payload = request
    .body_json::<crate::directory::RegistrationRequest>()
    .await
    .map_err(|error| {
      log::warn!("invalid registration payload - {error}");
      tide::Error::from_str(422, "bad-payload")
    })?;

  log::debug!("registration requested - {payload:?}");

  let device = request.state().register(payload).await.map_err(super::error_response)?;

  tide::Body::from_json(&device).map(|body| tide::Response::builder(200).body(body).build())
}

/// Route: info
///
/// Pure lookup; the `uid` arrives as a query parameter and a miss is a 404.
pub async fn info(request: tide::Request<super::Worker>) -> tide::Result {
  let query = request.query::<LookupQuery>().map_err(|error| {
    log::warn!("invalid lookup query - {error}");
    tide::Error::from_str(422, "bad-query")
  })?;

  let device = request.state().find(&query.uid).await.map_err(super::error_response)?;

  tide::Body::from_json(&device).map(|body| tide::Response::builder(200).body(body).build())
}
