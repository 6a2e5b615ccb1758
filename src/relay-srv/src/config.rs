use serde::Deserialize;

/// The names of the collections we store documents in; kept in configuration so deployments can
/// point at their own namespaces.
#[derive(Deserialize, Debug, Clone)]
pub struct MongoCollectionsConfiguration {
  /// Where device records live. This collection carries the unique `uid` index.
  pub devices: String,

  /// Where the documents referenced by a device's `data` field live.
  pub relay_data: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MongoConfiguration {
  /// A full mongodb connection url.
  pub url: String,

  /// The database holding all of our collections.
  pub database: String,

  /// Collection names within that database.
  pub collections: MongoCollectionsConfiguration,
}
