use std::io::{Error, ErrorKind, Result};

async fn run(config: relay::api::Configuration) -> Result<()> {
  let mongo = relay::mongo::connect(&config.mongo).await?;

  // The unique uid index is the only uniqueness guarantee in the system; refuse to serve
  // traffic without it.
  relay::directory::prepare(&mongo, &config.mongo)
    .await
    .map_err(|error| Error::new(ErrorKind::Other, format!("unable to prepare device indexes - {error}")))?;

  let addr = config.web.addr.clone();
  let worker = relay::api::Worker::new(mongo, config.mongo);

  log::info!("directory ready, binding http server to {addr}");

  relay::api::new(worker).listen(&addr).await
}

fn main() -> Result<()> {
  dotenv::dotenv().ok();
  env_logger::init();

  log::info!("environment + logger ready.");

  let config_path = std::env::var("RELAY_CONFIG_PATH").unwrap_or_else(|_| "env.toml".to_string());
  let contents = std::fs::read_to_string(&config_path)?;

  let mut config = toml::from_str::<relay::api::Configuration>(&contents).map_err(|error| {
    log::warn!("invalid toml config file - {error}");
    Error::new(ErrorKind::Other, "bad-config")
  })?;

  if let Ok(addr) = std::env::var("RELAY_WEB_ADDR") {
    config.web.addr = addr;
  }

  async_std::task::block_on(run(config))
}
