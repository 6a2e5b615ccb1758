use clap::Parser;
use serde::Deserialize;
use std::io::{Error, ErrorKind, Result};

/// How many records a `printall` will walk before giving up.
const PRINT_LIMIT: i64 = 50;

#[derive(Parser)]
#[command(about = "relay-cli admin interface")]
struct CommandLineConfig {
  /// Path to a toml configuration file holding the mongo connection settings.
  #[arg(short, long, default_value = "env.toml")]
  config: String,

  #[command(subcommand)]
  command: CommandLineCommand,
}

#[derive(clap::Subcommand)]
enum CommandLineCommand {
  /// Upserts a device record, creating it on first sight of the uid.
  Register {
    uid: String,
    ip: String,
    device_type: String,
    data: String,
  },

  /// Prints a single device record.
  Find { uid: String },

  /// Prints the trigger payload that would be sent to a device.
  Trigger { uid: String },

  /// Inserts a fresh relay-data document and prints its id.
  SeedData,

  /// Lists stored devices.
  Printall,
}

#[derive(Deserialize)]
struct FileConfig {
  mongo: relay::config::MongoConfiguration,
}

fn fail(error: relay::errors::DirectoryError) -> Error {
  Error::new(ErrorKind::Other, format!("{error}"))
}

async fn run(config: FileConfig, command: CommandLineCommand) -> Result<()> {
  let mongo = relay::mongo::connect(&config.mongo).await?;

  match command {
    CommandLineCommand::Register {
      uid,
      ip,
      device_type,
      data,
    } => {
      relay::directory::prepare(&mongo, &config.mongo).await.map_err(fail)?;

      let request = relay::directory::RegistrationRequest {
        uid,
        ip,
        device_type,
        data,
      };
      let device = relay::directory::register(&mongo, &config.mongo, request)
        .await
        .map_err(fail)?;

      println!("{device}");
    }

    CommandLineCommand::Find { uid } => {
      let device = relay::directory::find(&mongo, &config.mongo, &uid).await.map_err(fail)?;
      println!("{device}");
    }

    CommandLineCommand::Trigger { uid } => {
      let device = relay::directory::find(&mongo, &config.mongo, &uid).await.map_err(fail)?;
      let payload = relay::trigger::build_trigger_request(&device.uid).map_err(fail)?;
      let serialized =
        serde_json::to_string(&payload).map_err(|error| Error::new(ErrorKind::Other, format!("{error}")))?;

      println!("{serialized}");
    }

    CommandLineCommand::SeedData => {
      let id = relay::directory::seed_relay_data(&mongo, &config.mongo)
        .await
        .map_err(fail)?;

      println!("{id}");
    }

    CommandLineCommand::Printall => {
      for device in relay::directory::list(&mongo, &config.mongo, PRINT_LIMIT)
        .await
        .map_err(fail)?
      {
        println!("- {device}");
      }
    }
  }

  Ok(())
}

fn main() -> Result<()> {
  dotenv::dotenv().ok();
  env_logger::init();

  log::info!("environment + logger ready.");

  let args = CommandLineConfig::parse();

  let contents = std::fs::read_to_string(&args.config)?;
  let config = toml::from_str::<FileConfig>(&contents).map_err(|error| {
    log::warn!("invalid toml config file - {error}");
    Error::new(ErrorKind::Other, "bad-config")
  })?;

  async_std::task::block_on(run(config, args.command))
}
