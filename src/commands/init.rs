//! Configuration setup: the interactive wizard, `--show` to print the
//! effective settings, `--delete` to remove the file.

use crate::libs::config::{Config, CONFIG_FILE_NAME};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration instead of creating a new one
    #[arg(short, long, conflicts_with = "show")]
    delete: bool,

    /// Print the configuration in effect, defaults included
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(args: InitArgs) -> Result<()> {
    if args.delete {
        match Config::delete()? {
            true => msg_success!(Message::ConfigDeleted),
            false => msg_info!(Message::ConfigNotFound),
        }
        return Ok(());
    }

    if args.show {
        let mut config = Config::read()?;
        config.presence.get_or_insert_with(Default::default);
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        msg_info!(Message::ConfigLocation(path.display().to_string()));
        msg_print!(serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let config = Config::init()?;
    config.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
