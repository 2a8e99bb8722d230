//! Config commands

use anyhow::Result;
use camino::Utf8Path;
use warren_core::WarrenConfig;

use crate::cli::ConfigCommands;
use crate::output;

pub fn run(cmd: ConfigCommands, config: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Validate => {
            let config = WarrenConfig::load(config)?;
            output::success(&format!(
                "{} is valid ({} exchanges declared)",
                config.config_path,
                config.exchanges().len()
            ));
            Ok(())
        }
        ConfigCommands::Show => {
            let config = WarrenConfig::load(config)?;
            print!("{}", serde_yaml_ng::to_string(&config.manifest)?);
            Ok(())
        }
    }
}
