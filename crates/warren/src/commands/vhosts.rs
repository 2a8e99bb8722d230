//! Vhosts command

use std::sync::Arc;

use anyhow::Result;
use camino::Utf8Path;
use warren_broker::{ProcessInvoker, RabbitCtl};
use warren_core::WarrenConfig;

use crate::cli::VhostsArgs;

pub async fn run(args: VhostsArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = WarrenConfig::load(config)?;
    let ctl = RabbitCtl::new(Arc::new(ProcessInvoker::new()), config.broker());

    let vhosts = ctl.list_vhosts().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&vhosts)?);
    } else {
        for vhost in vhosts {
            println!("{}", vhost);
        }
    }
    Ok(())
}
