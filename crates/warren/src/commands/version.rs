//! Version command

use anyhow::Result;

use crate::cli::VersionArgs;

pub fn run(args: VersionArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if args.json {
        println!("{}", serde_json::json!({ "version": version }));
    } else {
        println!("warren {}", version);
    }
    Ok(())
}
