//! List command

use std::sync::Arc;

use anyhow::Result;
use camino::Utf8Path;
use tabled::{Table, Tabled};
use warren_broker::{ProcessInvoker, Reconciler};
use warren_core::types::ExchangeRecord;
use warren_core::WarrenConfig;

use crate::cli::ListArgs;
use crate::output;

#[derive(Tabled)]
struct ExchangeRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "VHOST")]
    vhost: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "DURABLE")]
    durable: bool,
    #[tabled(rename = "AUTO-DELETE")]
    auto_delete: bool,
    #[tabled(rename = "INTERNAL")]
    internal: bool,
    #[tabled(rename = "ARGUMENTS")]
    arguments: String,
}

impl From<&ExchangeRecord> for ExchangeRow {
    fn from(record: &ExchangeRecord) -> Self {
        Self {
            name: record.key.name.clone(),
            vhost: record.key.vhost.clone().unwrap_or_default(),
            kind: record.kind.clone(),
            durable: record.durable,
            auto_delete: record.auto_delete,
            internal: record.internal,
            arguments: serde_json::Value::Object(record.arguments.clone()).to_string(),
        }
    }
}

pub async fn run(args: ListArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = WarrenConfig::load(config)?;
    let engine = Reconciler::new(config, Arc::new(ProcessInvoker::new()));

    let snapshot = engine.discover().await?;
    let records: Vec<&ExchangeRecord> = snapshot
        .records
        .iter()
        .filter(|r| match &args.vhost {
            Some(vhost) => r.key.vhost.as_deref() == Some(vhost.as_str()),
            None => true,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        output::warning("No exchanges discovered");
        return Ok(());
    }

    let rows: Vec<ExchangeRow> = records.iter().map(|r| ExchangeRow::from(*r)).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
