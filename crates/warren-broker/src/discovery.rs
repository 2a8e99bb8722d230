//! Discovered-state snapshot
//!
//! One snapshot is produced per reconciliation pass and used for the whole
//! matching step; a read failure anywhere aborts the pass so stale and
//! fresh vhost data are never mixed.

use tracing::debug;
use warren_core::types::{ExchangeKey, ExchangeRecord};
use warren_core::Result;

use crate::ctl::RabbitCtl;
use crate::parse::parse_exchange_line;

/// The full discovered exchange state for one pass
#[derive(Debug, Clone, Default)]
pub struct DiscoveredState {
    /// Discovered records, in vhost-then-listing order
    pub records: Vec<ExchangeRecord>,
}

impl DiscoveredState {
    /// Number of discovered exchanges
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing was discovered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a discovered record by key
    pub fn lookup(&self, key: &ExchangeKey) -> Option<&ExchangeRecord> {
        self.records.iter().find(|r| &r.key == key)
    }
}

/// Discover every exchange across every vhost.
///
/// Vhosts are walked sequentially; each listing is one retried read call.
/// Records are built fresh and never reused across passes.
pub async fn discover_all(ctl: &RabbitCtl) -> Result<DiscoveredState> {
    let mut records = Vec::new();

    for vhost in ctl.list_vhosts().await? {
        let lines = ctl.list_exchanges(&vhost).await?;
        debug!("vhost `{}`: {} exchange lines", vhost, lines.len());

        for line in lines {
            if let Some(record) = parse_exchange_line(&vhost, &line)? {
                records.push(record);
            }
        }
    }

    debug!("discovered {} exchanges", records.len());
    Ok(DiscoveredState { records })
}
