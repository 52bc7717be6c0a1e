//! The result of a service lookup.

use std::collections::BTreeMap;
use std::net::SocketAddr;

/// A resolved SRV target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Lower values are preferred.
    pub priority: u16,
    /// Arbitrates between endpoints of equal priority.
    pub weight: u16,
    /// The resolved target address, with the port advertised by the SRV record.
    pub address: SocketAddr,
}

/// Resolved endpoints of a service, keyed by SRV target hostname.
pub type ServiceMap = BTreeMap<String, ServiceEndpoint>;

/// Collects resolved SRV records into a [`ServiceMap`].
///
/// When several records share a target hostname the last one added wins.
#[derive(Debug, Default)]
pub(crate) struct ServiceAggregator {
    endpoints: ServiceMap,
}

impl ServiceAggregator {
    /// Add the endpoint for `target`, moving `address` to the record's `port`.
    pub(crate) fn insert(
        &mut self,
        target: String,
        priority: u16,
        weight: u16,
        port: u16,
        mut address: SocketAddr,
    ) {
        address.set_port(port);

        if let Some(previous) = self.endpoints.insert(
            target,
            ServiceEndpoint {
                priority,
                weight,
                address,
            },
        ) {
            tracing::debug!("replaced duplicate target endpoint {:?}", previous);
        }
    }

    pub(crate) fn finish(self) -> ServiceMap {
        self.endpoints
    }
}
