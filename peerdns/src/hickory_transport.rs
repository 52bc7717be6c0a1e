//! Implements [`Transport`] for dns.

use crate::{AddressFamily, RawRecord, RecordKind, Transport};
use anyhow::Context;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::{system_conf, AsyncResolver, Name, TokioAsyncResolver};

/// Implements [`Transport`] by sending DNS queries with hickory.
pub struct HickoryTransport {
    /// The hickory resolver which contacts the dns service directly such
    /// that we bypass os-specific dns caching.
    dns: TokioAsyncResolver,
}

impl HickoryTransport {
    /// Construct a new [`HickoryTransport`] from env and system configuration, e.g `resolv.conf`.
    pub fn from_system_config() -> Result<Self, anyhow::Error> {
        let (config, opts) = system_conf::read_system_conf()
            .context("failed to read dns services from system configuration")?;

        Ok(Self::new(config, opts))
    }

    /// Construct a new [`HickoryTransport`] from an explicit configuration.
    pub fn new(config: ResolverConfig, mut opts: ResolverOpts) -> Self {
        // We do not want any caching on our side.
        opts.cache_size = 0;

        let dns = AsyncResolver::tokio(config, opts);

        Self { dns }
    }
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::Cname => RecordType::CNAME,
        RecordKind::A => RecordType::A,
        RecordKind::Aaaa => RecordType::AAAA,
        RecordKind::Srv => RecordType::SRV,
    }
}

/// Hostname without the trailing root label.
fn hostname(name: &Name) -> String {
    name.to_utf8().trim_end_matches('.').to_string()
}

fn raw_record(data: &RData) -> Option<RawRecord> {
    match data {
        RData::CNAME(cname) => Some(RawRecord::Cname {
            target: hostname(&cname.0),
        }),
        RData::A(a) => Some(RawRecord::Address {
            family: AddressFamily::Ipv4,
            raw: a.0.octets().to_vec(),
        }),
        RData::AAAA(aaaa) => Some(RawRecord::Address {
            family: AddressFamily::Ipv6,
            raw: aaaa.0.octets().to_vec(),
        }),
        RData::SRV(srv) => Some(RawRecord::Srv {
            priority: srv.priority(),
            weight: srv.weight(),
            port: srv.port(),
            target: hostname(srv.target()),
        }),
        _ => None,
    }
}

#[async_trait::async_trait]
impl Transport for HickoryTransport {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn query(&self, name: &str, kind: RecordKind) -> Result<Vec<RawRecord>, anyhow::Error> {
        match self.dns.lookup(name, record_type(kind)).await {
            Ok(lookup) => {
                tracing::debug!("dns query expires in: {:?}", lookup.valid_until());
                Ok(lookup
                    .record_iter()
                    .filter_map(|record| record.data().and_then(raw_record))
                    .collect())
            }
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => {
                    tracing::debug!("no records found");
                    Ok(Vec::new())
                }
                _ => Err(err.into()),
            },
        }
    }
}
