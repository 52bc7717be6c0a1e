//! Provides [`DnsResolver`], the CNAME, address and service lookups built
//! on top of a [`Transport`].

use crate::service::ServiceAggregator;
use crate::service_query::validate_name;
use crate::{
    AddressCodec, AddressFamily, HickoryTransport, Protocol, RawRecord, RecordKind, ResolveError,
    ServiceMap, ServiceQuery, TextAddressCodec, Transport,
};
use std::net::SocketAddr;

/// Resolves CNAME, address and SRV records for peer discovery.
///
/// Every call issues its own queries and keeps no state between calls, so a
/// single resolver can be shared between tasks.
///
/// ```rust,no_run
/// #[tokio::main]
/// async fn main() {
///     use peerdns::{DnsResolver, Protocol};
///
///     let resolver = DnsResolver::from_system_config()
///         .expect("failed to read the system dns configuration");
///
///     match resolver.resolve_service("mon", Protocol::Tcp, Some("cluster.example")).await {
///         Ok(endpoints) => println!("found {} monitors", endpoints.len()),
///         Err(err) => eprintln!("service lookup failed: {err}"),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DnsResolver<T, C = TextAddressCodec> {
    transport: T,
    codec: C,
    /// The family used for SRV target lookups.
    family: AddressFamily,
}

impl DnsResolver<HickoryTransport> {
    /// Construct a [`DnsResolver`] over a [`HickoryTransport`] read from system configuration,
    /// querying IPv4 addresses for SRV targets.
    pub fn from_system_config() -> Result<Self, anyhow::Error> {
        Ok(Self::builder(HickoryTransport::from_system_config()?).build())
    }
}

impl<T> DnsResolver<T> {
    /// Start configuring a [`DnsResolver`] that sends its queries through `transport`.
    pub fn builder(transport: T) -> DnsResolverBuilder<T> {
        DnsResolverBuilder::new(transport)
    }
}

impl<T, C> DnsResolver<T, C> {
    /// The [`AddressFamily`] SRV targets are resolved to.
    pub fn family(&self) -> AddressFamily {
        self.family
    }
}

impl<T: Transport, C: AddressCodec> DnsResolver<T, C> {
    async fn query(&self, name: &str, kind: RecordKind) -> Result<Vec<RawRecord>, ResolveError> {
        self.transport.query(name, kind).await.map_err(|err| {
            tracing::error!("{} query for '{}' failed: {:#}", kind, name, err);
            ResolveError::transport(name, kind, err)
        })
    }

    /// Resolve the canonical name `hostname` is an alias of.
    ///
    /// The first CNAME record of the response wins. A response without any
    /// CNAME record fails with [`ResolveError::NotFound`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn resolve_cname(&self, hostname: &str) -> Result<String, ResolveError> {
        validate_name(hostname)?;

        let records = self.query(hostname, RecordKind::Cname).await?;

        let cname = records.into_iter().find_map(|record| match record {
            RawRecord::Cname { target } => Some(target),
            RawRecord::Address { .. } | RawRecord::Srv { .. } => None,
        });

        match cname {
            Some(cname) => {
                tracing::debug!("cname host={}", cname);
                Ok(cname)
            }
            None => Err(ResolveError::NotFound {
                name: hostname.to_string(),
                kind: RecordKind::Cname,
            }),
        }
    }

    /// Resolve `hostname` to an address of `family`.
    ///
    /// When the response holds several matching records the last one wins.
    /// The returned address has port `0`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn resolve_address(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<SocketAddr, ResolveError> {
        validate_name(hostname)?;

        let records = self.query(hostname, family.record_kind()).await?;

        let mut candidate = String::new();
        for record in &records {
            match record {
                RawRecord::Address {
                    family: record_family,
                    raw,
                } if *record_family == family => {
                    candidate = self.codec.format_raw(family, raw)?;
                    tracing::debug!("result: ip {}", candidate);
                }
                RawRecord::Address { .. } | RawRecord::Cname { .. } | RawRecord::Srv { .. } => {}
            }
        }

        self.codec.parse_text(&candidate).map_err(|err| {
            tracing::error!("failed to parse address '{}': {}", candidate, err);
            err.into()
        })
    }

    /// Resolve the endpoints of the service advertised under
    /// `_<service_name>._<protocol>[.<domain>]`.
    ///
    /// See [`resolve_service_query`](Self::resolve_service_query).
    pub async fn resolve_service(
        &self,
        service_name: &str,
        protocol: Protocol,
        domain: Option<&str>,
    ) -> Result<ServiceMap, ResolveError> {
        let query = ServiceQuery::from_parts(service_name, protocol, domain)?;
        self.resolve_service_query(&query).await
    }

    /// Resolve the SRV records of `query` and the address of every target.
    ///
    /// A target whose address cannot be resolved is logged and left out, so
    /// a stale record never fails the whole lookup. Only a failure of the SRV
    /// query itself is returned as an error.
    ///
    /// If two records name the same target, the last one is kept.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn resolve_service_query(
        &self,
        query: &ServiceQuery,
    ) -> Result<ServiceMap, ResolveError> {
        let records = self.query(&query.query_name(), RecordKind::Srv).await?;

        let mut aggregator = ServiceAggregator::default();
        for record in records {
            let (priority, weight, port, target) = match record {
                RawRecord::Srv {
                    priority,
                    weight,
                    port,
                    target,
                } => (priority, weight, port, target),
                RawRecord::Cname { .. } | RawRecord::Address { .. } => continue,
            };

            match self.resolve_address(&target, self.family).await {
                Ok(address) => {
                    tracing::debug!(
                        "srv target {} priority={} weight={} port={}",
                        target,
                        priority,
                        weight,
                        port
                    );
                    aggregator.insert(target, priority, weight, port, address);
                }
                Err(err) => {
                    tracing::warn!("skipping srv target '{}': {}", target, err);
                }
            }
        }

        Ok(aggregator.finish())
    }

    /// Dispatch a [`ResolutionRequest`] to the matching lookup.
    pub async fn resolve(&self, request: ResolutionRequest) -> Result<Resolution, ResolveError> {
        match request {
            ResolutionRequest::Cname { hostname } => {
                self.resolve_cname(&hostname).await.map(Resolution::Cname)
            }
            ResolutionRequest::Address { hostname, family } => self
                .resolve_address(&hostname, family)
                .await
                .map(Resolution::Address),
            ResolutionRequest::Service(query) => self
                .resolve_service_query(&query)
                .await
                .map(Resolution::Service),
        }
    }
}

/// A single lookup to perform with [`DnsResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionRequest {
    /// Look up the canonical name of `hostname`.
    Cname { hostname: String },
    /// Look up an address of `family` for `hostname`.
    Address {
        hostname: String,
        family: AddressFamily,
    },
    /// Look up the endpoints of a service.
    Service(ServiceQuery),
}

/// The outcome of a [`ResolutionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cname(String),
    Address(SocketAddr),
    Service(ServiceMap),
}

/// Builder to configure and create a [`DnsResolver`].
pub struct DnsResolverBuilder<T, C = TextAddressCodec> {
    transport: T,
    codec: C,
    family: AddressFamily,
}

impl<T> DnsResolverBuilder<T> {
    /// Start a builder for `transport`, using the [`TextAddressCodec`] and
    /// resolving SRV targets to IPv4 addresses.
    pub fn new(transport: T) -> DnsResolverBuilder<T> {
        Self {
            transport,
            codec: TextAddressCodec,
            family: AddressFamily::default(),
        }
    }
}

impl<T, C> DnsResolverBuilder<T, C> {
    /// Set the [`AddressFamily`] SRV targets are resolved to.
    ///
    /// Default set to [`AddressFamily::Ipv4`].
    pub fn family(self, family: AddressFamily) -> DnsResolverBuilder<T, C> {
        Self { family, ..self }
    }

    /// Resolve SRV targets to IPv6 addresses if the local node binds to IPv6,
    /// and to IPv4 addresses otherwise.
    pub fn bind_ipv6(self, bind_ipv6: bool) -> DnsResolverBuilder<T, C> {
        let family = if bind_ipv6 {
            AddressFamily::Ipv6
        } else {
            AddressFamily::Ipv4
        };

        self.family(family)
    }

    /// Set a custom [`AddressCodec`].
    pub fn address_codec<U: AddressCodec>(self, codec: U) -> DnsResolverBuilder<T, U> {
        DnsResolverBuilder {
            transport: self.transport,
            codec,
            family: self.family,
        }
    }

    /// Construct a [`DnsResolver`] from the [`DnsResolverBuilder`] instance.
    pub fn build(self) -> DnsResolver<T, C> {
        DnsResolver {
            transport: self.transport,
            codec: self.codec,
            family: self.family,
        }
    }
}

const _: () = {
    const fn assert_is_send_sync<T: Send + Sync>() {}
    assert_is_send_sync::<DnsResolver<HickoryTransport>>();
    assert_is_send_sync::<DnsResolverBuilder<HickoryTransport>>();
};
